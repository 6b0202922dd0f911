use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while something is animating
    animation_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll with the animation frame interval
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Scroll(WHEEL_ROWS)),
            MouseEventKind::ScrollUp => Some(AppEvent::Scroll(-WHEEL_ROWS)),
            _ => None,
        },
        _ => None,
    }
}

/// Result of handing a link target to the system opener
#[derive(Debug)]
pub enum LinkOpenResult {
    Success { target: String },
    Failure { target: String, error: String },
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Mouse wheel, in rows (positive = down)
    Scroll(i32),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_wheel_becomes_scroll() {
        assert!(matches!(translate(mouse(MouseEventKind::ScrollDown)), Some(AppEvent::Scroll(3))));
        assert!(matches!(translate(mouse(MouseEventKind::ScrollUp)), Some(AppEvent::Scroll(-3))));
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(translate(Event::Key(release)).is_none());
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(press)), Some(AppEvent::Key(_))));
    }

    #[test]
    fn test_animation_rate() {
        let handler = EventHandler::with_animation_fps(100, 50);
        assert_eq!(handler.animation_rate, Duration::from_millis(20));
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
        // Zero fps is treated as one frame per second
        let handler = EventHandler::with_animation_fps(100, 0);
        assert_eq!(handler.animation_rate, Duration::from_secs(1));
    }
}
