//! Scroll-driven navigation bar state

use std::cell::Cell;
use std::rc::Rc;

use crate::signal::{Signal, Subscription};

/// Offset (in rows) past which the navigation bar switches to its scrolled style
pub const SCROLL_THRESHOLD: u16 = 50;

/// Visual style of the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavStyle {
    /// Transparent bar at the top of the page
    #[default]
    Top,
    /// Opaque bar with a separator, once the page is scrolled past the threshold
    Scrolled,
}

impl NavStyle {
    /// Style for a given scroll offset. Strictly greater than the threshold is scrolled.
    pub fn for_offset(offset: u16) -> Self {
        if offset > SCROLL_THRESHOLD {
            NavStyle::Scrolled
        } else {
            NavStyle::Top
        }
    }

    pub fn is_scrolled(self) -> bool {
        self == NavStyle::Scrolled
    }
}

/// Derives [`NavStyle`] from scroll offsets
#[derive(Debug, Clone, Default)]
pub struct ScrollStateTracker {
    style: NavStyle,
}

impl ScrollStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one scroll signal. Returns true when the style flipped.
    pub fn on_scroll(&mut self, offset: u16) -> bool {
        let next = NavStyle::for_offset(offset);
        let changed = next != self.style;
        if changed {
            tracing::debug!("Navigation style {:?} -> {:?} at offset {}", self.style, next, offset);
        }
        self.style = next;
        changed
    }

    pub fn style(&self) -> NavStyle {
        self.style
    }

    pub fn is_scrolled(&self) -> bool {
        self.style.is_scrolled()
    }

    /// Attach a tracker to a scroll signal. The tracker lives as long as the
    /// returned handle; dropping the handle detaches the listener.
    pub fn mount(signal: &Signal<u16>) -> MountedTracker {
        let state = Rc::new(Cell::new(NavStyle::Top));

        let listener_state = state.clone();
        let mut tracker = ScrollStateTracker::new();
        let subscription = signal.subscribe(move |offset: &u16| {
            if tracker.on_scroll(*offset) {
                listener_state.set(tracker.style());
            }
        });

        MountedTracker {
            state,
            _subscription: subscription,
        }
    }
}

/// A tracker attached to a scroll signal
#[derive(Debug)]
pub struct MountedTracker {
    state: Rc<Cell<NavStyle>>,
    _subscription: Subscription,
}

impl MountedTracker {
    pub fn style(&self) -> NavStyle {
        self.state.get()
    }

    pub fn is_scrolled(&self) -> bool {
        self.style().is_scrolled()
    }
}
