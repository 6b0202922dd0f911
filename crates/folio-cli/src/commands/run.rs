use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use folio_core::{AppConfig, Error};
use folio_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, LinkOpenResult},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{NavBarWidget, PageViewWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(
    mut config: AppConfig,
    content: Option<PathBuf>,
    theme: Option<String>,
) -> Result<()> {
    // Scroll and viewport signals come from the terminal
    if !io::stdout().is_terminal() {
        return Err(Error::SignalUnavailable("stdout is not a terminal".to_string()).into());
    }

    let portfolio = super::load_portfolio(&config, content.as_deref())?;
    if let Some(name) = theme {
        config.ui.theme.name = name;
    }
    let theme = load_theme(&config.ui.theme);
    let keymap = Keymap::from_config(&config.keymap);

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_fps,
    );

    info!(
        "Starting folio for {} (theme {})",
        portfolio.profile.name, config.ui.theme.name
    );
    let title = format!("{} | {}", portfolio.profile.name, portfolio.profile.brand);
    let mut app = App::new(config, portfolio, theme);

    // Setup terminal; from here on every exit path goes through the guard
    enable_raw_mode()?;
    let mut guard = TerminalGuard::new(restore_terminal);
    install_panic_hook();
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap, &event_handler).await;

    let restored = guard.restore();
    result?;
    Ok(restored?)
}

/// Runs a terminal restore exactly once, either explicitly or when dropped
///
/// Dropping covers early `?` returns and unwinding panics.
struct TerminalGuard<R: FnMut() -> io::Result<()>> {
    restore: Option<R>,
}

impl<R: FnMut() -> io::Result<()>> TerminalGuard<R> {
    fn new(restore: R) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<R: FnMut() -> io::Result<()>> Drop for TerminalGuard<R> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    write_restore(&mut io::stdout())?;
    raw
}

/// Escape sequences undoing the session's screen setup
fn write_restore(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
}

/// Put the terminal back before the panic message is printed
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    // Create channel for link opener results
    let (open_tx, mut open_rx) = mpsc::unbounded_channel::<LinkOpenResult>();

    // Start at high frame rate so mount animations play smoothly
    let mut needs_fast_update = true;

    // Main loop
    loop {
        // Process finished link opens (non-blocking)
        while let Ok(result) = open_rx.try_recv() {
            app.link_opened(result);
        }

        let size = terminal.size()?;
        // One row for the status bar
        app.layout(size.width, size.height.saturating_sub(1).max(1));

        let now = Instant::now();
        app.frame(now);

        // Draw UI
        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            PageViewWidget::render(frame, main_layout[0], app, now);
            NavBarWidget::render(frame, main_layout[0], app, now);
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, app);
            }
        })?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, &open_tx);
                }
                AppEvent::Scroll(rows) => app.scroll_lines(rows),
                // Layout follows the terminal size at the top of the loop
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }

        // Checked after input so a fresh scroll request gets the fast rate immediately
        needs_fast_update = app.needs_fast_update(Instant::now());

        tokio::task::yield_now().await;
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action, open_tx: &mpsc::UnboundedSender<LinkOpenResult>) {
    // Any other action ends a chord in progress
    if !matches!(action, Action::Pending(_)) {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::ScrollDown => app.scroll_step(true),
        Action::ScrollUp => app.scroll_step(false),
        Action::ScrollHalfPageDown => app.scroll_pages(0.5),
        Action::ScrollHalfPageUp => app.scroll_pages(-0.5),
        Action::ScrollPageDown => app.scroll_pages(1.0),
        Action::ScrollPageUp => app.scroll_pages(-1.0),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::Pending(c) => app.set_pending_key(c),
        Action::NextLink => app.next_link(),
        Action::PrevLink => app.prev_link(),
        Action::OpenLink => {
            if let Some(target) = app.open_link() {
                spawn_open(target, open_tx.clone());
            }
        }
        Action::JumpToSection(section) => app.jump_to_section(section),
        Action::Help => app.toggle_help(),
        Action::ExitMode => app.exit_mode(),
        Action::None => {}
    }
}

/// Hand a target to the system opener without blocking the UI
fn spawn_open(target: String, tx: mpsc::UnboundedSender<LinkOpenResult>) {
    tokio::task::spawn_blocking(move || {
        let result = match open::that(&target) {
            Ok(()) => LinkOpenResult::Success { target },
            Err(e) => LinkOpenResult::Failure {
                target,
                error: e.to_string(),
            },
        };
        let _ = tx.send(result);
    });
}
