use std::time::{Duration, Instant};

use folio_core::motion::{ElementId, Intersection, MountedSequencer, RevealSequencer, VisualState};
use folio_core::{AppConfig, MountedTracker, NavStyle, Portfolio, ScrollStateTracker, Signal};
use tracing::{debug, info, warn};

use crate::event::LinkOpenResult;
use crate::motion::{compose, is_transitioning, reveal_visual};
use crate::page::{ElementBody, LinkTarget, Page, PageBuilder, SectionId, ViewportTracker};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// How long a status message stays on screen
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Initial page size, replaced by the real terminal size on the first frame
const INITIAL_SIZE: (u16, u16) = (80, 24);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Help,
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub portfolio: Portfolio,
    pub theme: Theme,
    /// Current layout of the portfolio
    pub page: Page,
    pub scroll: ScrollAnimator,
    /// Scroll offsets published once per frame while the offset changes
    scroll_signal: Signal<u16>,
    /// Viewport intersection changes
    intersections: Signal<Intersection>,
    nav: MountedTracker,
    reveals: MountedSequencer,
    viewport: ViewportTracker,
    last_offset: Option<u16>,
    /// Index into `page.links` of the focused link
    pub focused_link: Option<usize>,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    status_since: Option<Instant>,
    /// Pending key for multi-key commands (e.g., 'g' for 'gg')
    pub pending_key: Option<char>,
    /// Origin of looping ambient animations
    pub mounted_at: Instant,
}

impl App {
    pub fn new(config: AppConfig, portfolio: Portfolio, theme: Theme) -> Self {
        let (width, height) = INITIAL_SIZE;
        let page = PageBuilder::new(&portfolio, &theme, &config.ui.reveal).build(width, height);

        let scroll_signal = Signal::new();
        let intersections = Signal::new();
        let nav = ScrollStateTracker::mount(&scroll_signal);
        let reveals = RevealSequencer::new().mount(&intersections);
        for (id, reveal) in page.reveal_configs() {
            reveals.register(id, reveal);
        }

        let scroll = ScrollAnimator::new(config.ui.scroll.clone());

        Self {
            config,
            portfolio,
            theme,
            page,
            scroll,
            scroll_signal,
            intersections,
            nav,
            reveals,
            viewport: ViewportTracker::new(),
            last_offset: None,
            focused_link: None,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            status_since: None,
            pending_key: None,
            mounted_at: Instant::now(),
        }
    }

    /// Lay the page out for a new viewport size
    ///
    /// Reveal latches survive because element ids do not depend on the size.
    pub fn layout(&mut self, width: u16, viewport_height: u16) {
        if self.page.width == width && self.page.viewport_height == viewport_height {
            return;
        }

        self.page = PageBuilder::new(&self.portfolio, &self.theme, &self.config.ui.reveal)
            .build(width, viewport_height);
        for (id, reveal) in self.page.reveal_configs() {
            self.reveals.register(id, reveal);
        }
        if self
            .focused_link
            .is_some_and(|link| !self.page.focusable_links().contains(&link))
        {
            self.focused_link = None;
        }

        // Elements moved; re-check them against the viewport on the next frame
        self.last_offset = None;
        debug!("Relayout at {}x{}", width, viewport_height);
    }

    /// Advance animations to `now` and publish the scroll and viewport signals
    ///
    /// Called once per frame before drawing. Returns the scroll offset.
    pub fn frame(&mut self, now: Instant) -> u16 {
        let offset = self.scroll.update(self.page.max_scroll(), now);

        if self.last_offset != Some(offset) {
            self.last_offset = Some(offset);
            self.scroll_signal.emit(offset);
            for change in self.viewport.evaluate(&self.page, offset, now) {
                self.intersections.emit(change);
            }
        }

        if self
            .status_since
            .is_some_and(|since| now.saturating_duration_since(since) >= STATUS_TTL)
        {
            self.clear_status();
        }

        offset
    }

    pub fn offset(&self) -> u16 {
        self.scroll.current_scroll()
    }

    pub fn nav_style(&self) -> NavStyle {
        self.nav.style()
    }

    /// Visual state of an element, including its parents' reveals
    pub fn visual(&self, id: ElementId, now: Instant) -> VisualState {
        let animate = self.config.ui.reveal.enabled;
        self.reveals.with(|sequencer| {
            let mut state = reveal_visual(sequencer.status(id), now, animate);
            let mut parent = self.page.element(id).and_then(|e| e.parent);
            while let Some(pid) = parent {
                state = compose(&reveal_visual(sequencer.status(pid), now, animate), &state);
                parent = self.page.element(pid).and_then(|e| e.parent);
            }
            state
        })
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.reveals.is_revealed(id)
    }

    /// Whether the next frame should come quickly
    pub fn needs_fast_update(&self, now: Instant) -> bool {
        if self.scroll.needs_update() || self.last_offset.is_none() {
            return true;
        }
        if self.config.ui.reveal.enabled {
            let moving = self.reveals.with(|sequencer| {
                self.page
                    .reveal_configs()
                    .iter()
                    .any(|(id, _)| is_transitioning(sequencer.status(*id), now))
            });
            if moving {
                return true;
            }
        }
        self.has_ambient_in_view()
    }

    /// Looping animations (glows, name sweep, scroll hint) on screen
    fn has_ambient_in_view(&self) -> bool {
        let offset = self.offset();
        self.page.elements.iter().any(|element| {
            matches!(
                element.body,
                ElementBody::Glow { .. } | ElementBody::Sweep { .. } | ElementBody::Bounce { .. }
            ) && crate::page::viewport::intersects(
                element.rect.y,
                element.rect.height,
                offset,
                self.page.viewport_height,
            )
        })
    }

    // Scrolling

    pub fn scroll_step(&mut self, down: bool) {
        let max = self.page.max_scroll();
        self.scroll.step(down, max);
    }

    pub fn scroll_lines(&mut self, delta: i32) {
        let max = self.page.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    pub fn scroll_pages(&mut self, pages: f32) {
        let max = self.page.max_scroll();
        self.scroll
            .scroll_pages(pages, self.page.viewport_height, max);
    }

    pub fn jump_to_top(&mut self) {
        let max = self.page.max_scroll();
        self.scroll.scroll_to(0, max);
    }

    pub fn jump_to_bottom(&mut self) {
        let max = self.page.max_scroll();
        self.scroll.scroll_to(max, max);
    }

    /// Scroll to a section's anchor
    pub fn jump_to_section(&mut self, section: SectionId) {
        let max = self.page.max_scroll();
        let target = self.page.anchor(section);
        debug!("Jump to {:?} at row {}", section, target);
        self.scroll.scroll_to(target, max);
    }

    /// Section under the top of the viewport
    pub fn current_section(&self) -> SectionId {
        self.page
            .section_at(self.scroll.target_scroll().saturating_add(1))
    }

    // Links

    pub fn next_link(&mut self) {
        self.cycle_link(true);
    }

    pub fn prev_link(&mut self) {
        self.cycle_link(false);
    }

    fn cycle_link(&mut self, forward: bool) {
        let links = self.page.focusable_links();
        if links.is_empty() {
            return;
        }

        let position = self
            .focused_link
            .and_then(|current| links.iter().position(|&l| l == current));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => links.len() - 1,
            (Some(i), true) => (i + 1) % links.len(),
            (Some(i), false) => (i + links.len() - 1) % links.len(),
        };
        let link = links[next];
        self.focused_link = Some(link);

        if let Some((top, height)) = self.page.link_span(link) {
            let max = self.page.max_scroll();
            self.scroll
                .scroll_into_view(top, height, self.page.viewport_height, max);
        }
    }

    /// Follow the focused link
    ///
    /// Anchors scroll the page. External targets are returned for the caller
    /// to hand to the system opener.
    pub fn open_link(&mut self) -> Option<String> {
        let link = self.focused_link.and_then(|i| self.page.links.get(i)).cloned()?;

        match link.target {
            LinkTarget::Anchor(section) => {
                self.jump_to_section(section);
                None
            }
            LinkTarget::External(target) => {
                info!("Opening {}", target);
                self.set_status(format!("Opening {}...", link.label));
                Some(target)
            }
        }
    }

    /// Report the outcome of handing a target to the system opener
    pub fn link_opened(&mut self, result: LinkOpenResult) {
        match result {
            LinkOpenResult::Success { target } => {
                debug!("Opened {}", target);
                self.clear_status();
            }
            LinkOpenResult::Failure { target, error } => {
                warn!("Failed to open {}: {}", target, error);
                self.set_status(format!("Could not open {}: {}", target, error));
            }
        }
    }

    // Modes and status

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            Mode::Normal => Mode::Help,
        };
    }

    /// Leave help, or drop link focus in normal mode
    pub fn exit_mode(&mut self) {
        match self.mode {
            Mode::Help => self.mode = Mode::Normal,
            Mode::Normal => self.focused_link = None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_since = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_since = None;
    }

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}
