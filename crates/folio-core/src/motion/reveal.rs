//! Viewport-gated reveal sequencing
//!
//! Every animated element declares a [`RevealConfig`]. The sequencer keeps a
//! latch per element and flips it when an intersection signal reports the
//! element visible (or on first evaluation for mount-triggered elements).
//! With `trigger_once` the latch is one-way.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::config::EasingType;
use crate::signal::{Signal, Subscription};

use super::visual::VisualState;

/// Default duration of a reveal transition
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(600);

/// Stable identifier of a page element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// What starts a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First evaluation after mount, regardless of viewport
    Mount,
    /// First intersection signal that reports the element visible
    InView,
}

/// Declarative description of one element's reveal
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    pub initial: VisualState,
    pub visible: VisualState,
    pub delay: Duration,
    pub duration: Duration,
    pub trigger: Trigger,
    pub trigger_once: bool,
    pub easing: EasingType,
}

impl RevealConfig {
    pub fn new(initial: VisualState, visible: VisualState) -> Self {
        Self {
            initial,
            visible,
            delay: Duration::ZERO,
            duration: DEFAULT_REVEAL_DURATION,
            trigger: Trigger::InView,
            trigger_once: true,
            easing: EasingType::EaseOut,
        }
    }

    /// Opacity 0 -> 1
    pub fn fade() -> Self {
        Self::new(VisualState::hidden(), VisualState::SETTLED)
    }

    /// Fade in while sliding horizontally into place from `columns` (negative = from the left)
    pub fn slide_x(columns: i16) -> Self {
        Self::new(VisualState::hidden().shifted_x(columns), VisualState::SETTLED)
    }

    /// Fade in while moving vertically into place from `rows` (positive = from below)
    pub fn slide_y(rows: i16) -> Self {
        Self::new(VisualState::hidden().shifted_y(rows), VisualState::SETTLED)
    }

    /// Progress bar growing from empty to its target width
    pub fn grow() -> Self {
        Self::new(VisualState::SETTLED.empty_fill(), VisualState::SETTLED)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_mount(mut self) -> Self {
        self.trigger = Trigger::Mount;
        self
    }

    /// Re-hide when the element leaves the viewport
    pub fn repeating(mut self) -> Self {
        self.trigger_once = false;
        self
    }
}

/// Delay of the `index`-th element in a staggered list: `index × step`
pub fn stagger(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Delay of a child inside a staggered parent:
/// `parent_index × step + child_index × child_step`
pub fn nested_stagger(
    parent_index: usize,
    step: Duration,
    child_index: usize,
    child_step: Duration,
) -> Duration {
    stagger(parent_index, step).saturating_add(stagger(child_index, child_step))
}

/// Viewport intersection change for one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub element: ElementId,
    pub visible: bool,
    pub at: Instant,
}

/// Per-element reveal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealLatch {
    #[default]
    Hidden,
    /// Revealed; the transition toward the visible state started at `since`
    Revealed { since: Instant },
}

impl RevealLatch {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealLatch::Revealed { .. })
    }

    pub fn revealed_at(&self) -> Option<Instant> {
        match self {
            RevealLatch::Hidden => None,
            RevealLatch::Revealed { since } => Some(*since),
        }
    }

    /// Apply an observation. Returns true when the latch changed.
    pub fn observe(&mut self, config: &RevealConfig, visible: bool, at: Instant) -> bool {
        let should_show = match config.trigger {
            Trigger::Mount => true,
            Trigger::InView => visible,
        };

        match (*self, should_show) {
            (RevealLatch::Hidden, true) => {
                *self = RevealLatch::Revealed { since: at };
                true
            }
            (RevealLatch::Revealed { .. }, false) if !config.trigger_once => {
                *self = RevealLatch::Hidden;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    config: RevealConfig,
    latch: RevealLatch,
}

/// Reveal state of a registered element
#[derive(Debug, Clone, Copy)]
pub struct RevealStatus<'a> {
    pub config: &'a RevealConfig,
    pub latch: RevealLatch,
}

/// Latches for every animated element on the page
#[derive(Debug, Default)]
pub struct RevealSequencer {
    entries: HashMap<ElementId, Entry>,
}

impl RevealSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. Re-registering keeps the existing latch and
    /// replaces the config (layout rebuilds after a resize).
    pub fn register(&mut self, id: ElementId, config: RevealConfig) {
        self.entries
            .entry(id)
            .and_modify(|entry| entry.config = config.clone())
            .or_insert(Entry {
                config,
                latch: RevealLatch::Hidden,
            });
    }

    /// Handle one intersection signal. Unknown elements are ignored.
    pub fn observe(&mut self, intersection: &Intersection) -> bool {
        let Some(entry) = self.entries.get_mut(&intersection.element) else {
            return false;
        };
        let changed = entry
            .latch
            .observe(&entry.config, intersection.visible, intersection.at);
        if changed {
            tracing::debug!(
                "Element {:?} {}",
                intersection.element,
                if entry.latch.is_revealed() { "revealed" } else { "hidden" }
            );
        }
        changed
    }

    pub fn status(&self, id: ElementId) -> Option<RevealStatus<'_>> {
        self.entries.get(&id).map(|entry| RevealStatus {
            config: &entry.config,
            latch: entry.latch,
        })
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.entries
            .get(&id)
            .map(|entry| entry.latch.is_revealed())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach the sequencer to an intersection signal. The sequencer keeps
    /// receiving signals for as long as the returned handle lives.
    pub fn mount(self, signal: &Signal<Intersection>) -> MountedSequencer {
        let inner = Rc::new(RefCell::new(self));
        let listener = inner.clone();
        let subscription = signal.subscribe(move |intersection: &Intersection| {
            listener.borrow_mut().observe(intersection);
        });
        MountedSequencer {
            inner,
            _subscription: subscription,
        }
    }
}

/// A sequencer attached to an intersection signal
#[derive(Debug)]
pub struct MountedSequencer {
    inner: Rc<RefCell<RevealSequencer>>,
    _subscription: Subscription,
}

impl MountedSequencer {
    pub fn register(&self, id: ElementId, config: RevealConfig) {
        self.inner.borrow_mut().register(id, config);
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.inner.borrow().is_revealed(id)
    }

    /// Run `f` against the sequencer state, e.g. to read statuses while drawing
    pub fn with<R>(&self, f: impl FnOnce(&RevealSequencer) -> R) -> R {
        f(&self.inner.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn seen(element: u32, visible: bool, at: Instant) -> Intersection {
        Intersection {
            element: ElementId(element),
            visible,
            at,
        }
    }

    #[test]
    fn test_stagger_is_index_times_step() {
        let step = Duration::from_millis(100);
        for i in 0..20 {
            assert_eq!(stagger(i, step), step * i as u32);
        }
    }

    #[test]
    fn test_stagger_is_non_decreasing() {
        let step = Duration::from_millis(50);
        let delays: Vec<Duration> = (0..10).map(|i| stagger(i, step)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_nested_stagger() {
        let delay = nested_stagger(
            2,
            Duration::from_millis(100),
            3,
            Duration::from_millis(50),
        );
        assert_eq!(delay, Duration::from_millis(350));
    }

    #[test]
    fn test_once_latch_never_resets() {
        let config = RevealConfig::fade();
        let mut latch = RevealLatch::default();
        let base = Instant::now();

        assert!(latch.observe(&config, true, base));
        let pattern = [false, true, false, false, true, false];
        for (i, visible) in pattern.into_iter().enumerate() {
            latch.observe(&config, visible, at(base, i as u64 + 1));
            assert_eq!(latch.revealed_at(), Some(base));
        }
    }

    #[test]
    fn test_hidden_until_in_view() {
        let config = RevealConfig::slide_x(-6);
        let mut latch = RevealLatch::default();
        let base = Instant::now();

        assert!(!latch.observe(&config, false, base));
        assert!(!latch.is_revealed());
        assert!(latch.observe(&config, true, at(base, 10)));
        assert_eq!(latch.revealed_at(), Some(at(base, 10)));
    }

    #[test]
    fn test_repeating_latch_toggles() {
        let config = RevealConfig::fade().repeating();
        let mut latch = RevealLatch::default();
        let base = Instant::now();

        assert!(latch.observe(&config, true, base));
        assert!(latch.observe(&config, false, at(base, 5)));
        assert!(!latch.is_revealed());
        assert!(latch.observe(&config, true, at(base, 9)));
        assert_eq!(latch.revealed_at(), Some(at(base, 9)));
    }

    #[test]
    fn test_mount_trigger_ignores_viewport() {
        let config = RevealConfig::slide_y(-2).on_mount();
        let mut latch = RevealLatch::default();
        assert!(latch.observe(&config, false, Instant::now()));
        assert!(latch.is_revealed());
    }

    #[test]
    fn test_element_visible_at_mount_still_transitions() {
        let mut sequencer = RevealSequencer::new();
        let config = RevealConfig::slide_y(2);
        sequencer.register(ElementId(1), config.clone());
        let base = Instant::now();

        sequencer.observe(&seen(1, true, base));

        let status = sequencer.status(ElementId(1)).unwrap();
        // The latch records when the transition starts; it does not jump to the end state.
        assert_eq!(status.latch.revealed_at(), Some(base));
        assert_ne!(status.config.initial, status.config.visible);
    }

    #[test]
    fn test_reregister_keeps_latch() {
        let mut sequencer = RevealSequencer::new();
        let base = Instant::now();
        sequencer.register(ElementId(4), RevealConfig::fade());
        sequencer.observe(&seen(4, true, base));

        sequencer.register(
            ElementId(4),
            RevealConfig::fade().with_delay(Duration::from_millis(300)),
        );

        let status = sequencer.status(ElementId(4)).unwrap();
        assert!(status.latch.is_revealed());
        assert_eq!(status.config.delay, Duration::from_millis(300));
        assert_eq!(sequencer.len(), 1);
    }

    #[test]
    fn test_unknown_element_is_ignored() {
        let mut sequencer = RevealSequencer::new();
        assert!(!sequencer.observe(&seen(99, true, Instant::now())));
        assert!(!sequencer.is_revealed(ElementId(99)));
        assert!(sequencer.is_empty());
    }

    #[test]
    fn test_mounted_sequencer_receives_signals() {
        let signal = Signal::new();
        let mounted = RevealSequencer::new().mount(&signal);
        mounted.register(ElementId(0), RevealConfig::fade());
        mounted.register(ElementId(1), RevealConfig::fade());

        signal.emit(seen(1, true, Instant::now()));

        assert!(!mounted.is_revealed(ElementId(0)));
        assert!(mounted.is_revealed(ElementId(1)));
        assert_eq!(mounted.with(|s| s.len()), 2);

        drop(mounted);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_sections_are_independent() {
        let mut sequencer = RevealSequencer::new();
        let base = Instant::now();
        sequencer.register(ElementId(10), RevealConfig::fade());
        sequencer.register(ElementId(20), RevealConfig::fade());

        sequencer.observe(&seen(20, true, base));
        sequencer.observe(&seen(10, true, at(base, 900)));

        assert_eq!(
            sequencer.status(ElementId(20)).unwrap().latch.revealed_at(),
            Some(base)
        );
        assert_eq!(
            sequencer.status(ElementId(10)).unwrap().latch.revealed_at(),
            Some(at(base, 900))
        );
    }
}
