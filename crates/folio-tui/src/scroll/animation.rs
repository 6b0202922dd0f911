//! Scroll animation controller
//!
//! Turns discrete scroll requests (keys, wheel, anchor jumps) into a
//! per-frame offset. The offset it returns each frame is the page's scroll
//! signal.

use std::time::{Duration, Instant};

use folio_core::ScrollConfig;

use super::easing::{Ease, EasingType};
use super::timing::{is_complete_at, lerp_u16, progress_at};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Page scroll animator
///
/// Request movement with `scroll_by` / `scroll_to`, then call `update` once
/// per frame to get the interpolated offset.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
    /// Deltas requested since the last frame, applied together
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// True while an animation runs or a delta waits for the next frame
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final offset once the running animation settles
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to an absolute offset (anchor jumps)
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if self.smooth_duration().is_none() {
            self.set_scroll(target);
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.animation = Some(self.animation_to(target, Instant::now()));
    }

    /// Move by a relative amount (positive = down)
    ///
    /// Requests within one frame are batched into a single animation.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if self.smooth_duration().is_none() {
            self.set_scroll(clamp_offset(self.current_scroll as i32 + delta, max_scroll));
            return;
        }
        self.pending_delta += delta;
    }

    /// One line step; smooth mode steps a single row for fine control
    pub fn step(&mut self, down: bool, max_scroll: u16) {
        let lines = if self.smooth_duration().is_some() {
            1
        } else {
            self.config.scroll_lines.max(1) as i32
        };
        self.scroll_by(if down { lines } else { -lines }, max_scroll);
    }

    /// Scroll by a fraction of the viewport (0.5 = half page)
    pub fn scroll_pages(&mut self, pages: f32, viewport_height: u16, max_scroll: u16) {
        let rows = (viewport_height as f32 * pages.abs()).round().max(1.0) as i32;
        self.scroll_by(if pages < 0.0 { -rows } else { rows }, max_scroll);
    }

    /// Scroll the minimum distance that brings rows `[top, top + height)` into view
    pub fn scroll_into_view(
        &mut self,
        top: u16,
        height: u16,
        viewport_height: u16,
        max_scroll: u16,
    ) {
        let target = self.target_scroll();
        let bottom = top.saturating_add(height);
        let next = if top < target {
            top
        } else if bottom > target.saturating_add(viewport_height) {
            bottom.saturating_sub(viewport_height).min(top)
        } else {
            return;
        };
        self.scroll_to(next, max_scroll);
    }

    /// Advance to `now` and return the current offset
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let wanted = self.target_scroll() as i32 + self.pending_delta;
            let new_target = clamp_offset(wanted, max_scroll);
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(self.animation_to(new_target, now));
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete_at(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.ease(progress_at(anim.start, anim.duration, now));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        }

        // The page can shrink under the offset after a resize
        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }

    /// Duration of a scroll transition; `None` when scrolling is instant
    fn smooth_duration(&self) -> Option<Duration> {
        (self.config.smooth_enabled && self.config.animation_duration_ms > 0)
            .then(|| Duration::from_millis(self.config.animation_duration_ms))
    }

    fn animation_to(&self, target: u16, start: Instant) -> ActiveAnimation {
        ActiveAnimation {
            start,
            from: self.current_scroll,
            to: target,
            duration: self.smooth_duration().unwrap_or_default(),
            easing: self.config.easing,
        }
    }
}

fn clamp_offset(offset: i32, max_scroll: u16) -> u16 {
    offset.clamp(0, max_scroll as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(100, 200);
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_disabled_steps_use_scroll_lines() {
        let config = ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);
        animator.step(true, 100);
        animator.step(true, 100);
        animator.step(false, 100);
        assert_eq!(animator.current_scroll(), 3);
    }

    #[test]
    fn test_animation_starts() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_to(100, 200);
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth(100));

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        assert!(animator.needs_update());

        animator.update(200, Instant::now());
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_animation_completes() {
        let mut animator = ScrollAnimator::new(smooth(100));
        let start = Instant::now();
        animator.scroll_by(40, 200);
        animator.update(200, start);

        let done = animator.update(200, start + Duration::from_millis(150));
        assert_eq!(done, 40);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(50);
        animator.scroll_to(300, 100);
        animator.update(100, Instant::now());
        assert!(animator.target_scroll() <= 100);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut animator = ScrollAnimator::new(smooth(0));
        animator.scroll_to(40, 100);
        assert_eq!(animator.current_scroll(), 40);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_negative_delta_clamps_at_zero() {
        let mut animator = ScrollAnimator::new(smooth(0));
        animator.scroll_by(-10, 100);
        assert_eq!(animator.current_scroll(), 0);
    }

    #[test]
    fn test_shrinking_page_clamps_offset() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(80);
        assert_eq!(animator.update(30, Instant::now()), 30);
    }

    #[test]
    fn test_scroll_into_view() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        // Below the viewport: align bottom edge
        animator.scroll_into_view(40, 4, 20, 500);
        assert_eq!(animator.current_scroll(), 24);

        // Already visible: untouched
        animator.scroll_into_view(30, 2, 20, 500);
        assert_eq!(animator.current_scroll(), 24);

        // Above the viewport: align top edge
        animator.scroll_into_view(5, 2, 20, 500);
        assert_eq!(animator.current_scroll(), 5);
    }

    #[test]
    fn test_scroll_pages() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);
        animator.scroll_pages(0.5, 30, 500);
        assert_eq!(animator.current_scroll(), 15);
        animator.scroll_pages(-1.0, 30, 500);
        assert_eq!(animator.current_scroll(), 0);
    }
}
