//! Clock and interpolation helpers
//!
//! Every function takes the frame's clock reading explicitly, so all
//! transitions drawn in one frame agree on the same instant.

use std::time::{Duration, Instant};

/// Linear progress of a transition at `now`, in `[0, 1]`
///
/// A transition whose start lies in the future (a staggered reveal still
/// waiting on its delay) has not begun.
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    let Some(elapsed) = now.checked_duration_since(start) else {
        return 0.0;
    };
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

pub fn is_complete_at(start: Instant, duration: Duration, now: Instant) -> bool {
    now.checked_duration_since(start)
        .is_some_and(|elapsed| elapsed >= duration)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Scroll offsets
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(f64::from(from), f64::from(to), t).round() as u16
}

/// Cell offsets, which may be negative
pub fn lerp_i16(from: i16, to: i16, t: f64) -> i16 {
    lerp(f64::from(from), f64::from(to), t).round() as i16
}

/// Opacity and fill fractions
pub fn lerp_f32(from: f32, to: f32, t: f64) -> f32 {
    lerp(f64::from(from), f64::from(to), t) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_rounds_to_cells() {
        assert_eq!(lerp_u16(10, 20, 0.44), 14);
        assert_eq!(lerp_u16(10, 20, 0.46), 15);
        assert_eq!(lerp_u16(30, 0, 1.0), 0);
        assert_eq!(lerp_i16(-6, 0, 0.5), -3);
        assert_eq!(lerp_i16(0, -2, 1.0), -2);
    }

    #[test]
    fn test_lerp_fractions() {
        assert!((lerp_f32(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
        assert!((lerp_f32(1.0, 0.3, 1.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_progress_over_time() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress_at(start, duration, start), 0.0);
        let quarter = progress_at(start, duration, start + Duration::from_millis(50));
        assert!((quarter - 0.25).abs() < 1e-3);
        assert_eq!(progress_at(start, duration, start + Duration::from_secs(1)), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_at_start() {
        let start = Instant::now();
        assert_eq!(progress_at(start, Duration::ZERO, start), 1.0);
        assert!(is_complete_at(start, Duration::ZERO, start));
    }

    #[test]
    fn test_delayed_start_has_not_begun() {
        let now = Instant::now();
        let start = now + Duration::from_millis(100);
        assert_eq!(progress_at(start, Duration::ZERO, now), 0.0);
        assert!(!is_complete_at(start, Duration::ZERO, now));
        let halfway = start + Duration::from_millis(5);
        assert!(!is_complete_at(start, Duration::from_millis(10), halfway));
    }
}
