//! Easing curves for scroll and reveal transitions

pub use folio_core::EasingType;

/// Maps linear progress in `[0, 1]` onto an eased progress in `[0, 1]`
pub trait Ease {
    fn ease(self, t: f64) -> f64;
}

impl Ease for EasingType {
    fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            // Holds the start value, then snaps on the last frame
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - inv.powi(3),
            EasingType::Quintic => 1.0 - inv.powi(5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2f64.powf(-10.0 * t),
            EasingType::EaseInOut if t < 0.5 => 4.0 * t.powi(3),
            EasingType::EaseInOut => 1.0 - (2.0 * inv).powi(3) / 2.0,
        }
    }
}
