//! Page scrolling
//!
//! Key and wheel input only ever request movement from the [`ScrollAnimator`];
//! the offset it settles on each frame is what the app emits on the scroll
//! signal. The easing and timing helpers are shared with reveal transitions.

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::ScrollAnimator;
pub use easing::{Ease, EasingType};
