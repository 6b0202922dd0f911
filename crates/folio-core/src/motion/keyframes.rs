use std::time::Duration;

use crate::config::EasingType;

/// How often a keyframe sequence plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Infinite,
}

/// A sequence of values spread evenly over `duration`
///
/// Used for ambient motion that is not gated on the viewport, such as the
/// hero name's color sweep and the scroll indicator's bounce. Sampling is
/// left to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    pub values: Vec<f32>,
    pub duration: Duration,
    pub repeat: Repeat,
    pub easing: EasingType,
}

impl Keyframes {
    pub fn new(values: impl Into<Vec<f32>>, duration: Duration) -> Self {
        Self {
            values: values.into(),
            duration,
            repeat: Repeat::Once,
            easing: EasingType::Linear,
        }
    }

    pub fn looping(mut self) -> Self {
        self.repeat = Repeat::Infinite;
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    /// Number of segments between consecutive values
    pub fn segments(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}
