//! Animation provider
//!
//! The core crate only describes animations. This module turns those
//! descriptions into the visual state of an element at a given instant.

use std::time::Instant;

use folio_core::motion::{Keyframes, Repeat, RevealLatch, RevealStatus, VisualState};

use crate::scroll::easing::Ease;
use crate::scroll::timing::{is_complete_at, lerp_f32, lerp_i16, progress_at};

/// Visual state of an element at `now`
///
/// Elements without a reveal config are always settled. With `animate`
/// off, a revealed element jumps straight to its visible state.
pub fn reveal_visual(status: Option<RevealStatus<'_>>, now: Instant, animate: bool) -> VisualState {
    let Some(status) = status else {
        return VisualState::SETTLED;
    };
    let config = status.config;

    match status.latch {
        RevealLatch::Hidden => config.initial,
        RevealLatch::Revealed { .. } if !animate => config.visible,
        RevealLatch::Revealed { since } => {
            let start = since + config.delay;
            let t = config.easing.ease(progress_at(start, config.duration, now));
            interpolate(&config.initial, &config.visible, t)
        }
    }
}

/// True while a revealed element is still moving toward its visible state
pub fn is_transitioning(status: Option<RevealStatus<'_>>, now: Instant) -> bool {
    match status {
        Some(RevealStatus {
            config,
            latch: RevealLatch::Revealed { since },
        }) => !is_complete_at(since + config.delay, config.duration, now),
        _ => false,
    }
}

pub fn interpolate(from: &VisualState, to: &VisualState, t: f64) -> VisualState {
    VisualState {
        opacity: lerp_f32(from.opacity, to.opacity, t),
        offset_x: lerp_i16(from.offset_x, to.offset_x, t),
        offset_y: lerp_i16(from.offset_y, to.offset_y, t),
        fill: lerp_f32(from.fill, to.fill, t),
    }
}

/// Combine a parent's state with a child's: opacity multiplies, offsets add
pub fn compose(parent: &VisualState, child: &VisualState) -> VisualState {
    VisualState {
        opacity: parent.opacity * child.opacity,
        offset_x: parent.offset_x.saturating_add(child.offset_x),
        offset_y: parent.offset_y.saturating_add(child.offset_y),
        fill: child.fill,
    }
}

/// Value of a keyframe sequence at `now`, counted from `origin`
pub fn sample(frames: &Keyframes, origin: Instant, now: Instant) -> f32 {
    let (first, last) = match (frames.values.first(), frames.values.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    let segments = frames.segments();
    if segments == 0 || frames.duration.is_zero() {
        return first;
    }

    let elapsed = now.saturating_duration_since(origin).as_secs_f64();
    let cycle = frames.duration.as_secs_f64();
    let position = match frames.repeat {
        Repeat::Once if elapsed >= cycle => return last,
        Repeat::Once => elapsed / cycle,
        Repeat::Infinite => (elapsed % cycle) / cycle,
    };

    let scaled = position * segments as f64;
    let index = (scaled.floor() as usize).min(segments - 1);
    let t = frames.easing.ease(scaled - index as f64);
    lerp_f32(frames.values[index], frames.values[index + 1], t)
}
