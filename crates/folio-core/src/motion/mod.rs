//! Animation parameters
//!
//! Plain configuration consumed by the renderer: what an element looks like
//! before and after its reveal, when the reveal starts, and looping keyframes
//! for ambient motion. Interpolation and easing live in the renderer.

pub mod keyframes;
pub mod reveal;
pub mod visual;

pub use keyframes::{Keyframes, Repeat};
pub use reveal::{
    nested_stagger, stagger, ElementId, Intersection, MountedSequencer, RevealConfig, RevealLatch,
    RevealSequencer, RevealStatus, Trigger,
};
pub use visual::VisualState;
