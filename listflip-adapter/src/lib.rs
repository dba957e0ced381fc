//! Adapter utilities for the `listflip` crate.
//!
//! `listflip` is UI-agnostic: it plans batch transitions and talks to the host through the
//! `ListView` and `Animator` traits. This crate provides small, framework-neutral
//! implementations of both, driven by a millisecond clock:
//!
//! - [`FrameAnimator`]: tweens visual state per view; call `tick(now_ms)` every frame
//! - [`SimulatedList`]: a fixed-row-height list with a scrollable viewport
//! - [`Easing`] / [`Tween`]: the curves and per-property tracks behind the animator
//!
//! They are handy for tests, previews, and as a reference when wiring a real toolkit.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animator;
mod easing;
mod list;
mod tween;


pub use animator::{Appearance, FrameAnimator};
pub use easing::Easing;
pub use list::{SimulatedList, ViewId};
pub use tween::Tween;
