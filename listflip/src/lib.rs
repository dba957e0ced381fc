//! Headless batch transitions for the visible rows of a list view.
//!
//! A caller describes a transition once (slide in from an edge, fade in, or start from an
//! arbitrary affine transform) and [`Flipper`] turns it into one animation per visible row,
//! optionally staggered so the rows start one after another. All per-row completions collapse
//! into a single callback.
//!
//! The crate holds no UI objects. A UI layer provides:
//! - a [`ListView`]: which rows are visible, their display handles and sizes
//! - an [`Animator`]: the single-view "animate to this state" primitive
//!
//! For a frame-driven reference animator and a simulated list, see the `listflip-adapter` crate.
//!
//! Everything runs on one UI thread; completions are plain `FnOnce` boxes, not `Send`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod descriptor;
mod error;
mod flipper;
mod host;
mod latch;
mod options;
mod plan;
mod target;
mod transform;


pub use descriptor::{
    AnimationDescriptor, AnimationDuration, AnimationKind, CellAnimation, Edge, Scope,
    TableAnimation,
};
pub use error::{DescriptorError, FlipError};
pub use flipper::{AnimationsSuspended, Flipper};
pub use host::{AnimationTiming, Animator, Completion, ItemPosition, ListView, TimingCurve};
pub use latch::CompletionLatch;
pub use options::{BusyPolicy, FlipOptions};
pub use plan::{AnimationPlan, PlannedAnimation, edge_offset, stagger_delay};
pub use target::resolve_targets;
pub use transform::{AffineTransform, Size, VisualState};
