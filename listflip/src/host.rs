use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{Size, VisualState};

/// A one-shot completion signal.
///
/// Everything here runs on one UI thread, so completions are not `Send`.
pub type Completion = Box<dyn FnOnce()>;

/// Position of an item inside a list (section + row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub section: usize,
    pub row: usize,
}

impl ItemPosition {
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// A row in section 0.
    pub const fn row(row: usize) -> Self {
        Self { section: 0, row }
    }
}

/// The list widget the transitions run against.
///
/// Implementations expose what is on screen *right now*; nothing is cached between batches.
pub trait ListView {
    /// A display handle the animator can drive (a row view, or the container itself).
    type Handle: Clone;

    /// Currently visible positions, in display order.
    fn visible_positions(&self) -> Vec<ItemPosition>;

    /// The display handle for a visible position, or `None` if nothing is displayed there.
    fn item_handle(&self, position: ItemPosition) -> Option<Self::Handle>;

    fn item_size(&self, handle: &Self::Handle) -> Size;

    fn container_handle(&self) -> Self::Handle;

    fn container_size(&self) -> Size;

    fn reload_data(&mut self);

    /// Opens an update bracket. Paired with [`ListView::end_updates`].
    fn begin_updates(&mut self) {}

    fn end_updates(&mut self) {}
}

/// How progress moves from the start state to the end state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingCurve {
    /// A damped spring; see [`AnimationTiming::damping_ratio`].
    #[default]
    Spring,
    /// Slow start and end, no overshoot.
    EaseInOut,
    Linear,
}

/// Timing parameters for one issued animation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationTiming {
    pub duration_secs: f32,
    pub delay_secs: f32,
    pub curve: TimingCurve,
    /// Spring damping ratio. `1.0` settles without overshoot; lower values bounce.
    ///
    /// Only meaningful for [`TimingCurve::Spring`].
    pub damping_ratio: f32,
    pub initial_velocity: f32,
}

/// The host's single-view animation primitive.
pub trait Animator {
    type Target;

    /// Applies `state` immediately, without animating.
    fn set_immediate_state(&mut self, target: &Self::Target, state: VisualState);

    /// Animates `target` from its current state to `to`.
    ///
    /// Contract: `on_done` is invoked exactly once, on the same thread, after the transition
    /// finishes (never synchronously from inside this call).
    fn animate(
        &mut self,
        target: &Self::Target,
        to: VisualState,
        timing: AnimationTiming,
        on_done: Completion,
    );

    fn animations_enabled(&self) -> bool;

    fn set_animations_enabled(&mut self, enabled: bool);
}
