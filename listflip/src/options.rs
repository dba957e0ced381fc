/// What [`crate::Flipper::run`] does when a previous batch has not finished yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusyPolicy {
    /// Return [`crate::FlipError::Busy`] without touching the list. The rejected batch's
    /// completion callback is dropped and never called.
    #[default]
    Reject,
    /// Start the new batch anyway. Overlapping batches fight over the same views; the result is
    /// whatever the host animator does with competing animations.
    Allow,
}

/// Configuration for [`crate::Flipper`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipOptions {
    /// Spring damping for batches whose items all start together.
    pub standard_damping: f32,
    /// Spring damping for staggered / consecutive batches.
    pub staggered_damping: f32,
    pub initial_velocity: f32,
    pub busy_policy: BusyPolicy,
}

impl FlipOptions {
    pub const STANDARD_DAMPING: f32 = 0.75;
    pub const STAGGERED_DAMPING: f32 = 0.55;

    pub fn with_standard_damping(mut self, damping: f32) -> Self {
        self.standard_damping = damping;
        self
    }

    pub fn with_staggered_damping(mut self, damping: f32) -> Self {
        self.staggered_damping = damping;
        self
    }

    pub fn with_initial_velocity(mut self, velocity: f32) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn with_busy_policy(mut self, policy: BusyPolicy) -> Self {
        self.busy_policy = policy;
        self
    }

    pub(crate) fn damping_for(&self, staggered: bool) -> f32 {
        if staggered {
            self.staggered_damping
        } else {
            self.standard_damping
        }
    }
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self {
            standard_damping: Self::STANDARD_DAMPING,
            staggered_damping: Self::STAGGERED_DAMPING,
            initial_velocity: 0.0,
            busy_policy: BusyPolicy::Reject,
        }
    }
}
