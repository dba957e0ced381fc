use listflip::VisualState;

use crate::Easing;

/// One visual property moving from `from` to `to` on a millisecond clock.
///
/// The tween holds `from` until `start_ms + delay_ms`, then eases towards `to` over
/// `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: VisualState,
    pub to: VisualState,
    pub start_ms: u64,
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(
        from: VisualState,
        to: VisualState,
        start_ms: u64,
        delay_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            start_ms,
            delay_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Clock time at which the tween reaches `to`.
    pub fn end_ms(&self) -> u64 {
        self.start_ms
            .saturating_add(self.delay_ms)
            .saturating_add(self.duration_ms)
    }

    pub fn has_started(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.delay_ms
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms
            .saturating_sub(self.start_ms)
            .saturating_sub(self.delay_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> VisualState {
        let eased = self.easing.sample(self.progress(now_ms));
        VisualState::lerp(&self.from, &self.to, eased)
    }
}

/// Seconds to whole milliseconds, rounded.
pub(crate) fn secs_to_ms(secs: f32) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}
