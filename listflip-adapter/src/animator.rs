use core::fmt;
use core::hash::Hash;
use core::mem;
use std::collections::HashMap;

use listflip::{AffineTransform, AnimationTiming, Animator, Completion, VisualState};

use crate::tween::secs_to_ms;
use crate::{Easing, Tween};

/// The visual state of one view as last written by a [`FrameAnimator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub transform: AffineTransform,
    pub opacity: f32,
}

impl Appearance {
    fn get(&self, like: &VisualState) -> VisualState {
        match like {
            VisualState::Transform(_) => VisualState::Transform(self.transform),
            VisualState::Opacity(_) => VisualState::Opacity(self.opacity),
        }
    }

    fn set(&mut self, state: VisualState) {
        match state {
            VisualState::Transform(t) => self.transform = t,
            VisualState::Opacity(o) => self.opacity = o,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            transform: AffineTransform::IDENTITY,
            opacity: 1.0,
        }
    }
}

struct Track<T> {
    target: T,
    tween: Tween,
    on_done: Completion,
}

/// A tick-driven implementation of [`listflip::Animator`].
///
/// This type does not render anything. Adapters drive it by calling `tick(now_ms)` each
/// frame/timer tick and then read [`FrameAnimator::appearance`] for every view they draw.
///
/// Completions only ever run inside `tick`, after the animator has finished updating itself.
pub struct FrameAnimator<T> {
    now_ms: u64,
    enabled: bool,
    appearances: HashMap<T, Appearance>,
    tracks: Vec<Track<T>>,
    /// Completions of animations applied while animations were disabled.
    ready: Vec<Completion>,
}

impl<T: Clone + Eq + Hash> FrameAnimator<T> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            enabled: true,
            appearances: HashMap::new(),
            tracks: Vec::new(),
            ready: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_animating(&self) -> bool {
        !self.tracks.is_empty() || !self.ready.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    /// Clock time at which the last active animation ends, if any.
    pub fn settles_at(&self) -> Option<u64> {
        self.tracks.iter().map(|t| t.tween.end_ms()).max()
    }

    pub fn appearance(&self, target: &T) -> Appearance {
        self.appearances.get(target).copied().unwrap_or_default()
    }

    /// Views with a non-default appearance.
    pub fn tracked_count(&self) -> usize {
        self.appearances.len()
    }

    /// Advances the clock, writes the sampled state of every track, and fires the completions
    /// of the tracks that finished.
    ///
    /// The clock never runs backwards; an older `now_ms` is treated as the current time.
    /// Returns the number of completions fired.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut done = mem::take(&mut self.ready);
        for track in mem::take(&mut self.tracks) {
            let state = track.tween.sample(now);
            self.apply(&track.target, state);
            if track.tween.is_done(now) {
                done.push(track.on_done);
            } else {
                self.tracks.push(track);
            }
        }

        let fired = done.len();
        if fired > 0 {
            atrace!(now_ms = now, fired, active = self.tracks.len(), "FrameAnimator::tick");
        }
        for on_done in done {
            on_done();
        }
        fired
    }

    /// Writes `state`, forgetting the view once it is back at rest.
    fn apply(&mut self, target: &T, state: VisualState) {
        let appearance = self.appearances.entry(target.clone()).or_default();
        appearance.set(state);
        if *appearance == Appearance::default() {
            self.appearances.remove(target);
        }
    }
}

impl<T: Clone + Eq + Hash> Default for FrameAnimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> Animator for FrameAnimator<T> {
    type Target = T;

    fn set_immediate_state(&mut self, target: &T, state: VisualState) {
        self.apply(target, state);
    }

    fn animate(&mut self, target: &T, to: VisualState, timing: AnimationTiming, on_done: Completion) {
        if !self.enabled {
            self.apply(target, to);
            self.ready.push(on_done);
            return;
        }

        let from = self.appearance(target).get(&to);
        let tween = Tween::new(
            from,
            to,
            self.now_ms,
            secs_to_ms(timing.delay_secs),
            secs_to_ms(timing.duration_secs),
            Easing::for_timing(&timing),
        );
        adebug!(
            start_ms = tween.start_ms,
            delay_ms = tween.delay_ms,
            duration_ms = tween.duration_ms,
            easing = ?tween.easing,
            "FrameAnimator::animate"
        );
        self.tracks.push(Track {
            target: target.clone(),
            tween,
            on_done,
        });
    }

    fn animations_enabled(&self) -> bool {
        self.enabled
    }

    fn set_animations_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl<T: fmt::Debug> fmt::Debug for FrameAnimator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameAnimator")
            .field("now_ms", &self.now_ms)
            .field("enabled", &self.enabled)
            .field("appearances", &self.appearances)
            .field("active", &self.tracks.len())
            .field("ready", &self.ready.len())
            .finish()
    }
}
