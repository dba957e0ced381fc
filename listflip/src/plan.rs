use alloc::vec::Vec;

use crate::{
    AffineTransform, AnimationDescriptor, AnimationKind, AnimationTiming, Edge, FlipOptions, Size,
    VisualState,
};

/// One item's part of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedAnimation<H> {
    pub target: H,
    pub from: VisualState,
    pub to: VisualState,
    pub timing: AnimationTiming,
}

/// The per-item animations of one batch, in target order.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlan<H> {
    steps: Vec<PlannedAnimation<H>>,
}

impl<H> AnimationPlan<H> {
    /// Computes start state and delay for each `(handle, size)` target.
    ///
    /// `size` is the extent used for edge slides: the row's own size for cell scope, the
    /// container's size for table scope.
    pub fn build(
        descriptor: &AnimationDescriptor,
        targets: Vec<(H, Size)>,
        options: &FlipOptions,
    ) -> Self {
        let n = targets.len();
        let duration = descriptor.duration().as_secs();
        let staggered = descriptor.is_staggered();
        let curve = descriptor.curve();
        let damping_ratio = options.damping_for(staggered);

        let steps = targets
            .into_iter()
            .enumerate()
            .map(|(i, (target, size))| {
                let (from, to) = endpoints(descriptor.kind(), size);
                PlannedAnimation {
                    target,
                    from,
                    to,
                    timing: AnimationTiming {
                        duration_secs: duration,
                        delay_secs: if staggered {
                            stagger_delay(duration, i, n)
                        } else {
                            0.0
                        },
                        curve,
                        damping_ratio,
                        initial_velocity: options.initial_velocity,
                    },
                }
            })
            .collect();

        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PlannedAnimation<H>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<PlannedAnimation<H>> {
        self.steps
    }

    /// Wall-clock span of the whole batch: the latest `delay + duration`.
    pub fn total_secs(&self) -> f32 {
        self.steps
            .iter()
            .map(|s| s.timing.delay_secs + s.timing.duration_secs)
            .fold(0.0, f32::max)
    }
}

/// Linear fan-out: item `i` of `n` starts `duration * i / n` seconds in, so the starts of the
/// whole batch cover `[0, duration)` regardless of `n`.
pub fn stagger_delay(duration_secs: f32, index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    duration_secs * index as f32 / count as f32
}

/// Start offset for an edge slide of an item with the given size.
pub fn edge_offset(edge: Edge, size: Size) -> AffineTransform {
    match edge {
        Edge::Left => AffineTransform::translation(-size.width, 0.0),
        Edge::Right => AffineTransform::translation(size.width, 0.0),
        Edge::Top => AffineTransform::translation(0.0, -size.height),
        Edge::Bottom => AffineTransform::translation(0.0, size.height),
    }
}

fn endpoints(kind: &AnimationKind, size: Size) -> (VisualState, VisualState) {
    match *kind {
        AnimationKind::EdgeSlide { edge, .. } => (
            VisualState::Transform(edge_offset(edge, size)),
            VisualState::IDENTITY,
        ),
        AnimationKind::Fade { .. } => (VisualState::TRANSPARENT, VisualState::OPAQUE),
        AnimationKind::CustomTransform { transform, .. } => {
            (VisualState::Transform(transform), VisualState::IDENTITY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellAnimation, TableAnimation, TimingCurve};
    use alloc::vec;

    #[test]
    fn edge_offsets_follow_edge_sign() {
        let size = Size::new(320.0, 64.0);
        assert_eq!(edge_offset(Edge::Left, size).tx, -320.0);
        assert_eq!(edge_offset(Edge::Right, size).tx, 320.0);
        assert_eq!(edge_offset(Edge::Top, size).ty, -64.0);
        assert_eq!(edge_offset(Edge::Bottom, size).ty, 64.0);
        assert_eq!(edge_offset(Edge::Left, size).ty, 0.0);
        assert_eq!(edge_offset(Edge::Top, size).tx, 0.0);
    }

    #[test]
    fn consecutive_fade_plan() {
        let d: AnimationDescriptor = CellAnimation::fade(0.5).unwrap().into();
        let targets = (0..4).map(|i| (i, Size::new(320.0, 64.0))).collect();
        let plan = AnimationPlan::build(&d, targets, &FlipOptions::default());

        let delays: Vec<f32> = plan.steps().iter().map(|s| s.timing.delay_secs).collect();
        assert_eq!(delays, vec![0.0, 0.125, 0.25, 0.375]);
        for step in plan.steps() {
            assert_eq!(step.from, VisualState::Opacity(0.0));
            assert_eq!(step.to, VisualState::Opacity(1.0));
            assert_eq!(step.timing.curve, TimingCurve::EaseInOut);
            assert_eq!(step.timing.damping_ratio, 0.55);
            assert_eq!(step.timing.initial_velocity, 0.0);
        }
        assert_eq!(plan.total_secs(), 0.875);
    }

    #[test]
    fn table_top_plan() {
        let d: AnimationDescriptor = TableAnimation::top(0.8).unwrap().into();
        let targets = vec![("table", Size::new(375.0, 667.0))];
        let plan = AnimationPlan::build(&d, targets, &FlipOptions::default());

        assert_eq!(plan.len(), 1);
        let step = &plan.steps()[0];
        assert_eq!(
            step.from,
            VisualState::Transform(AffineTransform::translation(0.0, -667.0))
        );
        assert_eq!(step.to, VisualState::IDENTITY);
        assert_eq!(step.timing.delay_secs, 0.0);
        assert_eq!(step.timing.duration_secs, 0.8);
        assert_eq!(step.timing.curve, TimingCurve::Spring);
        assert_eq!(step.timing.damping_ratio, 0.75);
    }

    #[test]
    fn simultaneous_custom_transform_uses_standard_damping() {
        let flip = AffineTransform::scale(-1.0, -1.0);
        let d: AnimationDescriptor = CellAnimation::Custom {
            duration: crate::AnimationDuration::from_secs(0.6).unwrap(),
            transform: flip,
            staggered: false,
        }
        .into();
        let targets = (0..3).map(|i| (i, Size::new(100.0, 40.0))).collect();
        let plan = AnimationPlan::build(&d, targets, &FlipOptions::default());

        for step in plan.steps() {
            assert_eq!(step.from, VisualState::Transform(flip));
            assert_eq!(step.to, VisualState::IDENTITY);
            assert_eq!(step.timing.delay_secs, 0.0);
            assert_eq!(step.timing.damping_ratio, 0.75);
        }
    }

    #[test]
    fn curve_override_reaches_every_step() {
        let d = AnimationDescriptor::from(CellAnimation::left(0.4).unwrap())
            .with_curve(TimingCurve::Linear);
        let targets = (0..3).map(|i| (i, Size::new(100.0, 40.0))).collect();
        let plan = AnimationPlan::build(&d, targets, &FlipOptions::default());

        assert_eq!(plan.len(), 3);
        for step in plan.steps() {
            assert_eq!(step.timing.curve, TimingCurve::Linear);
        }
    }

    #[test]
    fn damping_comes_from_options() {
        let d: AnimationDescriptor = CellAnimation::left(0.4).unwrap().into();
        let options = FlipOptions::default().with_staggered_damping(0.3);
        let plan = AnimationPlan::build(&d, vec![(0u8, Size::new(10.0, 10.0))], &options);
        assert_eq!(plan.steps()[0].timing.damping_ratio, 0.3);
    }
}
