use listflip::{AnimationTiming, TimingCurve};

/// Envelope decay reached at the end of a spring's duration: `e^-SETTLE` (about 0.1%).
const SETTLE: f32 = 6.9;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseInOutCubic,
    /// A damped spring squeezed into the tween's duration.
    ///
    /// `damping_ratio < 1` overshoots and oscillates; `>= 1` approaches without overshoot.
    Spring { damping_ratio: f32 },
}

impl Easing {
    /// The curve a [`listflip::AnimationTiming`] asks for.
    pub fn for_timing(timing: &AnimationTiming) -> Self {
        match timing.curve {
            TimingCurve::Spring => Self::Spring {
                damping_ratio: timing.damping_ratio,
            },
            TimingCurve::EaseInOut => Self::EaseInOutCubic,
            TimingCurve::Linear => Self::Linear,
        }
    }

    /// Maps normalized time `t` in `[0, 1]` to progress. Springs may leave `[0, 1]` mid-flight
    /// but always end at exactly `1.0`.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::Spring { damping_ratio } => {
                if t >= 1.0 {
                    1.0
                } else {
                    spring(t, damping_ratio)
                }
            }
        }
    }
}

/// Step response of a unit damped harmonic oscillator at time `t`, with the natural frequency
/// picked so the envelope has decayed by `SETTLE` at `t = 1`.
fn spring(t: f32, damping_ratio: f32) -> f32 {
    let zeta = if damping_ratio.is_finite() {
        damping_ratio.max(0.05)
    } else {
        1.0
    };

    if zeta < 1.0 {
        // x(t) = 1 - e^(-ζω₀t) * [cos(ωd t) + ζ/√(1-ζ²) sin(ωd t)]
        let omega_0 = SETTLE / zeta;
        let root = (1.0 - zeta * zeta).sqrt();
        let omega_d = omega_0 * root;
        let decay = (-zeta * omega_0 * t).exp();
        1.0 - decay * ((omega_d * t).cos() + (zeta / root) * (omega_d * t).sin())
    } else {
        // Critically damped: x(t) = 1 - e^(-ω₀t) * (1 + ω₀t)
        let omega_0 = SETTLE + 2.3;
        1.0 - (-omega_0 * t).exp() * (1.0 + omega_0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseInOutCubic,
            Easing::Spring { damping_ratio: 0.55 },
            Easing::Spring { damping_ratio: 0.75 },
            Easing::Spring { damping_ratio: 1.0 },
        ] {
            assert!(easing.sample(0.0).abs() < 1e-6, "{easing:?}");
            assert_eq!(easing.sample(1.0), 1.0, "{easing:?}");
            assert_eq!(easing.sample(2.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn lower_damping_overshoots_more() {
        let peak = |damping_ratio| {
            (0..100)
                .map(|i| Easing::Spring { damping_ratio }.sample(i as f32 / 100.0))
                .fold(f32::MIN, f32::max)
        };
        let bouncy = peak(0.55);
        let firm = peak(0.75);
        assert!(bouncy > 1.0);
        assert!(bouncy > firm);
        assert!(peak(1.0) <= 1.0);
    }

    #[test]
    fn timing_curve_picks_the_easing() {
        let mut timing = AnimationTiming {
            duration_secs: 0.3,
            delay_secs: 0.0,
            curve: TimingCurve::Spring,
            damping_ratio: 0.55,
            initial_velocity: 0.0,
        };
        assert_eq!(
            Easing::for_timing(&timing),
            Easing::Spring { damping_ratio: 0.55 }
        );

        timing.curve = TimingCurve::EaseInOut;
        assert_eq!(Easing::for_timing(&timing), Easing::EaseInOutCubic);

        timing.curve = TimingCurve::Linear;
        assert_eq!(Easing::for_timing(&timing), Easing::Linear);
    }

    #[test]
    fn ease_in_out_is_symmetric_and_never_overshoots() {
        let e = Easing::EaseInOutCubic;
        assert_eq!(e.sample(0.5), 0.5);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let v = e.sample(t);
            assert!((0.0..=1.0).contains(&v), "t={t} v={v}");
            assert!((v + e.sample(1.0 - t) - 1.0).abs() < 1e-5, "t={t}");
        }
    }

    #[test]
    fn spring_is_settled_near_the_end() {
        let e = Easing::Spring { damping_ratio: 0.55 };
        assert!((e.sample(0.99) - 1.0).abs() < 0.01);
    }
}
