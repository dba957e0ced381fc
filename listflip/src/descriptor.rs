use crate::{AffineTransform, DescriptorError, TimingCurve};

/// An animation length in seconds. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f32", into = "f32"))]
pub struct AnimationDuration(f32);

impl AnimationDuration {
    pub fn from_secs(secs: f32) -> Result<Self, DescriptorError> {
        if secs.is_finite() && secs > 0.0 {
            Ok(Self(secs))
        } else {
            Err(DescriptorError::InvalidDuration(secs))
        }
    }

    /// Length of the fade run by [`crate::Flipper::reload_with_fade`] when callers have no
    /// preference.
    pub const RELOAD_FADE: Self = Self(0.3);

    pub fn as_secs(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for AnimationDuration {
    type Error = DescriptorError;

    fn try_from(secs: f32) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl From<AnimationDuration> for f32 {
    fn from(d: AnimationDuration) -> Self {
        d.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Whether a descriptor drives the list container as a whole or each visible row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scope {
    Table,
    Cell,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    /// Slide in from `edge` back to the resting position.
    EdgeSlide { edge: Edge, staggered: bool },
    /// Fade in from fully transparent. `consecutive` staggers the rows.
    Fade { consecutive: bool },
    /// Start at `transform` and animate back to identity.
    CustomTransform {
        transform: AffineTransform,
        staggered: bool,
    },
}

/// A validated, immutable description of one batch transition.
///
/// Build one with [`AnimationDescriptor::new`], or convert from the always-valid
/// [`TableAnimation`] / [`CellAnimation`] shorthands.
///
/// Fades ease in and out; slides and custom transforms run on a spring. Use
/// [`AnimationDescriptor::with_curve`] to pick a different curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnimationDescriptor {
    scope: Scope,
    kind: AnimationKind,
    duration: AnimationDuration,
    curve: TimingCurve,
}

impl AnimationDescriptor {
    /// Validates the scope/kind combination.
    ///
    /// Table scope only slides vertically (`Top`/`Bottom`) and never staggers; cell scope only
    /// slides horizontally (`Left`/`Right`).
    pub fn new(
        scope: Scope,
        kind: AnimationKind,
        duration: AnimationDuration,
    ) -> Result<Self, DescriptorError> {
        if let AnimationKind::EdgeSlide { edge, .. } = kind {
            let supported = match scope {
                Scope::Table => matches!(edge, Edge::Top | Edge::Bottom),
                Scope::Cell => matches!(edge, Edge::Left | Edge::Right),
            };
            if !supported {
                return Err(DescriptorError::UnsupportedEdge { scope, edge });
            }
        }
        if scope == Scope::Table && kind_staggers(&kind) {
            return Err(DescriptorError::StaggerInTableScope);
        }
        Ok(Self::assemble(scope, kind, duration))
    }

    fn assemble(scope: Scope, kind: AnimationKind, duration: AnimationDuration) -> Self {
        Self {
            scope,
            kind,
            duration,
            curve: default_curve(&kind),
        }
    }

    pub fn with_curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    pub fn duration(&self) -> AnimationDuration {
        self.duration
    }

    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    /// Whether per-item start times fan out across the batch.
    pub fn is_staggered(&self) -> bool {
        self.scope == Scope::Cell && kind_staggers(&self.kind)
    }
}

fn default_curve(kind: &AnimationKind) -> TimingCurve {
    match kind {
        AnimationKind::Fade { .. } => TimingCurve::EaseInOut,
        AnimationKind::EdgeSlide { .. } | AnimationKind::CustomTransform { .. } => {
            TimingCurve::Spring
        }
    }
}

fn kind_staggers(kind: &AnimationKind) -> bool {
    match *kind {
        AnimationKind::EdgeSlide { staggered, .. } => staggered,
        AnimationKind::Fade { consecutive } => consecutive,
        AnimationKind::CustomTransform { staggered, .. } => staggered,
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AnimationDescriptor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            scope: Scope,
            kind: AnimationKind,
            duration: AnimationDuration,
            #[serde(default)]
            curve: Option<TimingCurve>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let descriptor =
            Self::new(raw.scope, raw.kind, raw.duration).map_err(serde::de::Error::custom)?;
        Ok(match raw.curve {
            Some(curve) => descriptor.with_curve(curve),
            None => descriptor,
        })
    }
}

/// Transitions applied once to the whole list container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableAnimation {
    Top(AnimationDuration),
    Bottom(AnimationDuration),
    Fade(AnimationDuration),
    Custom {
        duration: AnimationDuration,
        transform: AffineTransform,
    },
}

impl TableAnimation {
    pub fn top(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Top(AnimationDuration::from_secs(secs)?))
    }

    pub fn bottom(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Bottom(AnimationDuration::from_secs(secs)?))
    }

    pub fn fade(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Fade(AnimationDuration::from_secs(secs)?))
    }

    pub fn custom(secs: f32, transform: AffineTransform) -> Result<Self, DescriptorError> {
        Ok(Self::Custom {
            duration: AnimationDuration::from_secs(secs)?,
            transform,
        })
    }
}

impl From<TableAnimation> for AnimationDescriptor {
    fn from(animation: TableAnimation) -> Self {
        let (kind, duration) = match animation {
            TableAnimation::Top(d) => (slide(Edge::Top, false), d),
            TableAnimation::Bottom(d) => (slide(Edge::Bottom, false), d),
            TableAnimation::Fade(d) => (AnimationKind::Fade { consecutive: false }, d),
            TableAnimation::Custom {
                duration,
                transform,
            } => (
                AnimationKind::CustomTransform {
                    transform,
                    staggered: false,
                },
                duration,
            ),
        };
        Self::assemble(Scope::Table, kind, duration)
    }
}

/// Transitions applied to each visible row.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellAnimation {
    Left {
        duration: AnimationDuration,
        staggered: bool,
    },
    Right {
        duration: AnimationDuration,
        staggered: bool,
    },
    Fade {
        duration: AnimationDuration,
        consecutive: bool,
    },
    Custom {
        duration: AnimationDuration,
        transform: AffineTransform,
        staggered: bool,
    },
}

impl CellAnimation {
    /// Staggered slide in from the left edge.
    pub fn left(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Left {
            duration: AnimationDuration::from_secs(secs)?,
            staggered: true,
        })
    }

    /// Staggered slide in from the right edge.
    pub fn right(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Right {
            duration: AnimationDuration::from_secs(secs)?,
            staggered: true,
        })
    }

    /// Row-by-row fade in.
    pub fn fade(secs: f32) -> Result<Self, DescriptorError> {
        Ok(Self::Fade {
            duration: AnimationDuration::from_secs(secs)?,
            consecutive: true,
        })
    }

    /// Staggered custom transform.
    pub fn custom(secs: f32, transform: AffineTransform) -> Result<Self, DescriptorError> {
        Ok(Self::Custom {
            duration: AnimationDuration::from_secs(secs)?,
            transform,
            staggered: true,
        })
    }
}

impl From<CellAnimation> for AnimationDescriptor {
    fn from(animation: CellAnimation) -> Self {
        let (kind, duration) = match animation {
            CellAnimation::Left {
                duration,
                staggered,
            } => (slide(Edge::Left, staggered), duration),
            CellAnimation::Right {
                duration,
                staggered,
            } => (slide(Edge::Right, staggered), duration),
            CellAnimation::Fade {
                duration,
                consecutive,
            } => (AnimationKind::Fade { consecutive }, duration),
            CellAnimation::Custom {
                duration,
                transform,
                staggered,
            } => (
                AnimationKind::CustomTransform {
                    transform,
                    staggered,
                },
                duration,
            ),
        };
        Self::assemble(Scope::Cell, kind, duration)
    }
}

fn slide(edge: Edge, staggered: bool) -> AnimationKind {
    AnimationKind::EdgeSlide { edge, staggered }
}
