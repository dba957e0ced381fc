/// A 2D affine transform.
///
/// The matrix is laid out the way UI toolkits usually expose layer transforms:
///
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | tx ty 1 |
/// ```
///
/// A point `(x, y)` maps to `(a*x + c*y + tx, b*x + d*y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn translation(x: f32, y: f32) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::IDENTITY
        }
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `radians` (counter-clockwise in a y-up space).
    #[cfg(feature = "std")]
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.tx * other.a + self.ty * other.c + other.tx,
            ty: self.tx * other.b + self.ty * other.d + other.ty,
        }
    }

    pub fn apply_to_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Component-wise interpolation.
    ///
    /// Not a decomposed (rotation-aware) interpolation; good enough for hosts that only need an
    /// approximate in-between state.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            a: mix(from.a, to.a),
            b: mix(from.b, to.b),
            c: mix(from.c, to.c),
            d: mix(from.d, to.d),
            tx: mix(from.tx, to.tx),
            ty: mix(from.ty, to.ty),
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Width/height of a display item or of the list container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The animatable visual property a transition drives.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualState {
    Transform(AffineTransform),
    Opacity(f32),
}

impl VisualState {
    pub const IDENTITY: Self = Self::Transform(AffineTransform::IDENTITY);
    pub const OPAQUE: Self = Self::Opacity(1.0);
    pub const TRANSPARENT: Self = Self::Opacity(0.0);

    /// Interpolates between two states of the same property.
    ///
    /// Mismatched properties snap to `to` once `t` reaches 1.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        match (from, to) {
            (Self::Transform(a), Self::Transform(b)) => {
                Self::Transform(AffineTransform::lerp(a, b, t))
            }
            (Self::Opacity(a), Self::Opacity(b)) => Self::Opacity(a + (b - a) * t),
            _ if t >= 1.0 => *to,
            _ => *from,
        }
    }
}
