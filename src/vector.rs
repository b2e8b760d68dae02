use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with `f64` components.
///
/// Arithmetic is componentwise; scalars broadcast over both components.
/// All operators are value-based (`Copy`), the `*Assign` forms mutate in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// A 3D vector with `f64` components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector pointing at `angle` radians with the given magnitude.
    #[inline]
    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    #[inline]
    pub fn components(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn norm_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean norm. Returns exactly `1.0` when the squared norm is within
    /// floating epsilon of one, so unit vectors do not pick up sqrt noise.
    #[inline]
    pub fn norm(&self) -> f64 {
        norm_from_sqr(self.norm_sqr())
    }

    /// Scales to unit length. Vectors that are already unit, or whose norm is
    /// within epsilon of zero, are returned unchanged.
    #[inline]
    pub fn normalize(self) -> Self {
        let sqr = self.norm_sqr();
        if (sqr - 1.0).abs() <= f64::EPSILON || sqr.abs() <= f64::EPSILON {
            return self;
        }
        self / sqr.sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Linear interpolation with `u` clamped to `[0, 1]`.
    pub fn lerp(a: Vec2, b: Vec2, u: f64) -> Vec2 {
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - u;
        Vec2::new(a.x * v + b.x * u, a.y * v + b.y * u)
    }

    /// Per-axis interpolation: `d.x` blends the x components and `d.y` the y
    /// components, each clamped to `[0, 1]` independently.
    pub fn xy_lerp(a: Vec2, b: Vec2, d: Vec2) -> Vec2 {
        let x = d.x.clamp(0.0, 1.0);
        let y = d.y.clamp(0.0, 1.0);
        Vec2::new(
            (1.0 - x) * a.x + x * b.x,
            (1.0 - y) * a.y + y * b.y,
        )
    }

    /// Heading of this vector in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotates to the given heading, preserving the magnitude.
    pub fn with_angle(self, radians: f64) -> Self {
        let norm = self.norm();
        Self::new(radians.cos() * norm, radians.sin() * norm)
    }

    /// Perpendicular vector `(y, -x)`, i.e. the camera-right of a forward vector.
    #[inline]
    pub fn right(&self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn norm_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        norm_from_sqr(self.norm_sqr())
    }

    /// See [`Vec2::normalize`]: unit and near-zero vectors pass through unchanged.
    #[inline]
    pub fn normalize(self) -> Self {
        let sqr = self.norm_sqr();
        if (sqr - 1.0).abs() <= f64::EPSILON || sqr.abs() <= f64::EPSILON {
            return self;
        }
        self / sqr.sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Standard determinant-form cross product.
    #[inline]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Linear interpolation with `u` clamped to `[0, 1]`.
    pub fn lerp(a: Vec3, b: Vec3, u: f64) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - u;
        Vec3::new(a.x * v + b.x * u, a.y * v + b.y * u, a.z * v + b.z * u)
    }

    /// Drops the z component.
    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[inline]
fn norm_from_sqr(sqr: f64) -> f64 {
    if (sqr - 1.0).abs() <= f64::EPSILON {
        1.0
    } else {
        sqr.sqrt()
    }
}

macro_rules! componentwise {
    ($ty:ident, $($field:ident),+) => {
        impl Add for $ty {
            type Output = $ty;
            #[inline]
            fn add(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field + rhs.$field),+ }
            }
        }
        impl Add<f64> for $ty {
            type Output = $ty;
            #[inline]
            fn add(self, rhs: f64) -> $ty {
                $ty { $($field: self.$field + rhs),+ }
            }
        }
        impl Sub for $ty {
            type Output = $ty;
            #[inline]
            fn sub(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field - rhs.$field),+ }
            }
        }
        impl Sub<f64> for $ty {
            type Output = $ty;
            #[inline]
            fn sub(self, rhs: f64) -> $ty {
                $ty { $($field: self.$field - rhs),+ }
            }
        }
        impl Mul for $ty {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field * rhs.$field),+ }
            }
        }
        impl Mul<f64> for $ty {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: f64) -> $ty {
                $ty { $($field: self.$field * rhs),+ }
            }
        }
        impl Div for $ty {
            type Output = $ty;
            #[inline]
            fn div(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field / rhs.$field),+ }
            }
        }
        impl Div<f64> for $ty {
            type Output = $ty;
            #[inline]
            fn div(self, rhs: f64) -> $ty {
                $ty { $($field: self.$field / rhs),+ }
            }
        }
        impl Neg for $ty {
            type Output = $ty;
            #[inline]
            fn neg(self) -> $ty {
                $ty { $($field: -self.$field),+ }
            }
        }
        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: $ty) {
                $(self.$field += rhs.$field;)+
            }
        }
        impl SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: $ty) {
                $(self.$field -= rhs.$field;)+
            }
        }
        impl MulAssign<f64> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: f64) {
                $(self.$field *= rhs;)+
            }
        }
        impl DivAssign<f64> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: f64) {
                $(self.$field /= rhs;)+
            }
        }
    };
}

componentwise!(Vec2, x, y);
componentwise!(Vec3, x, y, z);

impl Index<usize> for Vec2 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index {} out of bounds for 2-dimensional vector", index),
        }
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {} out of bounds for 3-dimensional vector", index),
        }
    }
}
