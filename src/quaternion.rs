use crate::vector::Vec3;
use std::ops::Mul;

const FLAG_UNIT: u8 = 1;
const FLAG_IDENTITY: u8 = 2;
const FLAG_EPSILON: f64 = 1e-9;

/// Interpolations with a dot product above this fall back to linear blending,
/// avoiding the near-zero sine denominator of the spherical formula.
pub const DOT_THRESHOLD: f64 = 0.9995;

/// Rotation quaternion stored as `(w, x, y, z)`.
///
/// Two derived flags, UNIT and IDENTITY, are cached whenever the components
/// are replaced wholesale. They let [`rotate`](Quaternion::rotate) and
/// [`normalize`](Quaternion::normalize) take fast paths without recomputing
/// the squared norm on every call.
#[derive(Clone, Copy, Debug)]
pub struct Quaternion {
    w: f64,
    x: f64,
    y: f64,
    z: f64,
    flags: u8,
}

impl Quaternion {
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            flags: FLAG_UNIT | FLAG_IDENTITY,
        }
    }

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        let mut q = Self { w, x, y, z, flags: 0 };
        q.recompute_flags();
        q
    }

    /// Intrinsic Tait-Bryan angles, applied roll then pitch then yaw.
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        let mut q = Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            flags: FLAG_UNIT,
        };
        q.check_identity();
        q
    }

    /// Spherical interpolation from `a` to `b`.
    ///
    /// Near-parallel inputs (dot above [`DOT_THRESHOLD`]) are blended linearly
    /// and renormalized instead.
    pub fn slerp(a: &Quaternion, b: &Quaternion, t: f64) -> Quaternion {
        let mut dot = a.dot(b);

        if dot > DOT_THRESHOLD {
            let lerped = Quaternion::new(
                a.w + t * (b.w - a.w),
                a.x + t * (b.x - a.x),
                a.y + t * (b.y - a.y),
                a.z + t * (b.z - a.z),
            );
            return lerped.normalize();
        }

        dot = dot.clamp(-1.0, 1.0);
        let theta = dot.acos() * t;

        let c = Quaternion::new(
            b.w - a.w * dot,
            b.x - a.x * dot,
            b.y - a.y * dot,
            b.z - a.z * dot,
        )
        .normalize();

        let (st, ct) = theta.sin_cos();
        Quaternion::new(
            a.w * ct + c.w * st,
            a.x * ct + c.x * st,
            a.y * ct + c.y * st,
            a.z * ct + c.z * st,
        )
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    #[inline]
    pub fn scalar_part(&self) -> f64 {
        self.w
    }

    #[inline]
    pub fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn components(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Replaces all four components, recomputing the UNIT and IDENTITY flags.
    pub fn set_components(&mut self, components: [f64; 4]) {
        let [w, x, y, z] = components;
        self.w = w;
        self.x = x;
        self.y = y;
        self.z = z;
        self.recompute_flags();
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        self.flags & FLAG_UNIT != 0
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.flags & FLAG_IDENTITY != 0
    }

    #[inline]
    pub fn norm_sqr(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn normalize(self) -> Self {
        if self.is_unit() {
            return self;
        }
        let sqr = self.norm_sqr();
        if (sqr - 1.0).abs() <= f64::EPSILON || sqr.abs() <= f64::EPSILON {
            return self;
        }
        let norm = sqr.sqrt();
        Quaternion::new(self.w / norm, self.x / norm, self.y / norm, self.z / norm)
    }

    /// Rotates a vector by this quaternion.
    ///
    /// The identity returns the input unchanged; anything non-unit is
    /// normalized first. Uses the expanded form
    /// `2u(u·v) + v(s² − |u|²) + 2s(u × v)`.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        if self.is_identity() {
            return v;
        }
        let unit = if self.is_unit() { *self } else { self.normalize() };
        let u = unit.vector_part();
        let s = unit.scalar_part();

        u * (u.dot(&v) * 2.0) + v * (s * s - u.norm_sqr()) + u.cross(&v) * (s * 2.0)
    }

    /// Multiplicative inverse: the conjugate, scaled by the norm when the
    /// quaternion is not unit. Near-zero quaternions return their conjugate
    /// unscaled rather than dividing by noise.
    pub fn inverse(&self) -> Quaternion {
        let mut ret = Quaternion::new(self.w, -self.x, -self.y, -self.z);
        if !self.is_unit() {
            let sqr = self.norm_sqr();
            if sqr > FLAG_EPSILON {
                let norm = sqr.sqrt();
                ret = Quaternion::new(ret.w / norm, ret.x / norm, ret.y / norm, ret.z / norm);
            }
        }
        ret
    }

    /// Broadcast scalar multiply, the vector-space operation rather than the
    /// Hamilton product.
    pub fn scaled(&self, factor: f64) -> Quaternion {
        Quaternion::new(
            self.w * factor,
            self.x * factor,
            self.y * factor,
            self.z * factor,
        )
    }

    fn recompute_flags(&mut self) {
        self.flags = 0;
        if (self.norm_sqr() - 1.0).abs() <= FLAG_EPSILON {
            self.flags |= FLAG_UNIT;
            self.check_identity();
        }
    }

    fn check_identity(&mut self) {
        if (self.w - 1.0).abs() <= FLAG_EPSILON
            && self.x.abs() <= FLAG_EPSILON
            && self.y.abs() <= FLAG_EPSILON
            && self.z.abs() <= FLAG_EPSILON
        {
            self.flags |= FLAG_IDENTITY;
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.w == other.w && self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product.
    fn mul(self, b: Quaternion) -> Quaternion {
        let Quaternion { w, x, y, z, .. } = self;
        Quaternion::new(
            w * b.w - x * b.x - y * b.y - z * b.z,
            w * b.x + x * b.w + y * b.z - z * b.y,
            w * b.y - x * b.z + y * b.w + z * b.x,
            w * b.z + x * b.y - y * b.x + z * b.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_close(a: Vec3, b: Vec3) {
        assert!((a.x - b.x).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 1e-9, "{:?} != {:?}", a, b);
        assert!((a.z - b.z).abs() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_flags() {
        let q = Quaternion::identity();
        assert!(q.is_unit());
        assert!(q.is_identity());

        let r = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        assert!(r.is_identity(), "constructed identity must detect its flags");
    }

    #[test]
    fn test_flags_recomputed_on_replace() {
        let mut q = Quaternion::new(0.5, 0.5, 0.5, 0.5);
        assert!(q.is_unit());
        assert!(!q.is_identity());

        q.set_components([2.0, 0.0, 0.0, 0.0]);
        assert!(!q.is_unit());

        q.set_components([1.0, 0.0, 0.0, 0.0]);
        assert!(q.is_identity());
    }

    #[test]
    fn test_rotate_preserves_norm() {
        let q = Quaternion::from_euler(0.3, -1.1, 2.4);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = q.rotate(v);
        assert!((r.norm() - v.norm()).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_identity_is_noop() {
        let v = Vec3::new(0.2, -0.5, 0.9);
        assert_vec3_close(Quaternion::identity().rotate(v), v);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // 90 degrees of yaw carries +X onto +Y.
        let q = Quaternion::from_euler(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let r = q.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert_vec3_close(r, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_non_unit_rotation_normalizes() {
        let q = Quaternion::from_euler(0.7, 0.0, 0.0);
        let scaled = q.scaled(3.0);
        let v = Vec3::new(0.1, 0.2, 0.3);
        assert_vec3_close(q.rotate(v), scaled.rotate(v));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quaternion::from_euler(0.0, 0.0, 0.0);
        let b = Quaternion::from_euler(0.0, 0.0, 2.0);

        let s0 = Quaternion::slerp(&a, &b, 0.0);
        let s1 = Quaternion::slerp(&a, &b, 1.0);
        assert!((s0.dot(&a).abs() - 1.0).abs() < 1e-9);
        assert!((s1.dot(&b).abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slerp_self_is_stable() {
        let a = Quaternion::from_euler(1.0, 0.5, -0.25);
        for t in [0.0, 0.25, 0.5, 1.0] {
            let s = Quaternion::slerp(&a, &a, t);
            assert!((s.dot(&a).abs() - 1.0).abs() < 1e-9, "t = {}", t);
        }
    }

    #[test]
    fn test_hamilton_product_composes_rotations() {
        let a = Quaternion::from_euler(0.0, 0.0, 0.4);
        let b = Quaternion::from_euler(0.0, 0.0, 0.8);
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert_vec3_close((b * a).rotate(v), b.rotate(a.rotate(v)));
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quaternion::from_euler(0.9, -0.2, 1.7);
        let v = Vec3::new(-2.0, 0.5, 4.0);
        assert_vec3_close(q.inverse().rotate(q.rotate(v)), v);
    }
}
