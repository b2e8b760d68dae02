use crate::line::Line;
use crate::quaternion::Quaternion;
use crate::vector::{Vec2, Vec3};

/// Three same-dimensionality points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<V> {
    pub a: V,
    pub b: V,
    pub c: V,
}

pub type Tri2 = Triangle<Vec2>;
pub type Tri3 = Triangle<Vec3>;

impl<V: Copy> Triangle<V> {
    pub const fn new(a: V, b: V, c: V) -> Self {
        Self { a, b, c }
    }

    pub fn to_array(&self) -> [V; 3] {
        [self.a, self.b, self.c]
    }

    pub fn map<W>(&self, mut op: impl FnMut(V) -> W) -> Triangle<W> {
        Triangle {
            a: op(self.a),
            b: op(self.b),
            c: op(self.c),
        }
    }

    pub fn update(&mut self, mut op: impl FnMut(V) -> V) -> &mut Self {
        self.a = op(self.a);
        self.b = op(self.b);
        self.c = op(self.c);
        self
    }
}

impl Tri3 {
    pub fn zero() -> Self {
        Triangle::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    }

    /// Rotates around the origin, then translates.
    pub fn transformed(&self, translation: Vec3, rotation: &Quaternion) -> Tri3 {
        self.map(|p| rotation.rotate(p) + translation)
    }

    pub fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Squared distance from `point` to the triangle's centroid; the
    /// back-to-front sort key for projected faces.
    pub fn sqr_dist_from(&self, point: Vec3) -> f64 {
        (self.center() - point).norm_sqr()
    }

    pub fn to_2d(&self) -> Tri2 {
        self.map(|p| p.xy())
    }
}

impl Tri2 {
    pub fn zero() -> Self {
        Triangle::new(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO)
    }

    /// UV layout used when a face is built without explicit texture
    /// coordinates: bottom-left, top-middle, bottom-right.
    pub fn default_uv() -> Self {
        Triangle::new(Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0))
    }

    pub fn to_3d(&self, z: f64) -> Tri3 {
        self.map(|p| Vec3::new(p.x, p.y, z))
    }

    pub fn center(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// The triangle's three edges as canonical segments.
    pub fn edges(&self) -> [Line; 3] {
        [
            Line::new(self.a, self.b),
            Line::new(self.b, self.c),
            Line::new(self.c, self.a),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let t = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(t.center(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_transformed_promotes_and_translates() {
        let t = Tri2::default_uv().to_3d(0.0);
        let moved = t.transformed(Vec3::new(1.0, 2.0, 3.0), &Quaternion::identity());
        assert_eq!(moved.a, t.a + Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_sqr_dist_from_orders_faces() {
        let near = Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        let far = Triangle::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        let cam = Vec3::new(0.0, 0.0, 0.0);
        assert!(near.sqr_dist_from(cam) < far.sqr_dist_from(cam));
    }

    #[test]
    fn test_edges_are_closed_loop() {
        let t = Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let edges = t.edges();
        // Consecutive edges share endpoints.
        assert!(edges[0].intersection(&edges[1]).is_some());
        assert!(edges[1].intersection(&edges[2]).is_some());
        assert!(edges[2].intersection(&edges[0]).is_some());
    }
}
