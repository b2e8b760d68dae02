//! Icosphere generation: the icosahedron's 20 faces recursively subdivided,
//! every new vertex pushed back onto the unit sphere.

use super::platonic::{ICO_VERTEX_DATA, ICO_VERTEX_INDICES};
use super::Mesh;
use crate::vector::{Vec2, Vec3};

const POLE_EPSILON: f64 = 1e-9;

/// Mesh generator for a subdivided icosahedron.
///
/// `n` subdivisions produce `20 * 4^n` faces. UV coordinates come from a
/// longitude/latitude spherical projection; `half_uv` wraps the longitude
/// over half the texture, for textures mirrored across the seam.
#[derive(Clone, Copy, Debug)]
pub struct IcoSphere {
    pub subdivisions: usize,
    pub half_uv: bool,
}

impl IcoSphere {
    pub fn new(subdivisions: usize) -> Self {
        Self {
            subdivisions,
            half_uv: false,
        }
    }

    pub fn with_half_uv(mut self, half_uv: bool) -> Self {
        self.half_uv = half_uv;
        self
    }

    pub fn generate(&self, scale: f64) -> Mesh {
        let mut mb = Mesh::builder();

        let mut tris: Vec<[Vec3; 3]> = ICO_VERTEX_INDICES
            .iter()
            .map(|triple| triple.map(|i| ICO_VERTEX_DATA[i]))
            .collect();
        for _ in 0..self.subdivisions {
            tris = subdivide(&tris);
        }
        for tri in &tris {
            mb.face(*tri, Some(tri.map(|v| self.compute_uv(v))), None);
        }

        mb.scale(scale).build()
    }

    fn compute_uv(&self, vector: Vec3) -> Vec2 {
        let mut lng = vector.z.atan2(vector.x);
        if self.half_uv {
            lng = ((lng + std::f64::consts::PI) / std::f64::consts::PI) % 1.0;
        } else {
            lng = (lng + std::f64::consts::PI) / (std::f64::consts::PI * 2.0);
        }

        let lat = if vector.y.abs() <= POLE_EPSILON {
            0.0
        } else if (vector.y - 1.0).abs() <= POLE_EPSILON {
            1.0
        } else {
            let radius = (1.0 - vector.y * vector.y).sqrt();
            let ang = (vector.y / radius).atan();
            0.5 - ang / std::f64::consts::PI
        };

        Vec2::new(lng, lat)
    }
}

/// One subdivision step: each face becomes four, edge midpoints renormalized
/// onto the sphere.
fn subdivide(tris: &[[Vec3; 3]]) -> Vec<[Vec3; 3]> {
    let mut ret = Vec::with_capacity(tris.len() * 4);
    for &[a, b, c] in tris {
        let ab = ((a + b) / 2.0).normalize();
        let bc = ((b + c) / 2.0).normalize();
        let ac = ((a + c) / 2.0).normalize();
        ret.push([ab, bc, ac]);
        ret.push([a, ab, ac]);
        ret.push([b, ab, bc]);
        ret.push([c, bc, ac]);
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_icosahedron_face_count() {
        let mesh = IcoSphere::new(0).generate(1.0);
        assert_eq!(mesh.faces.len(), 20);
    }

    #[test]
    fn test_subdivision_face_counts() {
        assert_eq!(IcoSphere::new(1).generate(1.0).faces.len(), 80);
        assert_eq!(IcoSphere::new(2).generate(1.0).faces.len(), 320);
    }

    #[test]
    fn test_vertices_stay_on_sphere() {
        let mesh = IcoSphere::new(2).generate(1.0);
        for face in &mesh.faces {
            for v in face.vertices.to_array() {
                assert!((v.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_uvs_in_unit_square() {
        for half_uv in [false, true] {
            let mesh = IcoSphere::new(1).with_half_uv(half_uv).generate(1.0);
            for face in &mesh.faces {
                for uv in face.uvs.to_array() {
                    assert!((0.0..=1.0).contains(&uv.x), "u out of range: {}", uv.x);
                    assert!((0.0..=1.0).contains(&uv.y), "v out of range: {}", uv.y);
                }
            }
        }
    }

    #[test]
    fn test_scale_applies_to_vertices() {
        let mesh = IcoSphere::new(0).generate(3.0);
        for face in &mesh.faces {
            for v in face.vertices.to_array() {
                assert!((v.norm() - 3.0).abs() < 1e-9);
            }
        }
    }
}
