pub mod icosphere;
pub mod platonic;

use crate::quaternion::Quaternion;
use crate::triangle::{Tri2, Tri3, Triangle};
use crate::vector::{Vec2, Vec3};

/// A single mesh face: triangle vertices, texture coordinates and a normal.
#[derive(Clone, Debug)]
pub struct MeshFace {
    pub vertices: Tri3,
    pub uvs: Tri2,
    pub normal: Vec3,
}

/// A face after projection to screen space. Keeps the source UVs and normal
/// so callers can still texture and light it.
#[derive(Clone, Debug)]
pub struct ProjectedFace {
    pub vertices: Tri2,
    pub uvs: Tri2,
    pub normal: Vec3,
}

/// An immutable triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub faces: Vec<MeshFace>,
}

impl Mesh {
    pub fn new(faces: Vec<MeshFace>) -> Self {
        Self { faces }
    }

    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    /// Projects every vertex through `project`.
    ///
    /// When `camera_pos` is given, faces are first sorted back-to-front by
    /// squared centroid distance so an unbuffered rasterizer paints them in
    /// the right order. Callers supply perspective or orthographic projections.
    pub fn projected_faces(
        &self,
        project: impl Fn(Vec3) -> Vec2,
        camera_pos: Option<Vec3>,
    ) -> Vec<ProjectedFace> {
        let mut faces: Vec<&MeshFace> = self.faces.iter().collect();
        if let Some(cam) = camera_pos {
            faces.sort_by(|a, b| {
                let da = a.vertices.sqr_dist_from(cam);
                let db = b.vertices.sqr_dist_from(cam);
                db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        faces
            .into_iter()
            .map(|face| ProjectedFace {
                vertices: face.vertices.map(&project),
                uvs: face.uvs,
                normal: face.normal,
            })
            .collect()
    }

    /// Rotates around the origin, then translates. Normals rotate with the
    /// vertices.
    pub fn transformed(&self, translation: Vec3, rotation: &Quaternion) -> Mesh {
        Mesh::new(
            self.faces
                .iter()
                .map(|face| MeshFace {
                    vertices: face.vertices.transformed(translation, rotation),
                    uvs: face.uvs,
                    normal: rotation.rotate(face.normal),
                })
                .collect(),
        )
    }
}

/// Incremental mesh construction.
#[derive(Default)]
pub struct MeshBuilder {
    faces: Vec<MeshFace>,
}

impl MeshBuilder {
    /// Adds a triangle. UVs default to [`Tri2::default_uv`]; the normal
    /// defaults to the normalized centroid (correct for origin-centered
    /// convex solids).
    pub fn face(&mut self, vertices: [Vec3; 3], uvs: Option<[Vec2; 3]>, normal: Option<Vec3>) -> &mut Self {
        let vertices = Triangle::new(vertices[0], vertices[1], vertices[2]);
        let uvs = match uvs {
            Some(uv) => Triangle::new(uv[0], uv[1], uv[2]),
            None => Tri2::default_uv(),
        };
        let normal = normal.unwrap_or_else(|| vertices.center().normalize());
        self.faces.push(MeshFace {
            vertices,
            uvs,
            normal,
        });
        self
    }

    /// Adds a quad as two triangles sharing a normal. Vertex order contract:
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn quad(&mut self, vertices: [Vec3; 4], uvs: Option<[Vec2; 4]>, normal: Option<Vec3>) -> &mut Self {
        let uvs = uvs.unwrap_or([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
        let normal = normal.unwrap_or_else(|| {
            ((vertices[0] + vertices[1] + vertices[2] + vertices[3]) / 4.0).normalize()
        });
        self.faces.push(MeshFace {
            vertices: Triangle::new(vertices[0], vertices[1], vertices[3]),
            uvs: Triangle::new(uvs[0], uvs[1], uvs[3]),
            normal,
        });
        self.faces.push(MeshFace {
            vertices: Triangle::new(vertices[3], vertices[1], vertices[2]),
            uvs: Triangle::new(uvs[3], uvs[1], uvs[2]),
            normal,
        });
        self
    }

    pub fn scale(&mut self, factor: f64) -> &mut Self {
        for face in &mut self.faces {
            face.vertices.update(|p| p * factor);
        }
        self
    }

    pub fn scale_vec(&mut self, factor: Vec3) -> &mut Self {
        for face in &mut self.faces {
            face.vertices.update(|p| p * factor);
        }
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.faces.clear();
        self
    }

    pub fn build(&mut self) -> Mesh {
        Mesh::new(std::mem::take(&mut self.faces))
    }
}
