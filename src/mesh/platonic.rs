//! The five platonic solids, unit-circumradius, centered on the origin.
//!
//! Vertex and face tables are hard-coded; faces with more than three sides
//! (dodecahedron pentagons) are emitted as triangle fans around the face
//! center so every mesh is triangles all the way down.

use super::Mesh;
use crate::vector::Vec3;

// Alternated corners of the unit-circumradius cube.
const R3_3: f64 = 0.5773502691896258; // sqrt(3) / 3

const TETRA_VERTEX_DATA: [Vec3; 4] = [
    Vec3::new(R3_3, R3_3, R3_3),
    Vec3::new(R3_3, -R3_3, -R3_3),
    Vec3::new(-R3_3, R3_3, -R3_3),
    Vec3::new(-R3_3, -R3_3, R3_3),
];

const TETRA_VERTEX_INDICES: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

pub fn tetrahedron(scale: f64) -> Mesh {
    let mut mb = Mesh::builder();
    for triple in TETRA_VERTEX_INDICES {
        mb.face(triple.map(|i| TETRA_VERTEX_DATA[i]), None, None);
    }
    mb.scale(scale).build()
}

pub fn cube(scale: f64) -> Mesh {
    let mut mb = Mesh::builder();

    mb.quad(
        [
            // -Z
            Vec3::new(-R3_3, R3_3, -R3_3),
            Vec3::new(R3_3, R3_3, -R3_3),
            Vec3::new(R3_3, -R3_3, -R3_3),
            Vec3::new(-R3_3, -R3_3, -R3_3),
        ],
        None,
        Some(Vec3::new(0.0, 0.0, -1.0)),
    );
    mb.quad(
        [
            // +Z
            Vec3::new(R3_3, R3_3, R3_3),
            Vec3::new(-R3_3, R3_3, R3_3),
            Vec3::new(-R3_3, -R3_3, R3_3),
            Vec3::new(R3_3, -R3_3, R3_3),
        ],
        None,
        Some(Vec3::new(0.0, 0.0, 1.0)),
    );
    mb.quad(
        [
            // +Y
            Vec3::new(-R3_3, R3_3, R3_3),
            Vec3::new(R3_3, R3_3, R3_3),
            Vec3::new(R3_3, R3_3, -R3_3),
            Vec3::new(-R3_3, R3_3, -R3_3),
        ],
        None,
        Some(Vec3::new(0.0, 1.0, 0.0)),
    );
    mb.quad(
        [
            // -Y
            Vec3::new(-R3_3, -R3_3, -R3_3),
            Vec3::new(R3_3, -R3_3, -R3_3),
            Vec3::new(R3_3, -R3_3, R3_3),
            Vec3::new(-R3_3, -R3_3, R3_3),
        ],
        None,
        Some(Vec3::new(0.0, -1.0, 0.0)),
    );
    mb.quad(
        [
            // -X
            Vec3::new(-R3_3, R3_3, R3_3),
            Vec3::new(-R3_3, R3_3, -R3_3),
            Vec3::new(-R3_3, -R3_3, -R3_3),
            Vec3::new(-R3_3, -R3_3, R3_3),
        ],
        None,
        Some(Vec3::new(-1.0, 0.0, 0.0)),
    );
    mb.quad(
        [
            // +X
            Vec3::new(R3_3, R3_3, -R3_3),
            Vec3::new(R3_3, R3_3, R3_3),
            Vec3::new(R3_3, -R3_3, R3_3),
            Vec3::new(R3_3, -R3_3, -R3_3),
        ],
        None,
        Some(Vec3::new(1.0, 0.0, 0.0)),
    );

    mb.scale(scale).build()
}

const OCTA_VERTEX_DATA: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

const OCTA_VERTEX_INDICES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [2, 1, 4],
    [1, 3, 4],
    [3, 0, 4],
    [2, 0, 5],
    [1, 2, 5],
    [3, 1, 5],
    [0, 3, 5],
];

pub fn octahedron(scale: f64) -> Mesh {
    let mut mb = Mesh::builder();
    for triple in OCTA_VERTEX_INDICES {
        mb.face(triple.map(|i| OCTA_VERTEX_DATA[i]), None, None);
    }
    mb.scale(scale).build()
}

// Dodecahedron constants: cube corners at 1/sqrt(3) plus the three
// golden-rectangle vertex rings.
const DDH_A: f64 = 0.5773502691896258; // 1 / sqrt(3)
const DDH_B: f64 = 0.35682208977308993; // (sqrt(5) - 1) / (2 * sqrt(3))
const DDH_C: f64 = 0.9341723589627157; // sqrt(3) * (1 + sqrt(5)) / 6

const DDH_VERTEX_DATA: [Vec3; 20] = [
    Vec3::new(DDH_A, DDH_A, DDH_A),
    Vec3::new(DDH_A, DDH_A, -DDH_A),
    Vec3::new(DDH_A, -DDH_A, DDH_A),
    Vec3::new(DDH_A, -DDH_A, -DDH_A),
    Vec3::new(-DDH_A, DDH_A, DDH_A),
    Vec3::new(-DDH_A, DDH_A, -DDH_A),
    Vec3::new(-DDH_A, -DDH_A, DDH_A),
    Vec3::new(-DDH_A, -DDH_A, -DDH_A),
    Vec3::new(0.0, DDH_B, DDH_C),
    Vec3::new(0.0, DDH_B, -DDH_C),
    Vec3::new(0.0, -DDH_B, DDH_C),
    Vec3::new(0.0, -DDH_B, -DDH_C),
    Vec3::new(DDH_B, DDH_C, 0.0),
    Vec3::new(DDH_B, -DDH_C, 0.0),
    Vec3::new(-DDH_B, DDH_C, 0.0),
    Vec3::new(-DDH_B, -DDH_C, 0.0),
    Vec3::new(DDH_C, 0.0, DDH_B),
    Vec3::new(DDH_C, 0.0, -DDH_B),
    Vec3::new(-DDH_C, 0.0, DDH_B),
    Vec3::new(-DDH_C, 0.0, -DDH_B),
];

const DDH_VERTEX_INDICES: [[usize; 5]; 12] = [
    [0, 16, 2, 10, 8],
    [0, 8, 4, 14, 12],
    [16, 17, 1, 12, 0],
    [1, 9, 11, 3, 17],
    [1, 12, 14, 5, 9],
    [2, 13, 15, 6, 10],
    [13, 3, 17, 16, 2],
    [3, 11, 7, 15, 13],
    [4, 8, 10, 6, 18],
    [14, 5, 19, 18, 4],
    [5, 19, 7, 11, 9],
    [15, 7, 19, 18, 6],
];

pub fn dodecahedron(scale: f64) -> Mesh {
    let mut mb = Mesh::builder();

    for indices in DDH_VERTEX_INDICES {
        let vertices = indices.map(|i| DDH_VERTEX_DATA[i]);
        let center = (vertices[0] + vertices[1] + vertices[2] + vertices[3] + vertices[4]) / 5.0;
        let normal = center.normalize();

        // triangle fan
        for z in 0..5 {
            mb.face(
                [vertices[z], center, vertices[if z == 4 { 0 } else { z + 1 }]],
                None,
                Some(normal),
            );
        }
    }

    mb.scale(scale).build()
}

const ICO_X: f64 = 0.525731112119133606;
const ICO_Z: f64 = 0.850650808352039932;

pub(crate) const ICO_VERTEX_DATA: [Vec3; 12] = [
    Vec3::new(-ICO_X, 0.0, ICO_Z),
    Vec3::new(ICO_X, 0.0, ICO_Z),
    Vec3::new(-ICO_X, 0.0, -ICO_Z),
    Vec3::new(ICO_X, 0.0, -ICO_Z),
    Vec3::new(0.0, ICO_Z, ICO_X),
    Vec3::new(0.0, ICO_Z, -ICO_X),
    Vec3::new(0.0, -ICO_Z, ICO_X),
    Vec3::new(0.0, -ICO_Z, -ICO_X),
    Vec3::new(ICO_Z, ICO_X, 0.0),
    Vec3::new(-ICO_Z, ICO_X, 0.0),
    Vec3::new(ICO_Z, -ICO_X, 0.0),
    Vec3::new(-ICO_Z, -ICO_X, 0.0),
];

pub(crate) const ICO_VERTEX_INDICES: [[usize; 3]; 20] = [
    [0, 4, 1],
    [0, 9, 4],
    [9, 5, 4],
    [4, 5, 8],
    [4, 8, 1],
    [8, 10, 1],
    [8, 3, 10],
    [5, 3, 8],
    [5, 2, 3],
    [2, 7, 3],
    [7, 10, 3],
    [7, 6, 10],
    [7, 11, 6],
    [11, 0, 6],
    [0, 1, 6],
    [6, 1, 10],
    [9, 0, 11],
    [9, 11, 2],
    [9, 2, 5],
    [7, 2, 11],
];

pub fn icosahedron(scale: f64) -> Mesh {
    let mut mb = Mesh::builder();
    for triple in ICO_VERTEX_INDICES {
        mb.face(triple.map(|i| ICO_VERTEX_DATA[i]), None, None);
    }
    mb.scale(scale).build()
}

/// All five solids in ascending face-count order.
pub fn platonics(scale: f64) -> [Mesh; 5] {
    [
        tetrahedron(scale),
        cube(scale),
        octahedron(scale),
        dodecahedron(scale),
        icosahedron(scale),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_counts() {
        assert_eq!(tetrahedron(1.0).faces.len(), 4);
        assert_eq!(cube(1.0).faces.len(), 12); // 6 quads, 2 tris each
        assert_eq!(octahedron(1.0).faces.len(), 8);
        assert_eq!(dodecahedron(1.0).faces.len(), 60); // 12 pentagon fans
        assert_eq!(icosahedron(1.0).faces.len(), 20);
    }

    #[test]
    fn test_unit_circumradius() {
        for mesh in platonics(1.0) {
            for face in &mesh.faces {
                for v in face.vertices.to_array() {
                    // Fan centers sit inside the sphere, so only check
                    // original vertices (norm very close to 1 or smaller).
                    assert!(v.norm() <= 1.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_normals_point_outward() {
        for mesh in platonics(2.0) {
            for face in &mesh.faces {
                assert!(face.normal.dot(&face.vertices.center()) > 0.0);
            }
        }
    }
}
