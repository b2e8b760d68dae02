//! # backdrop
//!
//! `backdrop` is the geometry and rendering-math core behind a set of
//! animated showcase backdrops, designed to be used in Rust as well as
//! compiled to WebAssembly (WASM). It bundles a small vector/quaternion/mesh
//! library with two complete scene engines: a BSP-maze raycaster and a
//! marching-squares metaball contour solver.
//!
//! ## Features
//!
//! - **Browser-ready**: `wasm-bindgen` handles expose every engine over flat `f64` buffers.
//! - **Canonical segments**: A tagged horizontal/vertical/diagonal line type with exact intersection tests.
//! - **Procedural mazes**: Binary-space-partition generation, a boredom-weighted random walker and a parallel per-column raycaster.
//! - **Metaball contours**: Threshold-field marching squares with stripe merging, in-process or on a worker pool.
//! - **Mesh toolkit**: Platonic solids and subdivided icospheres with painter's-order projection.
//!
//! ## Example
//!
//! See the `demos/` directory for SVG plotting of maze maps and contour
//! frames.
//!
//! ## Main Interface
//!
//! The scene entry points are [`maze::MazeScene`] and
//! [`metaballs::Simulation`] paired with a [`metaballs::ContourSolver`].

pub mod color;
mod line;
pub mod maze;
pub mod mesh;
pub mod metaballs;
mod quaternion;
pub mod surface;
mod triangle;
mod vector;
pub mod wasm;

pub use line::Line;
pub use mesh::{Mesh, MeshBuilder, MeshFace, ProjectedFace};
pub use quaternion::Quaternion;
pub use triangle::Tri2;
pub use triangle::Tri3;
pub use triangle::Triangle;
pub use vector::Vec2;
pub use vector::Vec3;
