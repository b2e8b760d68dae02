//! Metaballs showcase core: ball dynamics, the marching-squares contour
//! solver and its worker-pool variant.
//!
//! Balls live in a fixed 100x100 world. Each frame the field
//! `sum(r_i / |p - pos_i|^2)` is sampled on a square grid and contoured at
//! [`THRESHOLD`]; the resulting polygons are mapped into canvas pixels.

mod ball;
pub mod contour;
mod solver;
#[cfg(not(target_arch = "wasm32"))]
mod threadpool;

pub use ball::{MetaBall, Simulation, BALL_COUNT};
pub use solver::{ContourSolver, LocalSolver, Polygon, CELL_SIZE, THRESHOLD};
#[cfg(not(target_arch = "wasm32"))]
pub use threadpool::ThreadPoolSolver;
