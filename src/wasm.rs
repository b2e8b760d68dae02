//! JavaScript bindings.
//!
//! Thin wrappers over the native types, trading structured returns for flat
//! `f64` buffers that cross the WASM boundary without per-element marshaling.

use crate::maze::MazeScene;
use crate::metaballs::{ContourSolver, LocalSolver, MetaBall, Simulation, CELL_SIZE, THRESHOLD};
use crate::vector::Vec2;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Stride of a flattened ball: `[id, px, py, vx, vy, radius]`.
const BALL_STRIDE: usize = 6;

fn balls_from_flat(data: &[f64]) -> Vec<MetaBall> {
    data.chunks_exact(BALL_STRIDE)
        .map(|chunk| MetaBall {
            id: chunk[0] as u32,
            pos: Vec2::new(chunk[1], chunk[2]),
            velocity: Vec2::new(chunk[3], chunk[4]),
            radius: chunk[5],
        })
        .collect()
}

#[wasm_bindgen(js_name = MetaBallsSimulation)]
pub struct SimulationWASM {
    inner: Simulation,
}

#[wasm_bindgen(js_class = MetaBallsSimulation)]
impl SimulationWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SimulationWASM {
        SimulationWASM {
            inner: Simulation::new(&mut rand::thread_rng()),
        }
    }

    pub fn step(&mut self, delta: f64) {
        self.inner.step(delta);
    }

    pub fn retarget(&mut self, x: f64, y: f64, delta: f64) {
        self.inner.retarget(Vec2::new(x, y), delta);
    }

    /// Current balls as a flat buffer, [`BALL_STRIDE`] values each.
    pub fn balls(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.inner.balls().len() * BALL_STRIDE);
        for ball in self.inner.balls() {
            out.extend_from_slice(&[
                ball.id as f64,
                ball.pos.x,
                ball.pos.y,
                ball.velocity.x,
                ball.velocity.y,
                ball.radius,
            ]);
        }
        out
    }
}

#[wasm_bindgen(js_name = ContourSolver)]
pub struct ContourSolverWASM {
    inner: LocalSolver,
}

#[wasm_bindgen(js_class = ContourSolver)]
impl ContourSolverWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContourSolverWASM {
        ContourSolverWASM {
            inner: LocalSolver::new(CELL_SIZE, THRESHOLD),
        }
    }

    /// `balls` is a flat buffer, [`BALL_STRIDE`] values per ball.
    pub fn start_frame(&mut self, balls: &[f64], invert: bool) {
        self.inner.start_frame(&balls_from_flat(balls), invert);
    }

    /// Solves a frame and flattens the polygons as repeated
    /// `[point_count, x0, y0, x1, y1, ...]` runs.
    pub fn solve(
        &mut self,
        cell_count: usize,
        pad_left: f64,
        pad_top: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Vec<f64> {
        let polys = self.inner.solve(
            cell_count,
            [pad_left, pad_top],
            [canvas_width, canvas_height],
        );
        let mut out = Vec::new();
        for poly in polys {
            out.push(poly.len() as f64);
            for point in poly {
                out.push(point.x);
                out.push(point.y);
            }
        }
        out
    }
}

#[wasm_bindgen(js_name = MazeScene)]
pub struct MazeSceneWASM {
    inner: MazeScene,
}

#[wasm_bindgen(js_class = MazeScene)]
impl MazeSceneWASM {
    #[wasm_bindgen(constructor)]
    pub fn new(size: u32) -> MazeSceneWASM {
        MazeSceneWASM {
            inner: MazeScene::new(size, &mut rand::thread_rng()),
        }
    }

    pub fn step(&mut self, delta: f64) {
        self.inner.step(delta, &mut rand::thread_rng());
    }

    #[wasm_bindgen(getter)]
    pub fn eye_x(&self) -> f64 {
        self.inner.walker().eye_pos().x
    }

    #[wasm_bindgen(getter)]
    pub fn eye_y(&self) -> f64 {
        self.inner.walker().eye_pos().y
    }

    #[wasm_bindgen(getter)]
    pub fn eye_angle(&self) -> f64 {
        self.inner.walker().eye_angle()
    }

    /// Wall segments as flat `[x1, y1, x2, y2]` runs, for the mini-map.
    pub fn walls(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.inner.maze().walls().len() * 4);
        for wall in self.inner.maze().walls() {
            let (a, b) = wall.endpoints();
            out.extend_from_slice(&[a.x, a.y, b.x, b.y]);
        }
        out
    }

    /// Traces a frame into `[height, light, texture_u]` triples, one per
    /// column. Misses carry a negative height.
    pub fn trace_frame(&self, resolution: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(resolution * 3);
        for column in self.inner.trace_frame(resolution) {
            match column {
                Some(column) => {
                    out.extend_from_slice(&[column.height, column.light, column.texture_u])
                }
                None => out.extend_from_slice(&[-1.0, 0.0, 0.0]),
            }
        }
        out
    }
}
