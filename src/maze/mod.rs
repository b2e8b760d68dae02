//! Maze showcase core: binary-space-partition generation, a random-walk
//! camera and a per-column raycaster over the generated wall set.

mod cell;
pub mod raycast;
pub mod render;
mod walker;

pub use cell::MazeCell;
pub use raycast::{Column, Raycaster};
pub use render::MazeRenderer;
pub use walker::{MoveDirection, Walker, DIRECTIONS};

use crate::line::Line;
use crate::vector::Vec2;
use rand::Rng;
use rayon::prelude::*;
use std::collections::VecDeque;

/// Default maze side length, in cells.
pub const MAZE_SIZE: u32 = 9;

/// A generated maze: its wall segments plus a connectivity matrix.
///
/// The matrix is `(2S+1) x (2S+1)` for an `S x S` maze. Odd rows/columns are
/// cell nodes, even ones are the gaps between them; `0` means passable and
/// `1` means wall. The walker moves on this graph while the raycaster
/// intersects the wall segments directly.
pub struct Maze {
    size: u32,
    walls: Vec<Line>,
    matrix: Vec<u8>,
}

impl Maze {
    /// Generates a maze by recursive binary space partition.
    ///
    /// The outer boundary is emitted up front; interior walls come from
    /// splitting cells breadth-first until everything is 1x1. The matrix is
    /// then encoded by probing a unit segment between each pair of adjacent
    /// cell centers against the wall set.
    pub fn generate(size: u32, rng: &mut impl Rng) -> Self {
        let root = MazeCell::root(size);
        let mut walls = root.outline();

        let mut cells: VecDeque<MazeCell> = VecDeque::new();
        cells.push_back(root);
        while let Some(cell) = cells.pop_front() {
            cells.extend(cell.split(rng, &mut walls));
        }

        let matrix_size = (2 * size + 1) as usize;
        let mut matrix = vec![1u8; matrix_size * matrix_size];

        // Each cell opens its own node and probes the four gap nodes around
        // it. Cells are independent, so the probe pass runs in parallel.
        let open: Vec<(usize, usize)> = (0..(size * size) as usize)
            .into_par_iter()
            .flat_map_iter(|i| {
                let x = (i as u32) % size;
                let y = (i as u32) / size;
                let mx = (2 * x + 1) as usize;
                let my = (2 * y + 1) as usize;

                let mut out = vec![(mx, my)];
                for dir in &DIRECTIONS {
                    let probe = Line::of(
                        x as f64 + 0.5,
                        y as f64 + 0.5,
                        x as f64 + 0.5 + dir.vector.x,
                        y as f64 + 0.5 + dir.vector.y,
                    );
                    let collides = walls.iter().any(|wall| wall.intersection(&probe).is_some());
                    if !collides {
                        out.push((
                            (mx as i64 + dir.dx as i64) as usize,
                            (my as i64 + dir.dy as i64) as usize,
                        ));
                    }
                }
                out
            })
            .collect();
        for (mx, my) in open {
            matrix[my * matrix_size + mx] = 0;
        }

        Self {
            size,
            walls,
            matrix,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn matrix_size(&self) -> usize {
        (2 * self.size + 1) as usize
    }

    pub fn walls(&self) -> &[Line] {
        &self.walls
    }

    /// Whether the matrix node at `(col, row)` is passable.
    pub fn is_open(&self, col: usize, row: usize) -> bool {
        self.matrix[row * self.matrix_size() + col] == 0
    }

    /// Center of the maze in world coordinates, the camera's starting point.
    pub fn center(&self) -> Vec2 {
        let center = (self.size / 2) as f64 + 0.5;
        Vec2::new(center, center)
    }
}

/// A maze plus the camera walking it: the complete state of the slide.
pub struct MazeScene {
    maze: Maze,
    walker: Walker,
}

impl MazeScene {
    pub fn new(size: u32, rng: &mut impl Rng) -> Self {
        let maze = Maze::generate(size, rng);
        let walker = Walker::new(&maze);
        Self { maze, walker }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    /// Advances the camera by `delta` seconds.
    pub fn step(&mut self, delta: f64, rng: &mut impl Rng) {
        self.walker.update(&self.maze, delta, rng);
    }

    /// Traces one frame at the given horizontal resolution.
    pub fn trace_frame(&self, resolution: usize) -> Vec<Option<Column>> {
        Raycaster::new(self.maze.walls(), self.walker.eye_pos(), self.walker.eye_angle())
            .trace_frame(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_matrix_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = Maze::generate(5, &mut rng);
        assert_eq!(maze.matrix_size(), 11);
        assert!(maze.walls().len() >= 4 * 5);
    }

    #[test]
    fn test_cell_nodes_are_open() {
        let mut rng = StdRng::seed_from_u64(2);
        let maze = Maze::generate(6, &mut rng);
        for y in 0..6usize {
            for x in 0..6usize {
                assert!(maze.is_open(2 * x + 1, 2 * y + 1));
            }
        }
    }

    #[test]
    fn test_boundary_stays_walled() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::generate(6, &mut rng);
        let ms = maze.matrix_size();
        for i in 0..ms {
            assert!(!maze.is_open(i, 0));
            assert!(!maze.is_open(i, ms - 1));
            assert!(!maze.is_open(0, i));
            assert!(!maze.is_open(ms - 1, i));
        }
    }
}
