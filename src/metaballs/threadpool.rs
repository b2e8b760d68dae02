//! Worker-pool contour solver.
//!
//! Each worker owns a [`LocalSolver`] over one shared packed case table and
//! listens on its own request channel; results come back over a single
//! response channel tagged with a random job id. Scanline jobs round-robin
//! across workers from a random head offset each frame, so no worker is
//! systematically stuck with the dense middle rows.

use crate::metaballs::contour;
use crate::metaballs::solver::{ContourSolver, LocalSolver, Polygon};
use crate::metaballs::MetaBall;
use rand::Rng;
use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

enum Request {
    Frame {
        balls: Vec<MetaBall>,
        invert: bool,
    },
    Line {
        job: u32,
        y: usize,
        cell_count: usize,
        pad: [f64; 2],
        canvas_size: [f64; 2],
    },
}

struct Response {
    job: u32,
    polys: Vec<Polygon>,
}

pub struct ThreadPoolSolver {
    pool_size: usize,
    senders: Vec<mpsc::Sender<Request>>,
    responses: mpsc::Receiver<Response>,
    handles: Vec<thread::JoinHandle<()>>,
    head: usize,
    active: bool,
}

impl ThreadPoolSolver {
    /// Spawns `pool_size` workers (at least one), each primed with the
    /// shared case table.
    pub fn new(cell_size: f64, threshold: f64, pool_size: usize) -> Self {
        let pool_size = pool_size.max(1);
        let table: Arc<[u8; 72]> = Arc::new(contour::pack());

        let (response_tx, responses) = mpsc::channel::<Response>();
        let mut senders = Vec::with_capacity(pool_size);
        let mut handles = Vec::with_capacity(pool_size);
        for i in 0..pool_size {
            let (tx, rx) = mpsc::channel::<Request>();
            let responses = response_tx.clone();
            let table = Arc::clone(&table);
            handles.push(thread::spawn(move || {
                log::debug!("contour worker {i} starting");
                let mut solver = LocalSolver::with_table(cell_size, threshold, table);
                while let Ok(request) = rx.recv() {
                    match request {
                        Request::Frame { balls, invert } => solver.start_frame(&balls, invert),
                        Request::Line {
                            job,
                            y,
                            cell_count,
                            pad,
                            canvas_size,
                        } => {
                            let polys = solver.solve_line(y, cell_count, pad, canvas_size);
                            if responses.send(Response { job, polys }).is_err() {
                                break;
                            }
                        }
                    }
                }
                log::debug!("contour worker {i} exiting");
            }));
            senders.push(tx);
        }

        Self {
            pool_size,
            senders,
            responses,
            handles,
            head: 0,
            active: true,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}

impl ContourSolver for ThreadPoolSolver {
    fn start_frame(&mut self, balls: &[MetaBall], invert: bool) {
        for sender in &self.senders {
            let _ = sender.send(Request::Frame {
                balls: balls.to_vec(),
                invert,
            });
        }
    }

    fn solve(&mut self, cell_count: usize, pad: [f64; 2], canvas_size: [f64; 2]) -> Vec<Polygon> {
        if !self.active {
            return Vec::new();
        }
        let mut rng = rand::thread_rng();
        self.head = (self.head + rng.gen_range(0..self.pool_size)) % self.pool_size;

        let mut jobs: HashMap<u32, usize> = HashMap::with_capacity(cell_count);
        for y in 0..cell_count {
            let mut job: u32 = rng.gen();
            while jobs.contains_key(&job) {
                job = rng.gen();
            }

            let request = Request::Line {
                job,
                y,
                cell_count,
                pad,
                canvas_size,
            };
            if self.senders[self.head].send(request).is_ok() {
                jobs.insert(job, y);
            }
            self.head = (self.head + 1) % self.pool_size;
        }

        let mut rows: Vec<Vec<Polygon>> = vec![Vec::new(); cell_count];
        while !jobs.is_empty() {
            match self.responses.recv() {
                Ok(Response { job, polys }) => {
                    if let Some(y) = jobs.remove(&job) {
                        rows[y] = polys;
                    }
                }
                // All workers gone; return what completed.
                Err(_) => break,
            }
        }
        rows.into_iter().flatten().collect()
    }

    fn dispose(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.senders.clear();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadPoolSolver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metaballs::{CELL_SIZE, THRESHOLD};
    use crate::vector::Vec2;

    fn test_balls() -> Vec<MetaBall> {
        vec![
            MetaBall {
                id: 0,
                pos: Vec2::new(40.0, 50.0),
                velocity: Vec2::ZERO,
                radius: 0.5,
            },
            MetaBall {
                id: 1,
                pos: Vec2::new(60.0, 55.0),
                velocity: Vec2::ZERO,
                radius: 0.3,
            },
        ]
    }

    #[test]
    fn test_matches_local_solver() {
        let balls = test_balls();
        let dim = 16.0 * CELL_SIZE;

        let mut local = LocalSolver::new(CELL_SIZE, THRESHOLD);
        local.start_frame(&balls, false);
        let expected = local.solve(16, [4.0, 7.0], [dim, dim]);

        let mut pool = ThreadPoolSolver::new(CELL_SIZE, THRESHOLD, 4);
        pool.start_frame(&balls, false);
        let actual = pool.solve(16, [4.0, 7.0], [dim, dim]);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_zero_pool_size_clamps_to_one() {
        let pool = ThreadPoolSolver::new(CELL_SIZE, THRESHOLD, 0);
        assert_eq!(pool.pool_size(), 1);
    }

    #[test]
    fn test_disposed_pool_solves_nothing() {
        let mut pool = ThreadPoolSolver::new(CELL_SIZE, THRESHOLD, 2);
        pool.start_frame(&test_balls(), false);
        pool.dispose();
        assert!(pool.solve(8, [0.0, 0.0], [144.0, 144.0]).is_empty());
    }

    #[test]
    fn test_consecutive_frames() {
        let mut pool = ThreadPoolSolver::new(CELL_SIZE, THRESHOLD, 3);
        let dim = 12.0 * CELL_SIZE;

        pool.start_frame(&test_balls(), false);
        let first = pool.solve(12, [0.0, 0.0], [dim, dim]);
        assert!(!first.is_empty());

        let mut moved = test_balls();
        moved[0].pos = Vec2::new(45.0, 50.0);
        pool.start_frame(&moved, false);
        let second = pool.solve(12, [0.0, 0.0], [dim, dim]);
        assert!(!second.is_empty());
        assert_ne!(first, second);
    }
}
