use crate::maze::Maze;
use crate::vector::Vec2;
use rand::Rng;
use std::f64::consts::PI;

const TWO_PI: f64 = PI * 2.0;

/// One of the four axis-aligned movement choices.
#[derive(Debug, Clone, Copy)]
pub struct MoveDirection {
    /// Heading when moving this way, radians.
    pub angle: f64,
    /// Unit step in world space.
    pub vector: Vec2,
    /// Matrix step, matching `vector`.
    pub dx: i32,
    pub dy: i32,
}

/// +X, +Y, -X, -Y.
pub const DIRECTIONS: [MoveDirection; 4] = [
    MoveDirection {
        angle: 0.0,
        vector: Vec2 { x: 1.0, y: 0.0 },
        dx: 1,
        dy: 0,
    },
    MoveDirection {
        angle: PI / 2.0,
        vector: Vec2 { x: 0.0, y: 1.0 },
        dx: 0,
        dy: 1,
    },
    MoveDirection {
        angle: PI,
        vector: Vec2 { x: -1.0, y: 0.0 },
        dx: -1,
        dy: 0,
    },
    MoveDirection {
        angle: PI * 3.0 / 2.0,
        vector: Vec2 { x: 0.0, y: -1.0 },
        dx: 0,
        dy: -1,
    },
];

/// Movement choices ordered by preference for the given heading. The facing
/// direction comes first and its reverse last, so the walker prefers to keep
/// going and only turns around at dead ends.
pub fn sorted_directions(angle: f64) -> [MoveDirection; 4] {
    let norm = angle.rem_euclid(TWO_PI) * (200.0 / TWO_PI);
    let order: [usize; 4] = if norm <= 25.0 || norm >= 175.0 {
        [0, 3, 1, 2]
    } else if norm <= 75.0 {
        [1, 0, 2, 3]
    } else if norm <= 125.0 {
        [2, 1, 3, 0]
    } else {
        [3, 2, 0, 1]
    };
    order.map(|i| DIRECTIONS[i])
}

/// The camera wandering the maze.
///
/// Moves cell to cell along the connectivity matrix, easing position linearly
/// and heading with a smoothstep so turns settle before the next junction.
/// A per-node boredom counter biases choices toward gaps it has not used
/// recently.
pub struct Walker {
    pos: Vec2,
    heading: f64,
    move_pos_start: Vec2,
    move_pos_end: Vec2,
    move_heading_start: f64,
    move_heading_end: f64,
    progress: f64,
    boredom: Vec<u32>,
    matrix_size: usize,
}

impl Walker {
    /// Starts at the center cell facing +X, with the first update landing
    /// directly on a junction.
    pub fn new(maze: &Maze) -> Self {
        let center = maze.center();
        let matrix_size = maze.matrix_size();
        Self {
            pos: center,
            heading: 0.0,
            move_pos_start: center,
            move_pos_end: center,
            move_heading_start: 0.0,
            move_heading_end: 0.0,
            progress: 2.0,
            boredom: vec![1; matrix_size * matrix_size],
            matrix_size,
        }
    }

    pub fn eye_pos(&self) -> Vec2 {
        self.pos
    }

    pub fn eye_angle(&self) -> f64 {
        self.heading
    }

    pub fn update(&mut self, maze: &Maze, delta: f64, rng: &mut impl Rng) {
        self.progress += delta * 1.6;

        let d = self.progress;
        if d >= 1.0 {
            self.pos = self.move_pos_end;
            self.heading = self.move_heading_end.rem_euclid(TWO_PI);

            self.move_pos_start = self.pos;
            self.move_heading_start = self.heading;

            self.on_junction(maze, rng);

            self.progress = 0.0;
        } else {
            self.pos = Vec2::lerp(self.move_pos_start, self.move_pos_end, d);
            let mut u = (d * 1.5).min(1.0);
            u = (3.0 * u * u) - (2.0 * u * u * u);
            self.heading = self.move_heading_start * (1.0 - u) + self.move_heading_end * u;
        }
    }

    /// Picks the next move target. Open gaps around the current node are
    /// weighted down by how often they have been taken; turning around is
    /// only considered when nothing else is open.
    fn on_junction(&mut self, maze: &Maze, rng: &mut impl Rng) {
        let dirs = sorted_directions(self.heading);
        let (mx, my) = self.matrix_pos();
        self.boredom[my * self.matrix_size + mx] += 1;

        let mut valid: Vec<MoveDirection> = Vec::new();
        let mut allow_backward = true;
        for (i, dir) in dirs.iter().enumerate() {
            let gx = (mx as i32 + dir.dx) as usize;
            let gy = (my as i32 + dir.dy) as usize;
            if !maze.is_open(gx, gy) {
                continue;
            }
            if i < 3 {
                allow_backward = false;
            } else if !allow_backward {
                continue;
            }

            let boredom = self.boredom[gy * self.matrix_size + gx].min(4);
            let weight = 26 - boredom * boredom;
            for _ in 0..weight {
                valid.push(*dir);
            }
        }

        if valid.is_empty() {
            self.move_pos_end = self.pos;
            self.move_heading_end = self.heading + PI;
            return;
        }

        let choice = if valid.len() == 1 {
            valid[0]
        } else {
            valid[rng.gen_range(0..valid.len() - 1)]
        };
        self.move_pos_end = self.pos + choice.vector;

        // Interpolate toward whichever unwinding of the target angle is
        // closest to the current heading.
        let candidates = [choice.angle - TWO_PI, choice.angle, choice.angle + TWO_PI];
        let mut min = candidates[0];
        let mut min_diff = f64::INFINITY;
        for candidate in candidates {
            let diff = (candidate - self.heading).abs();
            if diff < min_diff {
                min_diff = diff;
                min = candidate;
            }
        }
        self.move_heading_end = min;
    }

    /// Matrix node under the eye, clamped to the interior.
    fn matrix_pos(&self) -> (usize, usize) {
        let limit = self.matrix_size as i64 - 2;
        let mx = (2 * self.pos.x.floor() as i64 + 1).clamp(1, limit);
        let my = (2 * self.pos.y.floor() as i64 + 1).clamp(1, limit);
        (mx as usize, my as usize)
    }
}
