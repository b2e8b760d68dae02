use crate::vector::Vec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Balls spawned per simulation.
pub const BALL_COUNT: usize = 8;

/// One ball of the field. `id` keeps self-interaction out of the pairwise
/// pass and survives transport to worker threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetaBall {
    pub id: u32,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
}

/// Ball dynamics in the 100x100 world.
///
/// Balls repel each other at close range and are pulled back toward a
/// movable center once they stray, so the blob drifts but never disperses.
pub struct Simulation {
    balls: Vec<MetaBall>,
    center: Vec2,
}

impl Simulation {
    /// Spawns [`BALL_COUNT`] balls on a random polar distribution around the
    /// world center, with initial velocity pointing back inward.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut balls = Vec::with_capacity(BALL_COUNT);
        for i in 0..BALL_COUNT as u32 {
            let ang = rng.gen::<f64>() * TAU;
            let mag = rng.gen::<f64>().powi(2) * 40.0;
            let (sin, cos) = ang.sin_cos();
            let vel_mag = rng.gen::<f64>();
            balls.push(MetaBall {
                id: i,
                pos: Vec2::new(50.0 + cos * mag, 50.0 + sin * mag),
                velocity: Vec2::new(-cos * 2.5 * vel_mag, -sin * 2.5 * vel_mag),
                radius: 0.15 + 0.4 * rng.gen::<f64>(),
            });
        }
        Self {
            balls,
            center: Vec2::new(50.0, 50.0),
        }
    }

    pub fn balls(&self) -> &[MetaBall] {
        &self.balls
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Eases the attraction center toward `target` (world coordinates),
    /// the hook for cursor following.
    pub fn retarget(&mut self, target: Vec2, delta: f64) {
        self.center = Vec2::lerp(self.center, target, delta * 2.5);
    }

    /// Advances the simulation by `delta` seconds.
    ///
    /// Balls update in sequence, each seeing the already-moved positions of
    /// its predecessors within the same step.
    pub fn step(&mut self, delta: f64) {
        for i in 0..self.balls.len() {
            let mut ball = self.balls[i];
            ball.velocity *= (1.0 - delta * 0.55).max(0.5);

            for other in &self.balls {
                if other.id == ball.id {
                    continue;
                }
                let mut away = ball.pos - other.pos;
                let mut dist = away.norm_sqr();
                let sum = ball.radius + other.radius * 1.2;
                if dist <= 1e-9 || dist >= sum * sum {
                    continue;
                }
                dist = dist.sqrt();
                away /= dist;

                let overlap = (sum - dist) / sum;
                ball.velocity += away * ((overlap - 0.5).powi(2) * 80.0 * delta);
            }

            let mut inward = self.center - ball.pos;
            let mut center_dist = inward.norm_sqr();
            if center_dist >= 100.0 {
                center_dist = center_dist.sqrt();
                inward /= center_dist;
                let power = ((center_dist - 10.0) / 40.0).min(1.0);

                ball.velocity += inward * (180.0 * delta * power.powi(3));
            }

            ball.pos += ball.velocity * (delta * 48.0);
            self.balls[i] = ball;
        }
    }
}
