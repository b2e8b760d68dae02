//! Per-column raycasting against the maze wall set.
//!
//! The camera is a planar pinhole: rays fan out from a point behind the eye
//! through an image plane of width [`CAM_SIZE`] centered on the eye. Each
//! horizontal pixel traces one ray and yields a wall slice height, a light
//! falloff and the texture coordinate along the struck wall.

use crate::line::Line;
use crate::vector::Vec2;
use rayon::prelude::*;

/// Maximum view distance, in cells.
pub const Z_FAR: f64 = 13.0;
/// Distance from the projection point to the image plane.
pub const Z_NEAR: f64 = 0.25;
pub const Z_NEAR_SQR: f64 = Z_NEAR * Z_NEAR;
/// Width of the image plane, in cells.
pub const CAM_SIZE: f64 = 0.5;
/// Wall height relative to maze cells.
pub const WALL_HEIGHT: f64 = 1.5;

/// One traced screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    /// Slice height in pixels, before vertical centering.
    pub height: f64,
    /// Light level in `[0, 1]`, falling off with distance.
    pub light: f64,
    /// Texture coordinate along the struck wall, in `[0, 1]`.
    pub texture_u: f64,
}

/// Ray tracer bound to one wall set and one camera pose.
pub struct Raycaster<'a> {
    walls: &'a [Line],
    eye: Vec2,
    right: Vec2,
    cam_origin: Vec2,
}

impl<'a> Raycaster<'a> {
    pub fn new(walls: &'a [Line], eye: Vec2, heading: f64) -> Self {
        let forward = Vec2::from_angle(heading, 1.0);
        let right = forward.right();
        let cam_origin = eye - forward * Z_NEAR;
        Self {
            walls,
            eye,
            right,
            cam_origin,
        }
    }

    /// Traces the column at pixel `x` of a `resolution`-wide frame.
    ///
    /// Returns `None` when the ray clears every wall within [`Z_FAR`]. A wall
    /// closer than [`Z_NEAR`] fills the whole column at full light.
    pub fn trace(&self, x: usize, resolution: usize) -> Option<Column> {
        let d = (x as f64 / (resolution - 1) as f64) - 0.5;
        let ray_origin = self.eye + self.right * (CAM_SIZE * d);

        let mut ray_normal = ray_origin - self.cam_origin;
        let dist_in_cam = ray_normal.norm();
        ray_normal /= dist_in_cam;

        let ray = Line::new(ray_origin, ray_origin + ray_normal * Z_FAR);

        let max = Z_FAR * Z_FAR;
        let mut dist = max;
        let mut u = 0.0;
        for wall in self.walls {
            let Some(candidate) = ray.intersection(wall) else {
                continue;
            };
            let cu = wall.progress_along(candidate);
            let d = (candidate - ray_origin).norm_sqr();
            if d <= Z_NEAR_SQR {
                return Some(Column {
                    height: resolution as f64,
                    light: 1.0,
                    texture_u: cu,
                });
            }
            if d < dist {
                dist = d;
                u = cu;
            }
        }
        if dist >= max {
            return None;
        }
        let dist = dist.sqrt();

        let slope = WALL_HEIGHT / (dist + dist_in_cam);
        Some(Column {
            height: slope * dist_in_cam * resolution as f64,
            light: (1.0 / (dist * 2.0)).min(1.0),
            texture_u: u,
        })
    }

    /// Traces every column of a frame in parallel.
    pub fn trace_frame(&self, resolution: usize) -> Vec<Option<Column>> {
        (0..resolution)
            .into_par_iter()
            .map(|x| self.trace(x, resolution))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_walls() -> Vec<Line> {
        vec![
            Line::of(0.0, 0.0, 4.0, 0.0),
            Line::of(4.0, 0.0, 4.0, 4.0),
            Line::of(4.0, 4.0, 0.0, 4.0),
            Line::of(0.0, 4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_center_column_hits_facing_wall() {
        let walls = box_walls();
        let caster = Raycaster::new(&walls, Vec2::new(2.0, 2.0), 0.0);
        // Odd resolution puts the middle column straight down the heading.
        let column = caster.trace(128, 257).expect("wall ahead");
        // Eye is 2 cells from the +X wall, struck at its midpoint.
        assert!((column.texture_u - 0.5).abs() < 1e-9);
        assert!(column.light > 0.0 && column.light <= 1.0);
        assert!(column.height > 0.0 && column.height < 257.0);
    }

    #[test]
    fn test_open_view_misses() {
        let walls = vec![Line::of(20.0, -10.0, 20.0, 10.0)];
        let caster = Raycaster::new(&walls, Vec2::new(0.0, 0.0), 0.0);
        // Wall is beyond the far plane for every column.
        for x in 0..64 {
            assert!(caster.trace(x, 64).is_none());
        }
    }

    #[test]
    fn test_touching_wall_fills_column() {
        let walls = box_walls();
        let caster = Raycaster::new(&walls, Vec2::new(3.9, 2.0), 0.0);
        let column = caster.trace(32, 64).expect("wall ahead");
        assert_eq!(column.height, 64.0);
        assert_eq!(column.light, 1.0);
    }

    #[test]
    fn test_frame_matches_single_traces() {
        let walls = box_walls();
        let caster = Raycaster::new(&walls, Vec2::new(2.0, 2.0), 1.0);
        let frame = caster.trace_frame(64);
        assert_eq!(frame.len(), 64);
        for (x, column) in frame.iter().enumerate() {
            assert_eq!(*column, caster.trace(x, 64));
        }
    }

    #[test]
    fn test_closer_wall_wins() {
        let mut walls = box_walls();
        walls.push(Line::of(3.0, 1.0, 3.0, 3.0));
        let caster = Raycaster::new(&walls, Vec2::new(2.0, 2.0), 0.0);
        let near = caster.trace(128, 256).expect("wall ahead");

        let far_only = box_walls();
        let far_caster = Raycaster::new(&far_only, Vec2::new(2.0, 2.0), 0.0);
        let far = far_caster.trace(128, 256).expect("wall ahead");
        assert!(near.height > far.height);
        assert!(near.light > far.light);
    }
}
