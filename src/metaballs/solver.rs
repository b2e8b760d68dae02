use crate::metaballs::contour::{self, ContourPoint, CORNER_OFFSETS};
use crate::metaballs::MetaBall;
use crate::vector::Vec2;
use std::collections::HashMap;
use std::sync::Arc;

/// A contour polygon in canvas coordinates, wound as emitted by the case
/// table.
pub type Polygon = Vec<Vec2>;

/// Grid cell edge length in canvas pixels.
pub const CELL_SIZE: f64 = 18.0;
/// Field threshold separating inside from outside.
pub const THRESHOLD: f64 = 0.02025;

/// Contours one frame of the metaball field.
///
/// `start_frame` fixes the ball set for the frame; `solve` contours the full
/// grid. `pad` is the left/top overhang of the square grid over the canvas
/// and `canvas_size` its width/height, both in pixels; rows and cells that
/// fall entirely outside the canvas are skipped.
pub trait ContourSolver {
    fn start_frame(&mut self, balls: &[MetaBall], invert: bool);

    fn solve(&mut self, cell_count: usize, pad: [f64; 2], canvas_size: [f64; 2]) -> Vec<Polygon>;

    /// Releases any held resources; further `solve` calls yield nothing.
    fn dispose(&mut self) {}
}

/// The in-process solver, and the unit of work run by each pool worker.
pub struct LocalSolver {
    cell_size: f64,
    threshold: f64,
    contours: Arc<[u8; 72]>,
    balls: Vec<MetaBall>,
    invert: bool,
    cache: HashMap<u64, f64>,
}

impl LocalSolver {
    pub fn new(cell_size: f64, threshold: f64) -> Self {
        Self::with_table(cell_size, threshold, Arc::new(contour::pack()))
    }

    /// Builds a solver over an existing packed case table, shared between
    /// pool workers.
    pub fn with_table(cell_size: f64, threshold: f64, contours: Arc<[u8; 72]>) -> Self {
        Self {
            cell_size,
            threshold,
            contours,
            balls: Vec::new(),
            invert: false,
            cache: HashMap::new(),
        }
    }

    /// Contours one grid row.
    pub fn solve_line(
        &mut self,
        y: usize,
        cell_count: usize,
        pad: [f64; 2],
        canvas_size: [f64; 2],
    ) -> Vec<Polygon> {
        let [canvas_width, canvas_height] = canvas_size;
        let [pad_left, pad_top] = pad;

        let mut ret: Vec<Polygon> = Vec::new();

        let top = (y as f64 * self.cell_size) - pad_top;
        let bottom = top + self.cell_size;
        if bottom < 0.0 || top > canvas_height {
            return ret;
        }

        // Runs of fully-covered cells collapse into one rectangle.
        let mut stripe: Option<(usize, usize)> = None;
        for x in 0..cell_count {
            let left = (x as f64 * self.cell_size) - pad_left;
            let right = left + self.cell_size;
            if right < 0.0 {
                continue;
            }
            if left > canvas_width {
                break;
            }

            let full = self.solve_cell(
                x,
                y,
                cell_count,
                Vec2::new(left, top),
                Vec2::new(right, bottom),
                &mut ret,
            );
            if full {
                stripe = Some(match stripe {
                    Some((start, _)) => (start, x),
                    None => (x, x),
                });
            } else if let Some((start, end)) = stripe.take() {
                ret.push(self.stripe_rect(start, end, pad_left, top, bottom));
            }
        }
        if let Some((start, end)) = stripe {
            ret.push(self.stripe_rect(start, end, pad_left, top, bottom));
        }

        ret
    }

    fn stripe_rect(&self, start: usize, end: usize, pad_left: f64, top: f64, bottom: f64) -> Polygon {
        let ax = (start as f64 * self.cell_size) - pad_left;
        let bx = (end as f64 * self.cell_size) - pad_left + self.cell_size;
        vec![
            Vec2::new(ax, top),
            Vec2::new(bx, top),
            Vec2::new(bx, bottom),
            Vec2::new(ax, bottom),
        ]
    }

    /// Contours one cell into `polys`. Returns true when the cell is fully
    /// inside (case 15), leaving it to the caller's stripe merge.
    fn solve_cell(
        &mut self,
        x: usize,
        y: usize,
        cell_count: usize,
        canvas_mins: Vec2,
        canvas_maxs: Vec2,
        polys: &mut Vec<Polygon>,
    ) -> bool {
        let mut corner_weights = [0.0f64; 4];
        let mut flag = 0u8;
        for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
            let weight = self.evaluate(
                x as u32 + offset.x as u32,
                y as u32 + offset.y as u32,
                cell_count,
            );
            corner_weights[i] = weight;
            let inside = if self.invert {
                weight <= self.threshold
            } else {
                weight >= self.threshold
            };
            if inside {
                flag |= 1 << (3 - i);
            }
        }
        if flag == 0 {
            return false;
        }
        if flag == 15 {
            return true;
        }

        let contour = contour::unpack_entry(&self.contours, flag);
        let mut points: Polygon = Vec::with_capacity(contour.len());
        for point in contour {
            match point {
                ContourPoint::Corner(c) => points.push(CORNER_OFFSETS[c as usize]),
                ContourPoint::Edge(a, b) => {
                    let av = CORNER_OFFSETS[a as usize];
                    let aw = corner_weights[a as usize];
                    let bv = CORNER_OFFSETS[b as usize];
                    let bw = corner_weights[b as usize];
                    // A ball centered exactly on a grid vertex evaluates
                    // to infinity there; the crossing degenerates to the
                    // finite endpoint instead of interpolating to NaN.
                    let d = if !aw.is_finite() {
                        1.0
                    } else if !bw.is_finite() {
                        0.0
                    } else {
                        (self.threshold - aw) / (bw - aw)
                    };
                    points.push(bv * d + av * (1.0 - d));
                }
            }
        }
        for point in points.iter_mut() {
            *point = Vec2::xy_lerp(canvas_mins, canvas_maxs, *point);
        }

        polys.push(points);
        false
    }

    /// Field strength at a grid vertex, memoized per frame.
    fn evaluate(&mut self, grid_x: u32, grid_y: u32, cell_count: usize) -> f64 {
        let key = ((grid_x as u64) << 32) | grid_y as u64;
        if let Some(&value) = self.cache.get(&key) {
            return value;
        }

        let factor = 100.0 / cell_count as f64;
        let pos = Vec2::new(grid_x as f64 * factor, grid_y as f64 * factor);
        let mut value = 0.0;
        for ball in &self.balls {
            let d = (pos - ball.pos).norm_sqr();
            if d < 1e-9 {
                value = f64::INFINITY;
                break;
            }
            value += ball.radius / d;
        }
        self.cache.insert(key, value);
        value
    }
}

impl ContourSolver for LocalSolver {
    fn start_frame(&mut self, balls: &[MetaBall], invert: bool) {
        self.balls = balls.to_vec();
        self.invert = invert;
        self.cache.clear();
    }

    fn solve(&mut self, cell_count: usize, pad: [f64; 2], canvas_size: [f64; 2]) -> Vec<Polygon> {
        let mut ret = Vec::new();
        for y in 0..cell_count {
            ret.extend(self.solve_line(y, cell_count, pad, canvas_size));
        }
        ret
    }

    fn dispose(&mut self) {
        self.cache.clear();
    }
}
