use crate::line::Line;
use rand::Rng;

/// A rectangular region of the maze grid, alive only during generation.
///
/// Each split alternates its orientation bias (`hbias`) so successive cuts
/// change axis, avoiding long straight corridors. Cells are consumed once
/// they can no longer produce a child larger than 1x1.
#[derive(Clone, Copy, Debug)]
pub struct MazeCell {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub hbias: bool,
}

impl MazeCell {
    pub fn root(size: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: size,
            h: size,
            hbias: true,
        }
    }

    fn child(x: u32, y: u32, w: u32, h: u32, hbias: bool) -> Self {
        Self { x, y, w, h, hbias }
    }

    /// Cuts this cell along its biased axis at a random position.
    ///
    /// Wall segments cover every unit of the cut except one randomly chosen
    /// gap, so each pair of adjacent children stays connected by exactly one
    /// opening. Returns the 0-2 children still worth splitting.
    pub fn split(&self, rng: &mut impl Rng, output: &mut Vec<Line>) -> Vec<MazeCell> {
        let vertical = if self.hbias { self.w > 1 } else { self.h < 2 };

        let dimension = if vertical { self.w } else { self.h };
        let other_dimension = if vertical { self.h } else { self.w };
        let asize = if dimension > 1 {
            rng.gen_range(1..dimension)
        } else {
            1
        };
        let bsize = dimension - asize;

        let mut ret = Vec::new();
        if asize > 1 || other_dimension > 1 {
            if vertical {
                ret.push(MazeCell::child(self.x, self.y, asize, self.h, !self.hbias));
            } else {
                ret.push(MazeCell::child(self.x, self.y, self.w, asize, !self.hbias));
            }
        }
        if bsize > 1 || other_dimension > 1 {
            if vertical {
                ret.push(MazeCell::child(
                    self.x + asize,
                    self.y,
                    bsize,
                    self.h,
                    !self.hbias,
                ));
            } else {
                ret.push(MazeCell::child(
                    self.x,
                    self.y + asize,
                    self.w,
                    bsize,
                    !self.hbias,
                ));
            }
        }

        let mut spaces: Vec<u32> = (0..other_dimension).collect();
        if !spaces.is_empty() {
            let gap = rng.gen_range(0..spaces.len());
            spaces.remove(gap);
        }

        for space in spaces {
            let (x, y, space) = (self.x as f64, self.y as f64, space as f64);
            let asize = asize as f64;
            if vertical {
                output.push(Line::of(x + asize, y + space, x + asize, y + space + 1.0));
            } else {
                output.push(Line::of(x + space, y + asize, x + space + 1.0, y + asize));
            }
        }

        ret
    }

    /// The cell's outer boundary as unit-length wall segments.
    pub fn outline(&self) -> Vec<Line> {
        let mut ret = Vec::with_capacity(2 * (self.w + self.h) as usize);
        let (x, y) = (self.x as f64, self.y as f64);
        let (w, h) = (self.w as f64, self.h as f64);
        for xv in 0..self.w {
            let xv = xv as f64;
            ret.push(Line::of(x + xv, y, x + xv + 1.0, y));
            ret.push(Line::of(x + xv, y + h, x + xv + 1.0, y + h));
        }
        for yv in 0..self.h {
            let yv = yv as f64;
            ret.push(Line::of(x, y + yv, x, y + yv + 1.0));
            ret.push(Line::of(x + w, y + yv, x + w, y + yv + 1.0));
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_outline_segment_count() {
        let cell = MazeCell::root(9);
        assert_eq!(cell.outline().len(), 4 * 9);
    }

    #[test]
    fn test_unit_cell_is_terminal() {
        let mut rng = StdRng::seed_from_u64(7);
        let cell = MazeCell::child(3, 3, 1, 1, true);
        let mut walls = Vec::new();
        let children = cell.split(&mut rng, &mut walls);
        assert!(children.is_empty());
        assert!(walls.is_empty());
    }

    #[test]
    fn test_split_leaves_one_gap() {
        let mut rng = StdRng::seed_from_u64(42);
        // A 2x4 cell with horizontal bias splits vertically down the middle;
        // the cut is 4 units long and must leave exactly one opening.
        let cell = MazeCell::child(0, 0, 2, 4, true);
        let mut walls = Vec::new();
        let children = cell.split(&mut rng, &mut walls);
        assert_eq!(children.len(), 2);
        assert_eq!(walls.len(), 3);
    }

    #[test]
    fn test_children_partition_parent() {
        let mut rng = StdRng::seed_from_u64(3);
        let cell = MazeCell::root(8);
        let mut walls = Vec::new();
        let children = cell.split(&mut rng, &mut walls);
        let area: u32 = children.iter().map(|c| c.w * c.h).sum();
        assert_eq!(area, 64);
        for child in children {
            assert_eq!(child.hbias, !cell.hbias);
        }
    }
}
