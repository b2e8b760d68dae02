use crate::vector::Vec2;

const EPSILON: f64 = 1e-8;

/// A canonical, immutable 2D line segment.
///
/// Segments within `1e-8` of horizontal or vertical snap to those variants to
/// avoid ill-conditioned slopes; everything else is stored in slope/intercept
/// form bounded along whichever axis has the larger extent (`bbx` true for x).
/// The `reverse` flag records that the original endpoints were given in
/// decreasing order along the bounding axis; it inverts
/// [`progress_along`](Line::progress_along) but never the geometry itself.
#[derive(Clone, Copy, Debug)]
pub enum Line {
    /// Constant `y = n` over `x` in `[min, max]`.
    Horizontal {
        min: f64,
        max: f64,
        n: f64,
        reverse: bool,
    },
    /// Constant `x = n` over `y` in `[min, max]`.
    Vertical {
        min: f64,
        max: f64,
        n: f64,
        reverse: bool,
    },
    /// `y = m*x + b`, bounded on x if `bbx`, otherwise on y.
    Diagonal {
        min: f64,
        max: f64,
        m: f64,
        b: f64,
        bbx: bool,
        reverse: bool,
    },
}

impl Line {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        let dx = b.x - a.x;
        if dx.abs() <= EPSILON {
            return Line::Vertical {
                min: a.y.min(b.y),
                max: a.y.max(b.y),
                n: (a.x + b.x) / 2.0,
                reverse: b.y < a.y,
            };
        }
        let dy = b.y - a.y;
        if dy.abs() <= EPSILON {
            return Line::Horizontal {
                min: a.x.min(b.x),
                max: a.x.max(b.x),
                n: (a.y + b.y) / 2.0,
                reverse: b.x < a.x,
            };
        }

        let m = dy / dx;
        let lb = a.y - m * a.x;

        if dx >= dy {
            Line::Diagonal {
                min: a.x.min(b.x),
                max: a.x.max(b.x),
                m,
                b: lb,
                bbx: true,
                reverse: b.x < a.x,
            }
        } else {
            Line::Diagonal {
                min: a.y.min(b.y),
                max: a.y.max(b.y),
                m,
                b: lb,
                bbx: false,
                reverse: b.y < a.y,
            }
        }
    }

    pub fn of(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    pub fn reverse(&self) -> bool {
        match *self {
            Line::Horizontal { reverse, .. }
            | Line::Vertical { reverse, .. }
            | Line::Diagonal { reverse, .. } => reverse,
        }
    }

    /// Intersection point of two segments, or `None` when they miss or the
    /// crossing falls outside either segment's bounds.
    ///
    /// Collinear parallel segments (horizontal/horizontal or vertical/vertical
    /// with matching `n`) that overlap report the midpoint of the overlap
    /// range. Wall adjacency never needs the full overlap, so the degenerate
    /// "segment" result is deliberately collapsed to a point.
    pub fn intersection(&self, other: &Line) -> Option<Vec2> {
        match (self, other) {
            (Line::Diagonal { .. }, Line::Diagonal { .. }) => intersect_dd(self, other),
            (Line::Diagonal { .. }, Line::Horizontal { .. }) => intersect_dh(self, other),
            (Line::Horizontal { .. }, Line::Diagonal { .. }) => intersect_dh(other, self),
            (Line::Diagonal { .. }, Line::Vertical { .. }) => intersect_dv(self, other),
            (Line::Vertical { .. }, Line::Diagonal { .. }) => intersect_dv(other, self),
            (Line::Horizontal { .. }, Line::Vertical { .. }) => intersect_hv(self, other),
            (Line::Vertical { .. }, Line::Horizontal { .. }) => intersect_hv(other, self),
            (Line::Horizontal { .. }, Line::Horizontal { .. })
            | (Line::Vertical { .. }, Line::Vertical { .. }) => intersect_parallel(self, other),
        }
    }

    /// Projects `point` onto the bounding axis and normalizes to `[0, 1]`,
    /// flipped when the segment was constructed in reverse. Used to map a
    /// ray/wall hit back to a texture u-coordinate.
    pub fn progress_along(&self, point: Vec2) -> f64 {
        let (min, max, reverse, bound) = match *self {
            Line::Diagonal {
                min,
                max,
                bbx,
                reverse,
                ..
            } => (min, max, reverse, if bbx { point.x } else { point.y }),
            Line::Vertical {
                min, max, reverse, ..
            } => (min, max, reverse, point.y),
            Line::Horizontal {
                min, max, reverse, ..
            } => (min, max, reverse, point.x),
        };

        let mut amt = ((bound - min) / (max - min)).clamp(0.0, 1.0);
        if reverse {
            amt = 1.0 - amt;
        }
        amt
    }

    /// Recovers a representative endpoint pair in canonical (min-first) order.
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        match *self {
            Line::Diagonal {
                min, max, m, b, bbx, ..
            } => {
                if bbx {
                    (
                        Vec2::new(min, m * min + b),
                        Vec2::new(max, m * max + b),
                    )
                } else {
                    (
                        Vec2::new((min - b) / m, min),
                        Vec2::new((max - b) / m, max),
                    )
                }
            }
            Line::Horizontal { min, max, n, .. } => (Vec2::new(min, n), Vec2::new(max, n)),
            Line::Vertical { min, max, n, .. } => (Vec2::new(n, min), Vec2::new(n, max)),
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Line::Diagonal {
                    m: am,
                    b: ab,
                    min: amin,
                    bbx: abbx,
                    ..
                },
                Line::Diagonal {
                    m: bm,
                    b: bb,
                    min: bmin,
                    bbx: bbbx,
                    ..
                },
            ) => am == bm && ab == bb && amin == bmin && abbx == bbbx,
            (
                Line::Horizontal {
                    min: amin,
                    max: amax,
                    n: an,
                    ..
                },
                Line::Horizontal {
                    min: bmin,
                    max: bmax,
                    n: bn,
                    ..
                },
            )
            | (
                Line::Vertical {
                    min: amin,
                    max: amax,
                    n: an,
                    ..
                },
                Line::Vertical {
                    min: bmin,
                    max: bmax,
                    n: bn,
                    ..
                },
            ) => amin == bmin && amax == bmax && an == bn,
            _ => false,
        }
    }
}

fn intersect_hv(h: &Line, v: &Line) -> Option<Vec2> {
    let (Line::Horizontal {
        min: hmin,
        max: hmax,
        n: hn,
        ..
    }, Line::Vertical {
        min: vmin,
        max: vmax,
        n: vn,
        ..
    }) = (h, v)
    else {
        return None;
    };
    if *vn < *hmin || *vn > *hmax {
        return None;
    }
    if *hn < *vmin || *hn > *vmax {
        return None;
    }
    Some(Vec2::new(*vn, *hn))
}

/// Same-axis pair: intersects only when collinear within epsilon, reporting
/// the overlap midpoint.
fn intersect_parallel(a: &Line, b: &Line) -> Option<Vec2> {
    let (amin, amax, an, bmin, bmax, bn, vertical) = match (a, b) {
        (
            Line::Horizontal {
                min: amin,
                max: amax,
                n: an,
                ..
            },
            Line::Horizontal {
                min: bmin,
                max: bmax,
                n: bn,
                ..
            },
        ) => (*amin, *amax, *an, *bmin, *bmax, *bn, false),
        (
            Line::Vertical {
                min: amin,
                max: amax,
                n: an,
                ..
            },
            Line::Vertical {
                min: bmin,
                max: bmax,
                n: bn,
                ..
            },
        ) => (*amin, *amax, *an, *bmin, *bmax, *bn, true),
        _ => return None,
    };

    let lo = amin.max(bmin);
    let hi = amax.min(bmax);
    if lo > hi {
        return None;
    }
    if (an - bn).abs() > EPSILON {
        return None;
    }

    if vertical {
        Some(Vec2::new((an + bn) / 2.0, (lo + hi) / 2.0))
    } else {
        Some(Vec2::new((lo + hi) / 2.0, (an + bn) / 2.0))
    }
}

fn intersect_dd(a: &Line, b: &Line) -> Option<Vec2> {
    let (Line::Diagonal {
        m: am, b: ab, ..
    }, Line::Diagonal {
        m: bm, b: bb, ..
    }) = (a, b)
    else {
        return None;
    };
    // Equal slopes never cross; without this the division yields NaN and
    // NaN passes every bounds comparison.
    if (am - bm).abs() <= EPSILON {
        return None;
    }
    let x = (bb - ab) / (am - bm);
    let y = am * x + ab;
    if !in_bounds_diagonal(a, x, y) {
        return None;
    }
    if !in_bounds_diagonal(b, x, y) {
        return None;
    }
    Some(Vec2::new(x, y))
}

fn intersect_dh(d: &Line, h: &Line) -> Option<Vec2> {
    let (Line::Diagonal { m, b, .. }, Line::Horizontal { min, max, n, .. }) = (d, h) else {
        return None;
    };
    let y = *n;
    let x = (y - b) / m;
    if x < *min || x > *max {
        return None;
    }
    if !in_bounds_diagonal(d, x, y) {
        return None;
    }
    Some(Vec2::new(x, y))
}

fn intersect_dv(d: &Line, v: &Line) -> Option<Vec2> {
    let (Line::Diagonal { m, b, .. }, Line::Vertical { min, max, n, .. }) = (d, v) else {
        return None;
    };
    let x = *n;
    let y = m * x + b;
    if y < *min || y > *max {
        return None;
    }
    if !in_bounds_diagonal(d, x, y) {
        return None;
    }
    Some(Vec2::new(x, y))
}

fn in_bounds_diagonal(d: &Line, x: f64, y: f64) -> bool {
    let Line::Diagonal {
        min, max, bbx, ..
    } = d
    else {
        return false;
    };
    let bound = if *bbx { x } else { y };
    !(bound < *min || bound > *max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(p: Option<Vec2>, x: f64, y: f64) {
        let p = p.expect("expected an intersection");
        assert!((p.x - x).abs() < 1e-9, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_horizontal_canonical_form() {
        let l = Line::of(0.0, 0.0, 10.0, 0.0);
        match l {
            Line::Horizontal { min, max, n, reverse } => {
                assert_eq!(min, 0.0);
                assert_eq!(max, 10.0);
                assert_eq!(n, 0.0);
                assert!(!reverse);
            }
            _ => panic!("expected horizontal mode, got {:?}", l),
        }
    }

    #[test]
    fn test_progress_along_midpoint() {
        let l = Line::of(0.0, 0.0, 10.0, 0.0);
        assert_eq!(l.progress_along(Vec2::new(5.0, 0.0)), 0.5);
        assert_eq!(l.progress_along(Vec2::new(2.5, 0.0)), 0.25);
    }

    #[test]
    fn test_reverse_flips_progress_not_geometry() {
        let fwd = Line::of(0.0, 0.0, 10.0, 0.0);
        let rev = Line::of(10.0, 0.0, 0.0, 0.0);

        assert!(!fwd.reverse());
        assert!(rev.reverse());
        // Same segment either way.
        assert_eq!(fwd.endpoints().0, rev.endpoints().0);
        // Midpoint reads 0.5 from both directions, quarter points swap.
        assert_eq!(rev.progress_along(Vec2::new(5.0, 0.0)), 0.5);
        assert_eq!(fwd.progress_along(Vec2::new(2.5, 0.0)), 0.25);
        assert_eq!(rev.progress_along(Vec2::new(2.5, 0.0)), 0.75);
    }

    #[test]
    fn test_crossing_diagonals() {
        let a = Line::of(0.0, 0.0, 10.0, 10.0);
        let b = Line::of(0.0, 10.0, 10.0, 0.0);
        assert_point(a.intersection(&b), 5.0, 5.0);
    }

    #[test]
    fn test_horizontal_vertical_cross() {
        let h = Line::of(0.0, 5.0, 10.0, 5.0);
        let v = Line::of(3.0, 0.0, 3.0, 10.0);
        assert_point(h.intersection(&v), 3.0, 5.0);
        // Out of the vertical range.
        let v2 = Line::of(3.0, 6.0, 3.0, 10.0);
        assert!(h.intersection(&v2).is_none());
    }

    #[test]
    fn test_diagonal_horizontal_cross() {
        let d = Line::of(0.0, 0.0, 10.0, 10.0);
        let h = Line::of(0.0, 4.0, 10.0, 4.0);
        assert_point(d.intersection(&h), 4.0, 4.0);
    }

    #[test]
    fn test_diagonal_vertical_cross() {
        let d = Line::of(0.0, 0.0, 10.0, 10.0);
        let v = Line::of(7.0, 0.0, 7.0, 10.0);
        assert_point(d.intersection(&v), 7.0, 7.0);
    }

    #[test]
    fn test_collinear_overlap_reports_midpoint() {
        let a = Line::of(0.0, 2.0, 6.0, 2.0);
        let b = Line::of(4.0, 2.0, 10.0, 2.0);
        // Overlap range is [4, 6], so the reported point is its midpoint.
        assert_point(a.intersection(&b), 5.0, 2.0);

        let av = Line::of(1.0, 0.0, 1.0, 6.0);
        let bv = Line::of(1.0, 4.0, 1.0, 10.0);
        assert_point(av.intersection(&bv), 1.0, 5.0);
    }

    #[test]
    fn test_parallel_disjoint_misses() {
        let a = Line::of(0.0, 2.0, 3.0, 2.0);
        let b = Line::of(4.0, 2.0, 10.0, 2.0);
        assert!(a.intersection(&b).is_none());
        // Collinear requires matching n.
        let c = Line::of(0.0, 3.0, 10.0, 3.0);
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_parallel_diagonals_miss() {
        let a = Line::of(0.0, 0.0, 10.0, 10.0);
        let shifted = Line::of(0.0, 1.0, 10.0, 11.0);
        assert!(a.intersection(&shifted).is_none());
        assert!(shifted.intersection(&a).is_none());
        // A segment never intersects itself with a point.
        assert!(a.intersection(&a).is_none());
        let copy = Line::of(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&copy).is_none());
    }

    #[test]
    fn test_intersection_symmetry() {
        let lines = [
            Line::of(0.0, 0.0, 10.0, 10.0),
            Line::of(0.0, 10.0, 10.0, 0.0),
            Line::of(0.0, 5.0, 10.0, 5.0),
            Line::of(5.0, 0.0, 5.0, 10.0),
            Line::of(1.0, 0.0, 9.0, 4.0),
        ];
        for a in &lines {
            for b in &lines {
                match (a.intersection(b), b.intersection(a)) {
                    (Some(p), Some(q)) => {
                        assert!((p.x - q.x).abs() < 1e-9 && (p.y - q.y).abs() < 1e-9);
                    }
                    (None, None) => {}
                    other => panic!("asymmetric intersection: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_near_axis_snap() {
        let l = Line::of(0.0, 0.0, 10.0, 1e-9);
        assert!(matches!(l, Line::Horizontal { .. }));
        let l = Line::of(0.0, 0.0, 1e-9, 10.0);
        assert!(matches!(l, Line::Vertical { .. }));
    }

    #[test]
    fn test_equality_ignores_reverse() {
        let fwd = Line::of(0.0, 0.0, 10.0, 0.0);
        let rev = Line::of(10.0, 0.0, 0.0, 0.0);
        assert_eq!(fwd, rev);
    }
}
