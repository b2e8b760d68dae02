//! The host drawing-surface seam.
//!
//! The crate computes geometry; the host page (or a test harness) owns the
//! pixels. [`Surface`] is the minimum contract the frame composers need:
//! rectangles, filled paths, stroked segments, gradients and image blits.
//! [`Recorder`] captures the command stream for tests and the SVG demos.

use crate::color::Rgb;
use crate::vector::Vec2;

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// A host-owned image: an opaque id plus its natural dimensions. `tiled`
/// marks textures the host has prepared for seamless horizontal scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub tiled: bool,
}

/// Color stop: offset in `[0, 1]`, color, alpha in `[0, 1]`.
pub type GradientStop = (f64, Rgb, f64);

/// Fill style for rectangles and paths.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgb),
    /// Solid color with alpha in `[0, 1]`.
    Alpha(Rgb, f64),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

/// Blend mode for image blits, matching the compositor operations the
/// original canvas renderers rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Over,
    Multiply,
}

/// The 2D drawing surface supplied by the host.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fills a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint);

    /// Strokes a polyline; `closed` joins the last point back to the first.
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, paint: &Paint);

    /// Strokes independent segments as endpoint pairs.
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], paint: &Paint);

    fn fill_circle(&mut self, center: Vec2, radius: f64, paint: &Paint);

    /// Copies `src` (image pixels) into `dst` (surface pixels), scaling as
    /// needed, blended at `alpha`.
    fn blit(&mut self, image: ImageRef, src: Rect, dst: Rect, alpha: f64, blend: Blend);
}

/// Every command a [`Surface`] can receive, by value.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FillRect(Rect, Paint),
    FillPolygon(Vec<Vec2>, Paint),
    StrokePath(Vec<Vec2>, bool, Paint),
    StrokeSegments(Vec<(Vec2, Vec2)>, Paint),
    FillCircle(Vec2, f64, Paint),
    Blit(ImageRef, Rect, Rect, f64, Blend),
}

/// A surface that records its command stream instead of rasterizing.
#[derive(Default)]
pub struct Recorder {
    pub commands: Vec<Command>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(Command::FillRect(rect, paint.clone()));
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        self.commands
            .push(Command::FillPolygon(points.to_vec(), paint.clone()));
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, paint: &Paint) {
        self.commands
            .push(Command::StrokePath(points.to_vec(), closed, paint.clone()));
    }

    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], paint: &Paint) {
        self.commands
            .push(Command::StrokeSegments(segments.to_vec(), paint.clone()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, paint: &Paint) {
        self.commands
            .push(Command::FillCircle(center, radius, paint.clone()));
    }

    fn blit(&mut self, image: ImageRef, src: Rect, dst: Rect, alpha: f64, blend: Blend) {
        self.commands
            .push(Command::Blit(image, src, dst, alpha, blend));
    }
}
