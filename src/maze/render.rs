//! Frame composition for the maze view and its minimap.
//!
//! Output goes through the [`Surface`] seam as square frames of `size`
//! pixels. The view is a ceiling/floor gradient, an optional scrolling
//! ceiling texture drawn row by row with fake perspective, and the traced
//! wall columns. The minimap strokes the wall set with a view cone.

use crate::color::{Hsv, Rgb};
use crate::maze::raycast::{CAM_SIZE, Z_NEAR};
use crate::maze::MazeScene;
use crate::surface::{Blend, ImageRef, Paint, Rect, Surface};
use crate::vector::Vec2;
use rand::Rng;
use std::f64::consts::PI;

pub struct MazeRenderer {
    ceiling_color: Rgb,
    wall_color: Rgb,
    ceiling_image: Option<ImageRef>,
    wall_image: Option<ImageRef>,
    ceiling_alpha: f64,
    wall_alpha: f64,
    ceiling_scroll: f64,
}

impl MazeRenderer {
    /// Picks a random ceiling hue; walls get the complementary hue.
    pub fn new(rng: &mut impl Rng) -> Self {
        let ceiling = Hsv::random_hue(rng);
        Self {
            ceiling_color: ceiling.to_rgb(),
            wall_color: ceiling.complement().to_rgb(),
            ceiling_image: None,
            wall_image: None,
            ceiling_alpha: 0.0,
            wall_alpha: 0.0,
            ceiling_scroll: 0.0,
        }
    }

    /// Textures fade in from the moment the host provides them.
    pub fn set_ceiling_image(&mut self, image: ImageRef) {
        self.ceiling_image = Some(image);
    }

    pub fn set_wall_image(&mut self, image: ImageRef) {
        self.wall_image = Some(image);
    }

    pub fn ceiling_color(&self) -> Rgb {
        self.ceiling_color
    }

    pub fn wall_color(&self) -> Rgb {
        self.wall_color
    }

    /// Composes one first-person frame of `size` x `size` pixels.
    pub fn render_view(
        &mut self,
        surface: &mut impl Surface,
        scene: &MazeScene,
        size: usize,
        delta: f64,
    ) {
        let sizef = size as f64;
        surface.fill_rect(
            Rect::new(0.0, 0.0, sizef, sizef),
            &Paint::Linear {
                from: Vec2::new(0.0, 0.0),
                to: Vec2::new(0.0, sizef),
                stops: vec![
                    (0.0, self.ceiling_color, 1.0),
                    (0.5, Rgb::BLACK, 1.0),
                    (1.0, self.ceiling_color, 1.0),
                ],
            },
        );

        self.ceiling_scroll = (self.ceiling_scroll + delta * 0.135) % 1.0;
        let h_scroll = (-scene.walker().eye_angle()).rem_euclid(PI) / PI;
        if let Some(img) = self.ceiling_image {
            self.ceiling_alpha = (self.ceiling_alpha + delta).min(1.0);
            let img_w = img.width as f64;
            let img_h = img.height as f64;
            for y in 0..size {
                let scroll = if (y as f64) < sizef / 2.0 {
                    self.ceiling_scroll
                } else {
                    1.0 - self.ceiling_scroll
                };
                let img_y = ((y as f64 / (sizef - 1.0) + scroll) % 1.0) * (img_h - 1.0);
                // Rows near the horizon sample a wider strip of the texture,
                // which reads as depth.
                let distance = 1.0 - ((y as f64 - sizef * 0.5).abs() / (sizef * 0.5));
                let width = (-1.0 / (distance - 2.0)) * img_w;
                let mut img_x = (img_w - width) / 2.0;
                if img.tiled {
                    img_x += img_w * h_scroll;
                }
                surface.blit(
                    img,
                    Rect::new(img_x, img_y, width, 1.0),
                    Rect::new(0.0, y as f64, sizef, 1.0),
                    self.ceiling_alpha,
                    Blend::Multiply,
                );
            }
        }

        if self.wall_image.is_some() {
            self.wall_alpha = (self.wall_alpha + delta).min(1.0);
        }
        for (x, column) in scene.trace_frame(size).into_iter().enumerate() {
            let Some(column) = column else {
                continue;
            };

            let top = ((sizef - column.height) / 2.0).floor();
            surface.fill_rect(
                Rect::new(x as f64, top, 1.0, column.height),
                &Paint::Solid(Rgb::lerp(self.wall_color, Rgb::BLACK, 1.0 - column.light)),
            );

            if let Some(img) = self.wall_image {
                let img_x = column.texture_u * (img.width as f64 - 1.0);
                surface.blit(
                    img,
                    Rect::new(img_x, 0.0, 1.0, img.height as f64),
                    Rect::new(x as f64, top, 1.0, column.height),
                    self.wall_alpha,
                    Blend::Multiply,
                );
            }
        }
    }

    /// Draws the top-down minimap into a `size` x `size` pixel square.
    pub fn render_map(&self, surface: &mut impl Surface, scene: &MazeScene, size: f64) {
        let scale = size / scene.maze().size() as f64;

        let segments: Vec<(Vec2, Vec2)> = scene
            .maze()
            .walls()
            .iter()
            .map(|wall| {
                let (a, b) = wall.endpoints();
                (a * scale, b * scale)
            })
            .collect();
        surface.stroke_segments(&segments, &Paint::Solid(Rgb::WHITE));

        let eye = scene.walker().eye_pos() * scale;
        let angle = scene.walker().eye_angle();

        let fov = ((0.5 * CAM_SIZE) / Z_NEAR).atan();
        let left = eye + Vec2::from_angle(angle - fov, scale * 2.0);
        let right = eye + Vec2::from_angle(angle + fov, scale * 2.0);
        let green = Rgb::from_int(0x00ff00);
        surface.fill_polygon(
            &[eye, left, right],
            &Paint::Linear {
                from: eye,
                to: (left + right) / 2.0,
                stops: vec![(0.0, green, 0.8), (1.0, green, 0.2)],
            },
        );
        surface.fill_circle(eye, scale * 0.25, &Paint::Solid(green));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Command, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_view_starts_with_gradient() {
        let mut rng = StdRng::seed_from_u64(5);
        let scene = MazeScene::new(9, &mut rng);
        let mut renderer = MazeRenderer::new(&mut rng);
        let mut surface = Recorder::new();
        renderer.render_view(&mut surface, &scene, 64, 0.016);

        match &surface.commands[0] {
            Command::FillRect(rect, Paint::Linear { stops, .. }) => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 64.0, 64.0));
                assert_eq!(stops.len(), 3);
                assert_eq!(stops[1], (0.5, Rgb::BLACK, 1.0));
            }
            other => panic!("unexpected first command: {:?}", other),
        }
    }

    #[test]
    fn test_ceiling_rows_blit_when_textured() {
        let mut rng = StdRng::seed_from_u64(6);
        let scene = MazeScene::new(9, &mut rng);
        let mut renderer = MazeRenderer::new(&mut rng);
        renderer.set_ceiling_image(ImageRef {
            id: 1,
            width: 128,
            height: 128,
            tiled: false,
        });
        let mut surface = Recorder::new();
        renderer.render_view(&mut surface, &scene, 32, 0.016);

        let blits = surface
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Blit(..)))
            .count();
        assert_eq!(blits, 32);
    }

    #[test]
    fn test_texture_alpha_ramps_up() {
        let mut rng = StdRng::seed_from_u64(8);
        let scene = MazeScene::new(9, &mut rng);
        let mut renderer = MazeRenderer::new(&mut rng);
        renderer.set_ceiling_image(ImageRef {
            id: 1,
            width: 64,
            height: 64,
            tiled: true,
        });

        let alpha_of_first_blit = |surface: &Recorder| {
            surface
                .commands
                .iter()
                .find_map(|c| match c {
                    Command::Blit(_, _, _, alpha, _) => Some(*alpha),
                    _ => None,
                })
                .expect("blit")
        };

        let mut surface = Recorder::new();
        renderer.render_view(&mut surface, &scene, 16, 0.25);
        let first = alpha_of_first_blit(&surface);
        surface.clear();
        renderer.render_view(&mut surface, &scene, 16, 0.25);
        let second = alpha_of_first_blit(&surface);
        assert!((first - 0.25).abs() < 1e-9);
        assert!((second - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_map_draws_walls_cone_and_eye() {
        let mut rng = StdRng::seed_from_u64(9);
        let scene = MazeScene::new(9, &mut rng);
        let renderer = MazeRenderer::new(&mut rng);
        let mut surface = Recorder::new();
        renderer.render_map(&mut surface, &scene, 90.0);

        assert!(matches!(
            &surface.commands[0],
            Command::StrokeSegments(segments, _) if segments.len() == scene.maze().walls().len()
        ));
        assert!(matches!(
            &surface.commands[1],
            Command::FillPolygon(points, _) if points.len() == 3
        ));
        assert!(matches!(
            surface.commands[2],
            Command::FillCircle(_, radius, _) if (radius - 2.5).abs() < 1e-9
        ));
    }
}
