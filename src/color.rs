use rand::Rng;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_int(int: u32) -> Self {
        Self {
            r: ((int >> 16) & 0xff) as u8,
            g: ((int >> 8) & 0xff) as u8,
            b: (int & 0xff) as u8,
        }
    }

    /// Componentwise blend with `d` clamped to `[0, 1]`.
    pub fn lerp(a: Rgb, b: Rgb, d: f64) -> Rgb {
        let d = d.clamp(0.0, 1.0);
        let v = 1.0 - d;
        let blend = |x: u8, y: u8| (v * x as f64 + d * y as f64).round() as u8;
        Rgb::new(blend(a.r, b.r), blend(a.g, b.g), blend(a.b, b.b))
    }
}

/// HSV color, all channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Fully saturated random hue; the showcase palettes pair this with its
    /// complement (`hue + 0.5 mod 1`).
    pub fn random_hue(rng: &mut impl Rng) -> Self {
        Self::new(rng.gen::<f64>(), 1.0, 1.0)
    }

    pub fn complement(&self) -> Hsv {
        Hsv::new((self.h + 0.5) % 1.0, self.s, self.v)
    }

    /// Hue-sector conversion to RGB.
    pub fn to_rgb(&self) -> Rgb {
        let Hsv { h, s, v } = *self;
        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb::new(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }
}
