//! Gamma-encoded RGB and the HSV cone built on top of it.

use std::f32::consts::TAU;

/// A color in gamma-encoded sRGB, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from 8-bit channels.
    ///
    /// ```
    /// use map_dither::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Hue, saturation and value. Hue is a fraction of a full turn in `0.0..1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl From<Rgb> for Hsv {
    fn from(c: Rgb) -> Self {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta == 0.0 {
            0.0
        } else if max == c.r {
            ((c.g - c.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == c.g {
            ((c.b - c.r) / delta + 2.0) / 6.0
        } else {
            ((c.r - c.g) / delta + 4.0) / 6.0
        };

        Hsv { h, s, v: max }
    }
}

impl Hsv {
    /// Cartesian point inside the HSV cone.
    ///
    /// Hue is an angle, so plain Euclidean distance on `(h, s, v)` would put
    /// hue 0.99 far away from hue 0.01. Projecting onto the cone keeps
    /// neighboring hues close and collapses all hues at zero saturation.
    #[inline]
    pub fn to_cone(self) -> [f32; 3] {
        let radius = self.s * self.v;
        let angle = self.h * TAU;
        [radius * angle.cos(), radius * angle.sin(), self.v]
    }
}
