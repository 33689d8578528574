//! Color spaces used for palette matching.
//!
//! Every color, whether an image pixel or a palette entry, enters through
//! [`ColorSpace::project`] from its 8-bit sRGB value. Two equal 8-bit
//! colors therefore always project to bit-identical coordinates, which is
//! what makes an exact palette hit produce a distance of exactly zero.

mod lab;
mod lut;
mod rgb;

pub use lab::{delta_e2000_sq, delta_e94_sq, Lab, Xyz};
pub use lut::srgb8_to_linear;
pub use rgb::{Hsv, Rgb};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Color space a match is computed in, each with its own fixed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ColorSpace {
    /// Gamma-encoded RGB with plain squared Euclidean distance.
    Rgb,
    /// Gamma-encoded RGB with the "redmean" channel weighting.
    #[default]
    RgbBetter,
    /// Euclidean distance inside the HSV cone.
    Hsv,
    /// CIE L*a*b* with the CIE94 difference.
    Lab94,
    /// CIE L*a*b* with the CIEDE2000 difference.
    Lab00,
    /// CIE XYZ with squared Euclidean distance.
    Xyz,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::Rgb,
        ColorSpace::RgbBetter,
        ColorSpace::Hsv,
        ColorSpace::Lab94,
        ColorSpace::Lab00,
        ColorSpace::Xyz,
    ];

    /// Position of this space in [`ColorSpace::ALL`].
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::RgbBetter => "rgb-better",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Lab94 => "lab94",
            ColorSpace::Lab00 => "lab00",
            ColorSpace::Xyz => "xyz",
        }
    }

    /// Coordinates of an 8-bit sRGB color in this space.
    pub fn project(self, rgb: [u8; 3]) -> [f32; 3] {
        match self {
            ColorSpace::Rgb | ColorSpace::RgbBetter => {
                Rgb::from_u8(rgb[0], rgb[1], rgb[2]).to_array()
            }
            ColorSpace::Hsv => Hsv::from(Rgb::from_u8(rgb[0], rgb[1], rgb[2])).to_cone(),
            ColorSpace::Lab94 | ColorSpace::Lab00 => Lab::from(Xyz::from_srgb8(rgb)).to_array(),
            ColorSpace::Xyz => Xyz::from_srgb8(rgb).to_array(),
        }
    }

    /// Distance between two points of this space. Only the ordering is
    /// meaningful; most metrics return squared values.
    #[inline]
    pub fn distance(self, a: [f32; 3], b: [f32; 3]) -> f32 {
        match self {
            ColorSpace::Rgb | ColorSpace::Hsv | ColorSpace::Xyz => {
                let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
                d[0] * d[0] + d[1] * d[1] + d[2] * d[2]
            }
            ColorSpace::RgbBetter => {
                let mean_r = (a[0] + b[0]) / 2.0;
                let dr = a[0] - b[0];
                let dg = a[1] - b[1];
                let db = a[2] - b[2];
                (2.0 + mean_r) * dr * dr + 4.0 * dg * dg + (3.0 - mean_r) * db * db
            }
            ColorSpace::Lab94 => delta_e94_sq(a, b),
            ColorSpace::Lab00 => delta_e2000_sq(a, b),
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown color space name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color space '{0}' (expected one of rgb, rgb-better, hsv, lab94, lab00, xyz)")]
pub struct ParseColorSpaceError(pub String);

impl FromStr for ColorSpace {
    type Err = ParseColorSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColorSpace::ALL
            .into_iter()
            .find(|space| space.name() == lower)
            .ok_or_else(|| ParseColorSpaceError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for space in ColorSpace::ALL {
            assert_eq!(space.name().parse::<ColorSpace>(), Ok(space));
        }
        assert_eq!("  LAB00 ".parse::<ColorSpace>(), Ok(ColorSpace::Lab00));
        assert!("cmyk".parse::<ColorSpace>().is_err());
    }

    #[test]
    fn slots_follow_declaration_order() {
        for (i, space) in ColorSpace::ALL.into_iter().enumerate() {
            assert_eq!(space.slot(), i);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        for space in ColorSpace::ALL {
            let a = space.project([37, 140, 201]);
            let b = space.project([37, 140, 201]);
            assert_eq!(a, b);
            assert_eq!(space.distance(a, b), 0.0);
        }
    }

    #[test]
    fn redmean_weights_green_heaviest() {
        let space = ColorSpace::RgbBetter;
        let base = [0.5, 0.5, 0.5];
        let dr = space.distance(base, [0.6, 0.5, 0.5]);
        let dg = space.distance(base, [0.5, 0.6, 0.5]);
        let db = space.distance(base, [0.5, 0.5, 0.6]);
        assert!(dg > dr && dg > db);
    }

    #[test]
    fn every_metric_prefers_the_closer_gray() {
        for space in ColorSpace::ALL {
            let target = space.project([100, 100, 100]);
            let near = space.project([110, 110, 110]);
            let far = space.project([200, 200, 200]);
            assert!(
                space.distance(target, near) < space.distance(target, far),
                "{space} ranks grays wrongly"
            );
        }
    }
}
