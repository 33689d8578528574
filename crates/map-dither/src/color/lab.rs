//! CIE XYZ, CIE L*a*b* and the two Lab difference formulas.

use super::lut::srgb8_to_linear;

/// D65 reference white.
const WHITE: [f32; 3] = [0.95047, 1.0, 1.08883];

/// Lab's `f(t)` switches to a linear segment below `(6/29)^3`.
const EPSILON: f32 = 216.0 / 24389.0;
const KAPPA_SLOPE: f32 = 841.0 / 108.0;

/// A color in CIE 1931 XYZ relative to D65 (Y of white = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Xyz {
    /// Convert 8-bit sRGB through the linear-light table.
    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        let r = srgb8_to_linear(rgb[0]);
        let g = srgb8_to_linear(rgb[1]);
        let b = srgb8_to_linear(rgb[2]);
        Xyz {
            x: 0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
            y: 0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
            z: 0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// A color in CIE L*a*b* (L in `0..=100`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + 4.0 / 29.0
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / WHITE[0]);
        let fy = lab_f(xyz.y / WHITE[1]);
        let fz = lab_f(xyz.z / WHITE[2]);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl Lab {
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.l, self.a, self.b]
    }
}

/// Squared CIE94 difference (graphic-arts weights), `reference` first.
pub fn delta_e94_sq(reference: [f32; 3], sample: [f32; 3]) -> f32 {
    const K1: f32 = 0.045;
    const K2: f32 = 0.015;

    let dl = reference[0] - sample[0];
    let c1 = reference[1].hypot(reference[2]);
    let c2 = sample[1].hypot(sample[2]);
    let dc = c1 - c2;
    let da = reference[1] - sample[1];
    let db = reference[2] - sample[2];
    let dh_sq = (da * da + db * db - dc * dc).max(0.0);

    let sc = 1.0 + K1 * c1;
    let sh = 1.0 + K2 * c1;
    dl * dl + (dc / sc).powi(2) + dh_sq / (sh * sh)
}

/// Squared CIEDE2000 difference.
///
/// Evaluated in `f64`; the hue terms lose too much in single precision for
/// near-neutral colors.
pub fn delta_e2000_sq(lab1: [f32; 3], lab2: [f32; 3]) -> f32 {
    let (l1, a1, b1) = (lab1[0] as f64, lab1[1] as f64, lab1[2] as f64);
    let (l2, a2, b2) = (lab2[0] as f64, lab2[1] as f64, lab2[2] as f64);
    let pow25_7 = 25f64.powi(7);

    let c_bar = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let g = 0.5 * (1.0 - (c_bar.powi(7) / (c_bar.powi(7) + pow25_7)).sqrt());
    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);

    let hue = |b: f64, ap: f64| {
        if b == 0.0 && ap == 0.0 {
            0.0
        } else {
            b.atan2(ap).to_degrees().rem_euclid(360.0)
        }
    };
    let h1p = hue(b1, a1p);
    let h2p = hue(b2, a2p);

    let dlp = l2 - l1;
    let dcp = c2p - c1p;
    let chroma_product = c1p * c2p;
    let dhp = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };
    let dhp_big = 2.0 * chroma_product.sqrt() * (dhp.to_radians() / 2.0).sin();

    let l_bar = (l1 + l2) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();
    let d_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let rc = 2.0 * (c_bar_p.powi(7) / (c_bar_p.powi(7) + pow25_7)).sqrt();
    let l50 = (l_bar - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
    let sc = 1.0 + 0.045 * c_bar_p;
    let sh = 1.0 + 0.015 * c_bar_p * t;
    let rt = -(2.0 * d_theta).to_radians().sin() * rc;

    let tl = dlp / sl;
    let tc = dcp / sc;
    let th = dhp_big / sh;
    (tl * tl + tc * tc + th * th + rt * tc * th) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_of(rgb: [u8; 3]) -> [f32; 3] {
        Lab::from(Xyz::from_srgb8(rgb)).to_array()
    }

    #[test]
    fn white_maps_to_l100() {
        let white = lab_of([255, 255, 255]);
        assert!((white[0] - 100.0).abs() < 0.01);
        assert!(white[1].abs() < 0.01);
        assert!(white[2].abs() < 0.01);
    }

    #[test]
    fn black_maps_to_origin() {
        let black = lab_of([0, 0, 0]);
        assert!(black[0].abs() < 1e-4);
        assert_eq!(black[1], 0.0);
        assert_eq!(black[2], 0.0);
    }

    #[test]
    fn ciede2000_reference_pair() {
        // First pair of Sharma, Wu & Dalal's test data: expected 2.0425
        let d = delta_e2000_sq([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485]).sqrt();
        assert!((d - 2.0425).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn ciede2000_hue_wrap_pair() {
        // Pair 7 of the same data set crosses the 0/360 hue boundary: 2.3669
        let d = delta_e2000_sq([50.0, 0.0, 0.0], [50.0, -1.0, 2.0]).sqrt();
        assert!((d - 2.3669).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn identical_colors_have_zero_difference() {
        let c = lab_of([12, 200, 99]);
        assert_eq!(delta_e2000_sq(c, c), 0.0);
        assert_eq!(delta_e94_sq(c, c), 0.0);
    }

    #[test]
    fn cie94_pure_lightness_difference() {
        let d = delta_e94_sq([60.0, 0.0, 0.0], [50.0, 0.0, 0.0]);
        assert!((d - 100.0).abs() < 1e-4);
    }
}
