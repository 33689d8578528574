//! Nearest-color matching of images against the allowed palette.
//!
//! Two strategies exist and never mix:
//!
//! - Without dithering every pixel is independent. Distinct colors are
//!   matched once each on rayon's thread pool and the results are looked
//!   up per pixel.
//! - With dithering the quantization error of each pixel feeds its
//!   unvisited neighbors (see [`dither`]), which makes the scan strictly
//!   sequential.
//!
//! Ties between equally distant entries always go to the lowest palette
//! index, so the output is deterministic regardless of thread scheduling.

pub mod dither;

use std::collections::HashMap;

use rayon::prelude::*;
use thiserror::Error;

use crate::allowed::AllowedColors;
use crate::color::ColorSpace;
use crate::grid::{argb_channels, MatchGrid, PixelGrid};
use crate::palette::Palette;
use crate::progress::Progress;

/// Distinct colors matched per progress update.
const COLOR_CHUNK: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No allowed colors to match against.
    #[error("no allowed colors available, select a palette first")]
    NotReady,
    #[error("image contains no pixels")]
    EmptyImage,
}

/// Allowed entries projected into one color space.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    palette: &'a Palette,
    space: ColorSpace,
    candidates: Vec<(u8, [f32; 3])>,
}

impl<'a> Matcher<'a> {
    pub fn new(
        palette: &'a Palette,
        allowed: &AllowedColors,
        space: ColorSpace,
    ) -> Result<Self, MatchError> {
        if allowed.is_empty() {
            return Err(MatchError::NotReady);
        }
        Ok(Self {
            palette,
            space,
            candidates: allowed.candidates(palette, space),
        })
    }

    #[inline]
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Closest candidate to a point of the active space, with its coordinates.
    pub fn nearest(&self, coords: [f32; 3]) -> (u8, [f32; 3]) {
        let mut best = self.candidates[0];
        let mut best_dist = self.space.distance(coords, best.1);
        for &candidate in &self.candidates[1..] {
            let dist = self.space.distance(coords, candidate.1);
            // strict: equal distance keeps the lower index
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }
        best
    }

    #[inline]
    pub fn nearest_rgb(&self, rgb: [u8; 3]) -> u8 {
        self.nearest(self.space.project(rgb)).0
    }

    /// Match without error diffusion.
    pub fn match_image(&self, pixels: &PixelGrid, progress: &dyn Progress) -> MatchGrid {
        let mut colors: Vec<u32> = pixels
            .as_slice()
            .iter()
            .filter(|&&argb| argb >> 24 != 0)
            .map(|&argb| argb & 0x00FF_FFFF)
            .collect();
        colors.sort_unstable();
        colors.dedup();

        progress.set_range(0, (colors.len() + pixels.rows()) as u64, 0);

        let lookup: HashMap<u32, u8> = colors
            .par_chunks(COLOR_CHUNK)
            .flat_map_iter(|chunk| {
                let matched: Vec<(u32, u8)> = chunk
                    .iter()
                    .map(|&rgb| (rgb, self.nearest_rgb(argb_channels(rgb).1)))
                    .collect();
                progress.add(chunk.len() as u64);
                matched
            })
            .collect();

        let cols = pixels.cols();
        let cells: Vec<Option<u8>> = pixels
            .as_slice()
            .par_chunks(cols.max(1))
            .flat_map_iter(|row| {
                let out: Vec<Option<u8>> = row
                    .iter()
                    .map(|&argb| {
                        if argb >> 24 == 0 {
                            None
                        } else {
                            lookup.get(&(argb & 0x00FF_FFFF)).copied()
                        }
                    })
                    .collect();
                progress.add(1);
                out
            })
            .collect();

        MatchGrid::from_cells(pixels.rows(), cols, cells)
    }
}

/// Map every pixel to its nearest allowed palette entry.
///
/// ```
/// use map_dither::{convert, AllowedColors, ColorSpace, NoProgress, Palette, PixelGrid};
///
/// let palette = Palette::shared();
/// let allowed = AllowedColors::from_indices(&[4]);
/// let red = PixelGrid::filled(2, 2, 0xFFFF_0000);
/// let grid = convert(&palette, &red, &allowed, ColorSpace::Lab00, false, &NoProgress).unwrap();
/// assert!(grid.cells().iter().all(|c| *c == Some(4)));
/// ```
pub fn convert(
    palette: &Palette,
    pixels: &PixelGrid,
    allowed: &AllowedColors,
    space: ColorSpace,
    dither: bool,
    progress: &dyn Progress,
) -> Result<MatchGrid, MatchError> {
    let matcher = Matcher::new(palette, allowed, space)?;
    if pixels.is_empty() {
        return Err(MatchError::EmptyImage);
    }
    Ok(if dither {
        dither::diffuse(&matcher, pixels, progress)
    } else {
        matcher.match_image(pixels, progress)
    })
}
