//! The fixed catalogue of 256 map colors.

use std::sync::{Arc, OnceLock};

use super::base_colors::{shade, BASE_COLORS, BASE_COLOR_COUNT, WATER_BASE};
use super::version::WorldVersion;
use crate::color::ColorSpace;

/// Number of palette entries (64 base colors times 4 shade depths).
pub const PALETTE_SIZE: usize = 256;

/// Split a palette index into `(base, depth)`.
#[inline]
pub fn split_index(index: u8) -> (u8, u8) {
    (index % 64, index / 64)
}

/// Palette index of a `(base, depth)` pair.
#[inline]
pub fn join_index(base: u8, depth: u8) -> u8 {
    debug_assert!(base < 64 && depth < 4);
    depth * 64 + base
}

/// One shaded map color.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    pub index: u8,
    pub base: u8,
    pub depth: u8,
    /// Shaded 8-bit sRGB value as rendered on a map.
    pub rgb8: [u8; 3],
    /// First release providing this color, `None` for the empty color.
    pub min_version: Option<WorldVersion>,
    /// Coordinates in every [`ColorSpace`], indexed by [`ColorSpace::slot`].
    coords: [[f32; 3]; 6],
}

impl PaletteEntry {
    #[inline]
    pub fn is_water(&self) -> bool {
        self.base == WATER_BASE
    }

    /// Byte stored in the game's map data for this entry.
    #[inline]
    pub fn map_color(&self) -> u8 {
        self.base * 4 + self.depth
    }

    #[inline]
    pub fn coords(&self, space: ColorSpace) -> [f32; 3] {
        self.coords[space.slot()]
    }
}

/// Immutable palette shared by every session.
///
/// Entry `i` has base color `i % 64` and shade depth `i / 64`.
///
/// ```
/// use map_dither::{ColorSpace, Palette};
///
/// let palette = Palette::shared();
/// let red = palette.entry(4);
/// assert_eq!((red.base, red.depth), (4, 0));
/// assert_eq!(red.rgb8, [180, 0, 0]);
/// assert_eq!(palette.count_base_colors(), 64);
/// assert_eq!(palette.rgb(4, ColorSpace::Rgb)[0], 180.0 / 255.0);
/// ```
#[derive(Debug)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build the catalogue from the reference table.
    pub fn new() -> Self {
        let entries = (0..PALETTE_SIZE)
            .map(|i| {
                let index = i as u8;
                let (base, depth) = split_index(index);
                let reference = &BASE_COLORS[base as usize];
                let rgb8 = shade(reference.rgb, depth);
                let mut coords = [[0.0; 3]; 6];
                for space in ColorSpace::ALL {
                    coords[space.slot()] = space.project(rgb8);
                }
                PaletteEntry {
                    index,
                    base,
                    depth,
                    rgb8,
                    min_version: reference.since,
                    coords,
                }
            })
            .collect();
        Self { entries }
    }

    /// Process-wide read-only instance, built on first use.
    pub fn shared() -> Arc<Palette> {
        static SHARED: OnceLock<Arc<Palette>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Palette::new())).clone()
    }

    #[inline]
    pub fn entry(&self, index: u8) -> &PaletteEntry {
        &self.entries[index as usize]
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    #[inline]
    pub fn count_base_colors(&self) -> usize {
        BASE_COLOR_COUNT
    }

    /// Coordinates of an entry in `space`. The two RGB spaces return
    /// channels in `0.0..=1.0`; the others use their native ranges.
    #[inline]
    pub fn rgb(&self, index: u8, space: ColorSpace) -> [f32; 3] {
        self.entry(index).coords(space)
    }

    pub fn base_name(&self, base: u8) -> &'static str {
        BASE_COLORS[base as usize % BASE_COLOR_COUNT].name
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
