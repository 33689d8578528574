#![allow(clippy::excessive_precision, clippy::module_inception)]

//! map-dither: map-color palette and image matching for block map art.
//!
//! A map in the target game stores one byte per pixel: a base color (64 of
//! them, 0 meaning "nothing") and a shade depth (0-3) that comes from how
//! the block sits relative to its northern neighbor. This crate owns the
//! pure, I/O-free part of turning an image into such map bytes:
//!
//! - [`Palette`]: the fixed 256-entry catalogue, projected into every
//!   supported [`ColorSpace`] up front.
//! - [`AllowedColors`]: the subset a conversion may use given the enabled
//!   base colors, the blocks available for them, the [`WorldVersion`] and
//!   the [`MapShape`].
//! - [`convert`]: nearest-color matching, optionally with serpentine
//!   Floyd-Steinberg error diffusion.
//!
//! # Quick Start
//!
//! ```
//! use map_dither::{convert, AllowedColors, ColorSpace, MapShape, NoProgress, Palette,
//!     PixelGrid, WorldVersion};
//!
//! let palette = Palette::shared();
//! let allowed = AllowedColors::compute(
//!     &palette,
//!     &[true; 64],
//!     &[true; 64],
//!     WorldVersion::Mc20,
//!     MapShape::Slope,
//! )
//! .unwrap();
//!
//! let image = PixelGrid::filled(4, 4, 0xFF7F_B238);
//! let grid = convert(&palette, &image, &allowed, ColorSpace::Lab00, true, &NoProgress).unwrap();
//! assert_eq!(grid.rows(), 4);
//! ```
//!
//! # Index Layout
//!
//! Palette index `i` is base color `i % 64` at depth `i / 64`. The byte a
//! map stores for the same entry is `base * 4 + depth`.

pub mod allowed;
pub mod color;
pub mod grid;
pub mod matcher;
pub mod palette;
pub mod progress;


pub use allowed::{AllowedColors, Exclusion, TooFewColors, MIN_ALLOWED_COLORS};
pub use color::{ColorSpace, Hsv, Lab, ParseColorSpaceError, Rgb, Xyz};
pub use grid::{argb_channels, pack_argb, GridSizeError, MatchGrid, PixelGrid};
pub use matcher::{convert, MatchError, Matcher};
pub use palette::{
    join_index, split_index, MapShape, Palette, PaletteEntry, ParseEnumError, WorldVersion,
    BASE_COLOR_COUNT, PALETTE_SIZE, WATER_BASE,
};
pub use progress::{AtomicProgress, NoProgress, Progress};
