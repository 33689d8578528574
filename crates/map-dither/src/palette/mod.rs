//! Map-color palette model.
//!
//! The palette is fixed: 64 base colors, each rendered at 4 shade depths.
//! Which entries a conversion may actually use is decided separately by
//! [`AllowedColors`](crate::AllowedColors).

mod base_colors;
mod palette;
mod version;

pub use base_colors::{
    shade, BaseColor, BASE_COLORS, BASE_COLOR_COUNT, NONE_BASE, SHADE_MULTIPLIERS, WATER_BASE,
};
pub use palette::{join_index, split_index, Palette, PaletteEntry, PALETTE_SIZE};
pub use version::{MapShape, ParseEnumError, WorldVersion};
