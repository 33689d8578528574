//! Reference table of the 64 base map colors.

use super::version::WorldVersion;

/// Number of base colors addressable by a map byte.
pub const BASE_COLOR_COUNT: usize = 64;

/// Base color reserved for "nothing here".
pub const NONE_BASE: u8 = 0;

/// Base color whose depth describes water thickness instead of a slope.
pub const WATER_BASE: u8 = 12;

/// Brightness multipliers (out of 255) for shade depths 0..=3.
pub const SHADE_MULTIPLIERS: [u32; 4] = [180, 220, 255, 135];

/// One row of the reference table.
#[derive(Debug, Clone, Copy)]
pub struct BaseColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
    /// First release the color can be produced in. `None` for the empty color.
    pub since: Option<WorldVersion>,
}

const fn base(name: &'static str, r: u8, g: u8, b: u8, since: WorldVersion) -> BaseColor {
    BaseColor {
        name,
        rgb: [r, g, b],
        since: Some(since),
    }
}

use WorldVersion::{Future, Mc12, Mc16, Mc17};

pub static BASE_COLORS: [BaseColor; BASE_COLOR_COUNT] = [
    BaseColor {
        name: "none",
        rgb: [0, 0, 0],
        since: None,
    },
    base("grass", 127, 178, 56, Mc12),
    base("sand", 247, 233, 163, Mc12),
    base("wool", 199, 199, 199, Mc12),
    base("fire", 255, 0, 0, Mc12),
    base("ice", 160, 160, 255, Mc12),
    base("metal", 167, 167, 167, Mc12),
    base("plant", 0, 124, 0, Mc12),
    base("snow", 255, 255, 255, Mc12),
    base("clay", 164, 168, 184, Mc12),
    base("dirt", 151, 109, 77, Mc12),
    base("stone", 112, 112, 112, Mc12),
    base("water", 64, 64, 255, Mc12),
    base("wood", 143, 119, 72, Mc12),
    base("quartz", 255, 252, 245, Mc12),
    base("color_orange", 216, 127, 51, Mc12),
    base("color_magenta", 178, 76, 216, Mc12),
    base("color_light_blue", 102, 153, 216, Mc12),
    base("color_yellow", 229, 229, 51, Mc12),
    base("color_light_green", 127, 204, 25, Mc12),
    base("color_pink", 242, 127, 165, Mc12),
    base("color_gray", 76, 76, 76, Mc12),
    base("color_light_gray", 153, 153, 153, Mc12),
    base("color_cyan", 76, 127, 153, Mc12),
    base("color_purple", 127, 63, 178, Mc12),
    base("color_blue", 51, 76, 178, Mc12),
    base("color_brown", 102, 76, 51, Mc12),
    base("color_green", 102, 127, 51, Mc12),
    base("color_red", 153, 51, 51, Mc12),
    base("color_black", 25, 25, 25, Mc12),
    base("gold", 250, 238, 77, Mc12),
    base("diamond", 92, 219, 213, Mc12),
    base("lapis", 74, 128, 255, Mc12),
    base("emerald", 0, 217, 58, Mc12),
    base("podzol", 129, 86, 49, Mc12),
    base("nether", 112, 2, 0, Mc12),
    base("terracotta_white", 209, 177, 161, Mc12),
    base("terracotta_orange", 159, 82, 36, Mc12),
    base("terracotta_magenta", 149, 87, 108, Mc12),
    base("terracotta_light_blue", 112, 108, 138, Mc12),
    base("terracotta_yellow", 186, 133, 36, Mc12),
    base("terracotta_light_green", 103, 117, 53, Mc12),
    base("terracotta_pink", 160, 77, 78, Mc12),
    base("terracotta_gray", 57, 41, 35, Mc12),
    base("terracotta_light_gray", 135, 107, 98, Mc12),
    base("terracotta_cyan", 87, 92, 92, Mc12),
    base("terracotta_purple", 122, 73, 88, Mc12),
    base("terracotta_blue", 76, 62, 92, Mc12),
    base("terracotta_brown", 76, 50, 35, Mc12),
    base("terracotta_green", 76, 82, 42, Mc12),
    base("terracotta_red", 142, 60, 46, Mc12),
    base("terracotta_black", 37, 22, 16, Mc12),
    base("crimson_nylium", 189, 48, 49, Mc16),
    base("crimson_stem", 148, 63, 97, Mc16),
    base("crimson_hyphae", 92, 25, 29, Mc16),
    base("warped_nylium", 22, 126, 134, Mc16),
    base("warped_stem", 58, 142, 140, Mc16),
    base("warped_hyphae", 86, 44, 62, Mc16),
    base("warped_wart_block", 20, 180, 133, Mc16),
    base("deepslate", 100, 100, 100, Mc17),
    base("raw_iron", 216, 175, 147, Mc17),
    base("glow_lichen", 127, 167, 150, Mc17),
    base("reserved_62", 0, 0, 0, Future),
    base("reserved_63", 0, 0, 0, Future),
];

/// Apply a shade depth to an 8-bit base color.
#[inline]
pub fn shade(rgb: [u8; 3], depth: u8) -> [u8; 3] {
    let m = SHADE_MULTIPLIERS[depth as usize & 3];
    rgb.map(|c| (c as u32 * m / 255) as u8)
}
