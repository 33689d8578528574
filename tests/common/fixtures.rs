//! Test images, selections and block palettes.

use map_dither::{pack_argb, MapShape, PixelGrid, WorldVersion};
use mapforge::models::{BlockInfo, BlockPalette, PaletteSelection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Opaque pure red, the fire base color at full shade.
pub const RED: u32 = 0xFFFF_0000;

/// Fully transparent.
pub const CLEAR: u32 = 0x0000_0000;

/// Image of random opaque colors, reproducible from `seed`.
pub fn noise_image(rows: usize, cols: usize, seed: u64) -> PixelGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols)
        .map(|_| pack_argb(255, [rng.gen(), rng.gen(), rng.gen()]))
        .collect();
    PixelGrid::from_row_major(rows, cols, data).unwrap()
}

/// Horizontal gray ramp with a transparent first column.
pub fn ramp_image(rows: usize, cols: usize) -> PixelGrid {
    let mut data = Vec::with_capacity(rows * cols);
    for _ in 0..rows {
        for c in 0..cols {
            if c == 0 {
                data.push(CLEAR);
            } else {
                let v = (c * 255 / cols.max(1)) as u8;
                data.push(pack_argb(255, [v, v, v]));
            }
        }
    }
    PixelGrid::from_row_major(rows, cols, data).unwrap()
}

pub fn slope() -> PaletteSelection {
    PaletteSelection::new(WorldVersion::Mc20, MapShape::Slope)
}

pub fn selection(shape: MapShape) -> PaletteSelection {
    PaletteSelection::new(WorldVersion::Mc20, shape)
}

/// Only base color `base` enabled.
pub fn only(base: u8, shape: MapShape) -> PaletteSelection {
    let mut sel = selection(shape);
    sel.enabled = [false; 64];
    sel.enabled[base as usize] = true;
    sel
}

/// Embedded blocks, but every block needs glass below it.
pub fn all_need_support() -> BlockPalette {
    let mut blocks = BlockPalette::default();
    for base in 1..64u8 {
        if let Some(info) = blocks.get(base).cloned() {
            blocks
                .set(
                    base,
                    Some(BlockInfo {
                        needs_glass: true,
                        ..info
                    }),
                )
                .unwrap();
        }
    }
    blocks
}

/// Encode a pixel grid as PNG bytes.
pub fn png_bytes(image: &PixelGrid) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(image.as_slice().len() * 4);
    for &argb in image.as_slice() {
        let (a, [r, g, b]) = map_dither::argb_channels(argb);
        rgba.extend_from_slice(&[r, g, b, a]);
    }
    mapforge::rendering::encode_rgba_png(image.cols() as u32, image.rows() as u32, &rgba).unwrap()
}
