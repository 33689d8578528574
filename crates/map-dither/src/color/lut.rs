//! Build-time generated gamma table.
//!
//! Decoding goes through a table indexed by the 8-bit channel value so that
//! image pixels and palette entries take the exact same path and land on
//! bit-identical coordinates.

include!(concat!(env!("OUT_DIR"), "/srgb8_lut.rs"));

/// Decode one 8-bit sRGB channel to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}
