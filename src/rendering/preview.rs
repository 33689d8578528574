//! PNG input and preview output.

use std::io::Cursor;

use map_dither::{pack_argb, PixelGrid};

use crate::error::ImageError;

/// Largest accepted image side, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 8192;

/// Decode a PNG into an ARGB pixel grid.
///
/// Palette, grayscale and 16-bit images are expanded to 8-bit channels;
/// images without alpha are fully opaque.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
        return Err(ImageError::TooLarge { width, height });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let channels = match frame.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(ImageError::UnsupportedLayout(other)),
    };

    let (rows, cols) = (frame.height as usize, frame.width as usize);
    let mut data = Vec::with_capacity(rows * cols);
    for row in buf[..frame.buffer_size()].chunks_exact(frame.line_size) {
        for px in row[..cols * channels].chunks_exact(channels) {
            let argb = match channels {
                1 => pack_argb(255, [px[0], px[0], px[0]]),
                2 => pack_argb(px[1], [px[0], px[0], px[0]]),
                3 => pack_argb(255, [px[0], px[1], px[2]]),
                _ => pack_argb(px[3], [px[0], px[1], px[2]]),
            };
            data.push(argb);
        }
    }

    tracing::debug!(width, height, color_type = ?frame.color_type, "Decoded PNG");
    Ok(PixelGrid::from_row_major(rows, cols, data)?)
}

/// Encode row-major RGBA8 pixels as a PNG.
pub fn encode_rgba_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf.into_inner())
}
