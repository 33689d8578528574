pub mod preview;

pub use preview::{decode_png, encode_rgba_png, MAX_IMAGE_SIDE};
