//! Mapforge - image to map art
//!
//! Turns an image into block map art: matches pixels to map colors, derives
//! block heights that reproduce each shade, fits them under a height budget
//! and assembles the voxel grid to build.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod building;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
