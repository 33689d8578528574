pub mod block;
pub mod config;
pub mod options;
pub mod step;

pub use block::{BlockInfo, BlockOverrides, BlockPalette, BlockPaletteError};
pub use config::{AppConfig, ConvertConfig, PaletteConfig};
pub use options::{BuildOptions, CompressStrategy, PaletteSelection, ParseStrategyError};
pub use step::{Step, WorkStatus};
