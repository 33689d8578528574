//! From matched shades to placed blocks: heights, compression, supports
//! and the voxel grid.

pub mod bridge;
pub mod compress;
pub mod height;
pub mod voxel;

pub use bridge::{build_bridges, SupportPlan};
pub use compress::{compress, MIN_HEIGHT_BUDGET};
pub use height::{derive, water_depth, Cell, HeightField, Relation, WATER_DEPTHS};
pub use voxel::{assemble, BuildStats, VoxelGrid, GLASS, WATER};
