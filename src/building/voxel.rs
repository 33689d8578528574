//! Final 3D block grid.

use super::bridge::SupportPlan;
use super::height::HeightField;
use map_dither::{split_index, MapShape, BASE_COLOR_COUNT, WATER_BASE};
use serde::Serialize;

/// Voxel value of a glass block (base color 0 plus one).
pub const GLASS: u16 = 1;
/// Voxel value of a water block.
pub const WATER: u16 = WATER_BASE as u16 + 1;

/// Dense block grid. 0 is air, anything else is `base_color + 1`.
///
/// Stored x fastest, then z, then y: `x + x_len * (z + z_len * y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    x_len: usize,
    y_len: usize,
    z_len: usize,
    data: Vec<u16>,
}

impl VoxelGrid {
    pub fn new(x_len: usize, y_len: usize, z_len: usize) -> Self {
        Self {
            x_len,
            y_len,
            z_len,
            data: vec![0; x_len * y_len * z_len],
        }
    }

    /// `(x_len, y_len, z_len)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.x_len, self.y_len, self.z_len)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.x_len * (z + self.z_len * y)
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> u16 {
        self.data[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u16) {
        let i = self.index(x, y, z);
        self.data[i] = value;
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Non-air voxels.
    pub fn block_count(&self) -> u64 {
        self.data.iter().filter(|&&v| v != 0).count() as u64
    }

    /// Count blocks per base color.
    pub fn stats(&self) -> BuildStats {
        let mut per_base = vec![0u64; BASE_COLOR_COUNT];
        for &v in &self.data {
            if let Some(slot) = (v as usize).checked_sub(1).and_then(|b| per_base.get_mut(b)) {
                *slot += 1;
            }
        }
        BuildStats {
            total_blocks: per_base.iter().sum(),
            per_base,
        }
    }
}

/// Block totals of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub total_blocks: u64,
    /// Indexed by base color, 64 entries.
    pub per_base: Vec<u64>,
}

impl BuildStats {
    pub fn count(&self, base: u8) -> u64 {
        self.per_base.get(base as usize).copied().unwrap_or(0)
    }
}

/// Place every block of the field and its supports.
pub fn assemble(field: &HeightField, plan: &SupportPlan) -> VoxelGrid {
    let grid = if field.shape() == MapShape::Wall {
        assemble_wall(field)
    } else {
        assemble_staircase(field, plan)
    };
    let (x_len, y_len, z_len) = grid.dimensions();
    tracing::debug!(x_len, y_len, z_len, blocks = grid.block_count(), "Assembled voxel grid");
    grid
}

fn assemble_staircase(field: &HeightField, plan: &SupportPlan) -> VoxelGrid {
    let y_len = field.max_height() as usize + 1;
    let mut grid = VoxelGrid::new(field.cols(), y_len, field.positions());

    for x in 0..field.cols() {
        let column = field.column(x);
        for row in 0..field.rows() {
            let cell = field.cell(row, x);
            let Some(index) = cell.index else { continue };
            // a shaded block needs a block north of it at the height it was derived against
            let north_empty = row == 0 || !field.cell(row - 1, x).is_occupied();
            if north_empty && !cell.is_water() {
                grid.set(x, column[row] as usize, row, GLASS);
            }
            let z = row + 1;
            let top = field.top(row, x) as usize;
            if cell.is_water() {
                let bottom = top - cell.water_depth as usize;
                grid.set(x, bottom, z, GLASS);
                for y in bottom + 1..=top {
                    grid.set(x, y, z, WATER);
                }
            } else {
                let (base, _) = split_index(index);
                grid.set(x, top, z, base as u16 + 1);
            }
        }
    }

    for (x, y, z) in plan.iter() {
        grid.set(x, y as usize, z, GLASS);
    }
    grid
}

/// Stand a flat plate upright: image row 0 at the top, facing z.
fn assemble_wall(field: &HeightField) -> VoxelGrid {
    let rows = field.rows();
    let mut grid = VoxelGrid::new(field.cols(), rows, 1);
    for row in 0..rows {
        for x in 0..field.cols() {
            if let Some(index) = field.cell(row, x).index {
                let (base, _) = split_index(index);
                grid.set(x, rows - 1 - row, 0, base as u16 + 1);
            }
        }
    }
    grid
}
