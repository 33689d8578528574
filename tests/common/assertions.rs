//! Shared checks on pipeline outputs.

use map_dither::{AllowedColors, MatchGrid, PixelGrid};
use mapforge::building::{HeightField, VoxelGrid};

/// Every matched cell uses an allowed index; transparency is preserved.
pub fn assert_valid_match(image: &PixelGrid, grid: &MatchGrid, allowed: &AllowedColors) {
    assert_eq!((grid.rows(), grid.cols()), (image.rows(), image.cols()));
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let opaque = image.get(r, c) >> 24 != 0;
            match grid.get(r, c) {
                Some(index) => {
                    assert!(opaque, "transparent pixel ({r}, {c}) was matched");
                    assert!(allowed.contains(index), "index {index} not allowed");
                }
                None => assert!(!opaque, "opaque pixel ({r}, {c}) left unmatched"),
            }
        }
    }
}

/// No top exceeds `max_height` and none goes below its floor.
pub fn assert_heights_within(field: &HeightField, max_height: u32) {
    assert!(
        field.max_height() <= max_height,
        "field reaches {} with a budget of {max_height}",
        field.max_height()
    );
    for col in 0..field.cols() {
        for p in 0..field.positions() {
            assert!(
                field.column(col)[p] >= field.floor_at(col, p),
                "column {col} position {p} is below its floor"
            );
        }
    }
}

/// Voxel grid dimensions for a staircase build of `field`.
pub fn assert_staircase_dimensions(voxels: &VoxelGrid, field: &HeightField) {
    assert_eq!(
        voxels.dimensions(),
        (
            field.cols(),
            field.max_height() as usize + 1,
            field.rows() + 1
        )
    );
}

/// Every shaded non-water block has a block north of it at the height its
/// shade was derived against.
pub fn assert_north_references(field: &HeightField, voxels: &VoxelGrid) {
    for col in 0..field.cols() {
        for row in 0..field.rows() {
            let cell = field.cell(row, col);
            if !cell.is_occupied() || cell.is_water() {
                continue;
            }
            let north = field.column(col)[row] as usize;
            assert_ne!(
                voxels.get(col, north, row),
                0,
                "no block north of ({row}, {col}) at height {north}"
            );
        }
    }
}
