//! Image to voxel pipeline, run through the public building blocks.

mod common;

use common::fixtures::{self, RED};
use map_dither::{
    convert, join_index, AllowedColors, ColorSpace, MapShape, MatchGrid, NoProgress, Palette,
    PixelGrid,
};
use mapforge::building::{
    assemble, build_bridges, compress, derive, BuildStats, HeightField, MIN_HEIGHT_BUDGET,
};
use mapforge::error::BuildError;
use mapforge::models::{BlockPalette, CompressStrategy};
use pretty_assertions::assert_eq;

fn allowed_for(shape: MapShape) -> AllowedColors {
    let palette = Palette::new();
    let blocks = BlockPalette::default();
    AllowedColors::compute(
        &palette,
        &[true; 64],
        &blocks.assigned_mask(false, false),
        map_dither::WorldVersion::Mc20,
        shape,
    )
    .unwrap()
}

fn match_and_derive(image: &PixelGrid, shape: MapShape) -> (MatchGrid, HeightField) {
    let palette = Palette::new();
    let grid = convert(
        &palette,
        image,
        &allowed_for(shape),
        ColorSpace::RgbBetter,
        false,
        &NoProgress,
    )
    .unwrap();
    let field = derive(&grid, &palette, shape, &BlockPalette::default());
    (grid, field)
}

#[test]
fn red_square_scenario() {
    let palette = Palette::new();
    let allowed = AllowedColors::from_indices(&[4]);
    let image = PixelGrid::filled(2, 2, RED);

    let grid = convert(&palette, &image, &allowed, ColorSpace::Lab00, false, &NoProgress).unwrap();
    assert_eq!(grid, MatchGrid::new(2, 2, vec![Some(4); 4]).unwrap());

    let field = derive(&grid, &palette, MapShape::Slope, &BlockPalette::default());
    assert_eq!(field.column(0), field.column(1));
    assert_eq!(field.column(0), &[2, 1, 0]);

    let compressed = compress(&field, 256, CompressStrategy::Both).unwrap();
    assert_eq!(compressed, field);

    // redstone needs nothing below it
    assert!(build_bridges(&compressed, 3, true).is_empty());
}

#[test]
fn tall_column_is_clamped_by_forced_compression() {
    let climbing = MatchGrid::new(300, 1, vec![Some(join_index(11, 2)); 300]).unwrap();
    let field = derive(&climbing, &Palette::new(), MapShape::Slope, &BlockPalette::default());
    assert_eq!(field.max_height(), 300);

    let out = compress(&field, 10, CompressStrategy::ForcedOnly).unwrap();
    common::assert_heights_within(&out, 10);

    assert!(matches!(
        compress(&field, 10, CompressStrategy::NaturalOnly),
        Err(BuildError::CompressionFailed { column: 0, .. })
    ));
}

#[test]
fn heights_match_image_dimensions() {
    for (rows, cols) in [(1, 1), (3, 7), (16, 2)] {
        let image = fixtures::noise_image(rows, cols, rows as u64 * 31 + cols as u64);
        let (_, field) = match_and_derive(&image, MapShape::Slope);
        assert_eq!((field.rows(), field.cols()), (rows, cols));
        assert_eq!(field.positions(), rows + 1);
    }
}

#[test]
fn derived_heights_reproduce_every_shade() {
    for seed in 0..4 {
        let image = fixtures::noise_image(12, 6, seed);
        let (grid, field) = match_and_derive(&image, MapShape::Slope);
        assert_eq!(field.realized_map(), grid);
    }
}

#[test]
fn none_strategy_never_changes_heights() {
    let image = fixtures::noise_image(20, 4, 99);
    let (_, field) = match_and_derive(&image, MapShape::Slope);
    for budget in [0, 5, 10, 1000] {
        assert_eq!(compress(&field, budget, CompressStrategy::None).unwrap(), field);
    }
}

#[test]
fn natural_compression_fits_or_fails_but_never_overshoots() {
    for seed in 0..6 {
        let image = fixtures::noise_image(40, 5, seed);
        let (grid, field) = match_and_derive(&image, MapShape::Slope);
        for budget in [MIN_HEIGHT_BUDGET, 16, 24] {
            match compress(&field, budget, CompressStrategy::NaturalOnly) {
                Ok(out) => {
                    common::assert_heights_within(&out, budget);
                    assert_eq!(out.realized_map(), grid, "natural compression lost a shade");
                }
                Err(BuildError::CompressionFailed { height, max_height, .. }) => {
                    assert!(height > max_height);
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }
}

#[test]
fn forced_compression_respects_floors_and_budget() {
    for seed in 0..6 {
        let image = fixtures::noise_image(40, 5, 100 + seed);
        let (_, field) = match_and_derive(&image, MapShape::Slope);
        for strategy in [CompressStrategy::ForcedOnly, CompressStrategy::Both] {
            let out = compress(&field, MIN_HEIGHT_BUDGET, strategy).unwrap();
            common::assert_heights_within(&out, MIN_HEIGHT_BUDGET);
        }
    }
}

#[test]
fn budget_below_minimum_is_rejected() {
    let (_, field) = match_and_derive(&fixtures::noise_image(4, 4, 1), MapShape::Slope);
    assert_eq!(
        compress(&field, MIN_HEIGHT_BUDGET - 1, CompressStrategy::Both),
        Err(BuildError::InvalidHeightBudget {
            max_height: MIN_HEIGHT_BUDGET - 1,
            minimum: MIN_HEIGHT_BUDGET
        })
    );
}

#[test]
fn flat_maps_stay_low() {
    let image = fixtures::noise_image(10, 10, 5);
    let (_, field) = match_and_derive(&image, MapShape::Flat);
    // level blocks, one-deep water and glass under supported blocks
    assert!(field.max_height() <= 1);
    for col in 0..field.cols() {
        let column = field.column(col);
        assert!(column.iter().all(|&h| h == column[0]));
    }
}

#[test]
fn voxel_count_matches_stats() {
    let image = fixtures::ramp_image(6, 9);
    let palette = Palette::new();
    let blocks = fixtures::all_need_support();
    let grid = convert(
        &palette,
        &image,
        &allowed_for(MapShape::Slope),
        ColorSpace::Lab94,
        true,
        &NoProgress,
    )
    .unwrap();
    let field = derive(&grid, &palette, MapShape::Slope, &blocks);
    let plan = build_bridges(&field, 2, true);
    assert!(!plan.is_empty());

    let voxels = assemble(&field, &plan);
    common::assert_staircase_dimensions(&voxels, &field);
    let stats: BuildStats = voxels.stats();
    assert_eq!(stats.total_blocks, voxels.block_count());
    assert_eq!(stats.per_base.iter().sum::<u64>(), stats.total_blocks);
    // transparent first column builds nothing
    for y in 0..voxels.dimensions().1 {
        for z in 0..voxels.dimensions().2 {
            assert_eq!(voxels.get(0, y, z), 0);
        }
    }
}

#[test]
fn wall_is_one_block_thick() {
    let image = fixtures::noise_image(5, 3, 8);
    let (grid, field) = match_and_derive(&image, MapShape::Wall);
    let voxels = assemble(&field, &build_bridges(&field, 1, true));
    assert_eq!(voxels.dimensions(), (3, 5, 1));
    let opaque = grid.cells().iter().filter(|c| c.is_some()).count() as u64;
    assert_eq!(voxels.block_count(), opaque);
}
