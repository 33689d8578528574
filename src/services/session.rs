//! Conversion session: owns every input and derived artifact of one
//! image-to-build conversion and enforces the order of operations.

use std::collections::HashMap;
use std::sync::Arc;

use map_dither::{AllowedColors, ColorSpace, MapShape, MatchGrid, Palette, PixelGrid};

use super::reporter::{ProgressAdapter, Reporter, SilentReporter};
use crate::building::{self, BuildStats, HeightField, SupportPlan, VoxelGrid};
use crate::error::SessionError;
use crate::models::{BlockPalette, BuildOptions, PaletteSelection, Step, WorkStatus};

struct Converted {
    space: ColorSpace,
    dither: bool,
    field: HeightField,
}

struct Built {
    options: BuildOptions,
    field: HeightField,
    plan: SupportPlan,
    voxels: VoxelGrid,
    stats: BuildStats,
}

/// One conversion, from palette selection to voxel grid.
///
/// Sessions share nothing mutable, so independent sessions can run on
/// different threads. Every failed operation leaves the session in the
/// step it was in before.
pub struct Session {
    palette: Arc<Palette>,
    blocks: BlockPalette,
    reporter: Arc<dyn Reporter>,
    step: Step,
    selection: Option<PaletteSelection>,
    allowed: Option<AllowedColors>,
    image: Option<PixelGrid>,
    matches: HashMap<(ColorSpace, bool), MatchGrid>,
    converted: Option<Converted>,
    built: Option<Built>,
}

impl Session {
    pub fn new(palette: Arc<Palette>, blocks: BlockPalette) -> Self {
        Self {
            palette,
            blocks,
            reporter: Arc::new(SilentReporter),
            step: Step::Empty,
            selection: None,
            allowed: None,
            image: None,
            matches: HashMap::new(),
            converted: None,
            built: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn blocks(&self) -> &BlockPalette {
        &self.blocks
    }

    pub fn selection(&self) -> Option<&PaletteSelection> {
        self.selection.as_ref()
    }

    /// Replace the block assignments. The allowed set depends on them, so
    /// the session drops back to `Empty`; a loaded image is kept.
    pub fn set_block_palette(&mut self, blocks: BlockPalette) -> Step {
        self.blocks = blocks;
        self.selection = None;
        self.allowed = None;
        self.clear_conversions();
        self.step = Step::Empty;
        tracing::info!(step = %self.step, "Block palette replaced");
        self.step
    }

    /// Compute the allowed colors for `selection`.
    pub fn set_palette_selection(
        &mut self,
        selection: PaletteSelection,
    ) -> Result<Step, SessionError> {
        self.reporter.working_status(WorkStatus::CollectingColors);
        let assigned = self
            .blocks
            .assigned_mask(selection.fire_proof, selection.enderman_proof);
        let allowed = AllowedColors::compute(
            &self.palette,
            &selection.enabled,
            &assigned,
            selection.version,
            selection.shape,
        );
        let allowed = match allowed {
            Ok(allowed) => allowed,
            Err(e) => return Err(self.fail(e.into())),
        };

        tracing::info!(
            version = %selection.version,
            shape = %selection.shape,
            colors = allowed.len(),
            "Palette selection applied"
        );
        self.selection = Some(selection);
        self.allowed = Some(allowed);
        self.clear_conversions();
        self.step = if self.image.is_some() {
            Step::ImageLoaded
        } else {
            Step::PaletteReady
        };
        self.reporter.working_status(WorkStatus::Idle);
        Ok(self.step)
    }

    pub fn load_image(&mut self, image: PixelGrid) -> Result<Step, SessionError> {
        self.require("load_image", Step::PaletteReady)?;
        if image.is_empty() {
            return Err(self.fail(SessionError::EmptyImage));
        }
        tracing::info!(rows = image.rows(), cols = image.cols(), "Image loaded");
        self.image = Some(image);
        self.clear_conversions();
        self.step = Step::ImageLoaded;
        Ok(self.step)
    }

    /// Match the image against the allowed colors and derive its heights.
    ///
    /// Match grids are cached per color space and dither flag until the
    /// image or the palette selection changes.
    pub fn convert(&mut self, space: ColorSpace, dither: bool) -> Result<Step, SessionError> {
        self.require("convert", Step::ImageLoaded)?;
        let (Some(image), Some(allowed), Some(selection)) =
            (&self.image, &self.allowed, &self.selection)
        else {
            let error = SessionError::InternalConsistency("image loaded without inputs".into());
            return Err(self.fail(error));
        };
        let shape = selection.shape;

        if !self.matches.contains_key(&(space, dither)) {
            self.reporter.working_status(if dither {
                WorkStatus::Dithering
            } else {
                WorkStatus::Converting
            });
            let progress = ProgressAdapter(self.reporter.as_ref());
            let converted =
                map_dither::convert(&self.palette, image, allowed, space, dither, &progress)
                    .map_err(SessionError::from)
                    .and_then(|grid| check_allowed(&grid, allowed).map(|()| grid));
            let grid = match converted {
                Ok(grid) => grid,
                Err(e) => return Err(self.fail(e)),
            };
            self.matches.insert((space, dither), grid);
        } else {
            tracing::debug!(%space, dither, "Match grid cache hit");
        }
        let Some(grid) = self.matches.get(&(space, dither)) else {
            let error = SessionError::InternalConsistency("match grid missing from cache".into());
            return Err(self.fail(error));
        };

        self.reporter.working_status(WorkStatus::BuildingHeightMap);
        let field = building::derive(grid, &self.palette, shape, &self.blocks);
        tracing::info!(%space, dither, max_height = field.max_height(), "Image converted");

        self.converted = Some(Converted {
            space,
            dither,
            field,
        });
        self.built = None;
        self.step = Step::Converted;
        self.reporter.working_status(WorkStatus::Idle);
        Ok(self.step)
    }

    /// Compress heights, plan supports and assemble the voxel grid.
    pub fn build(&mut self, options: BuildOptions) -> Result<Step, SessionError> {
        self.require("build", Step::Converted)?;
        let Some(converted) = &self.converted else {
            let error = SessionError::InternalConsistency("converted without height field".into());
            return Err(self.fail(error));
        };

        self.reporter.working_status(WorkStatus::Compressing);
        let field = match building::compress(&converted.field, options.max_height, options.compress)
        {
            Ok(field) => field,
            Err(e) => {
                self.built = None;
                self.step = Step::Converted;
                return Err(self.fail(e.into()));
            }
        };

        self.reporter.working_status(WorkStatus::ConstructingBridges);
        let plan = building::build_bridges(&field, options.bridge_interval, options.bridges);

        self.reporter.working_status(if field.shape() == MapShape::Wall {
            WorkStatus::FlippingToWall
        } else {
            WorkStatus::Building3D
        });
        let voxels = building::assemble(&field, &plan);
        let stats = voxels.stats();

        tracing::info!(
            max_height = field.max_height(),
            supports = plan.len(),
            blocks = stats.total_blocks,
            "Build finished"
        );
        self.built = Some(Built {
            options,
            field,
            plan,
            voxels,
            stats,
        });
        self.step = Step::Built;
        self.reporter.working_status(WorkStatus::Idle);
        Ok(self.step)
    }

    /// Step back once, dropping whatever the current step produced.
    pub fn decrease_step(&mut self) -> Step {
        match self.step {
            Step::Empty => {}
            Step::PaletteReady => {
                self.selection = None;
                self.allowed = None;
            }
            Step::ImageLoaded => {
                self.image = None;
                self.matches.clear();
            }
            Step::Converted => self.converted = None,
            Step::Built => self.built = None,
        }
        self.step = self.step.previous().unwrap_or(Step::Empty);
        tracing::debug!(step = %self.step, "Stepped back");
        self.step
    }

    pub fn allowed(&self) -> Result<&AllowedColors, SessionError> {
        self.require("allowed", Step::PaletteReady)?;
        self.allowed.as_ref().ok_or_else(|| missing("allowed colors"))
    }

    pub fn image(&self) -> Result<&PixelGrid, SessionError> {
        self.require("image", Step::ImageLoaded)?;
        self.image.as_ref().ok_or_else(|| missing("image"))
    }

    /// Match grid of the latest conversion.
    pub fn match_grid(&self) -> Result<&MatchGrid, SessionError> {
        self.require("match_grid", Step::Converted)?;
        self.converted
            .as_ref()
            .and_then(|c| self.matches.get(&(c.space, c.dither)))
            .ok_or_else(|| missing("match grid"))
    }

    /// Heights after the latest build, or as derived when not built yet.
    pub fn height_field(&self) -> Result<&HeightField, SessionError> {
        self.require("height_field", Step::Converted)?;
        if let Some(built) = &self.built {
            return Ok(&built.field);
        }
        self.converted
            .as_ref()
            .map(|c| &c.field)
            .ok_or_else(|| missing("height field"))
    }

    pub fn build_options(&self) -> Result<&BuildOptions, SessionError> {
        self.built_data("build_options").map(|b| &b.options)
    }

    pub fn support_plan(&self) -> Result<&SupportPlan, SessionError> {
        self.built_data("support_plan").map(|b| &b.plan)
    }

    pub fn voxels(&self) -> Result<&VoxelGrid, SessionError> {
        self.built_data("voxels").map(|b| &b.voxels)
    }

    pub fn stats(&self) -> Result<&BuildStats, SessionError> {
        self.built_data("stats").map(|b| &b.stats)
    }

    /// RGBA8 rendering of the match grid.
    pub fn preview_rgba(&self) -> Result<Vec<u8>, SessionError> {
        Ok(self.match_grid()?.preview_rgba(&self.palette))
    }

    /// Shades the current heights produce.
    pub fn realized_map(&self) -> Result<MatchGrid, SessionError> {
        Ok(self.height_field()?.realized_map())
    }

    /// In-game map bytes of what the current heights produce.
    pub fn map_data(&self) -> Result<Vec<u8>, SessionError> {
        Ok(self.realized_map()?.map_colors(&self.palette))
    }

    fn built_data(&self, operation: &'static str) -> Result<&Built, SessionError> {
        self.require(operation, Step::Built)?;
        self.built.as_ref().ok_or_else(|| missing("build output"))
    }

    fn require(&self, operation: &'static str, required: Step) -> Result<(), SessionError> {
        if self.step < required {
            return Err(self.fail(SessionError::PrematureOperation {
                operation,
                required,
                current: self.step,
            }));
        }
        Ok(())
    }

    fn fail(&self, error: SessionError) -> SessionError {
        self.reporter.report_error(&error);
        self.reporter.working_status(WorkStatus::Idle);
        error
    }

    fn clear_conversions(&mut self) {
        self.matches.clear();
        self.converted = None;
        self.built = None;
    }
}

fn missing(what: &str) -> SessionError {
    SessionError::InternalConsistency(format!("{what} missing for the current step"))
}

fn check_allowed(grid: &MatchGrid, allowed: &AllowedColors) -> Result<(), SessionError> {
    match grid.cells().iter().flatten().find(|&&i| !allowed.contains(i)) {
        Some(index) => Err(SessionError::InternalConsistency(format!(
            "matched palette index {index} is not in the allowed set"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_dither::{join_index, WorldVersion};
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(Palette::shared(), BlockPalette::default())
    }

    fn red_image() -> PixelGrid {
        PixelGrid::filled(2, 2, 0xFFFF_0000)
    }

    #[test]
    fn starts_empty() {
        let s = session();
        assert_eq!(s.step(), Step::Empty);
        assert!(matches!(
            s.allowed(),
            Err(SessionError::PrematureOperation {
                required: Step::PaletteReady,
                current: Step::Empty,
                ..
            })
        ));
    }

    #[test]
    fn full_run_reaches_built() {
        let mut s = session();
        let sel = PaletteSelection::new(WorldVersion::Mc20, MapShape::Slope);
        assert_eq!(s.set_palette_selection(sel).unwrap(), Step::PaletteReady);
        assert_eq!(s.load_image(red_image()).unwrap(), Step::ImageLoaded);
        assert_eq!(s.convert(ColorSpace::Rgb, false).unwrap(), Step::Converted);
        assert_eq!(s.build(BuildOptions::default()).unwrap(), Step::Built);
        let stats = s.stats().unwrap();
        assert_eq!(stats.total_blocks, s.voxels().unwrap().block_count());
    }

    #[test]
    fn empty_image_is_rejected() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        let empty = PixelGrid::filled(0, 0, 0);
        assert_eq!(s.load_image(empty), Err(SessionError::EmptyImage));
        assert_eq!(s.step(), Step::PaletteReady);
    }

    #[test]
    fn failed_selection_keeps_state() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        let none = PaletteSelection {
            enabled: [false; 64],
            ..PaletteSelection::default()
        };
        assert!(matches!(
            s.set_palette_selection(none),
            Err(SessionError::TooFewColors { count: 0, .. })
        ));
        assert_eq!(s.step(), Step::PaletteReady);
        assert!(s.allowed().unwrap().len() > 1);
    }

    #[test]
    fn conversions_are_cached() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Lab94, true).unwrap();
        let first = s.match_grid().unwrap().clone();
        s.convert(ColorSpace::Rgb, false).unwrap();
        s.convert(ColorSpace::Lab94, true).unwrap();
        assert_eq!(s.matches.len(), 2);
        assert_eq!(s.match_grid().unwrap(), &first);
    }

    #[test]
    fn new_image_drops_cache() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Rgb, false).unwrap();
        s.load_image(red_image()).unwrap();
        assert!(s.matches.is_empty());
        assert_eq!(s.step(), Step::ImageLoaded);
    }

    #[test]
    fn reselecting_palette_keeps_image() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Rgb, false).unwrap();
        let flat = PaletteSelection::new(WorldVersion::Mc20, MapShape::Flat);
        assert_eq!(s.set_palette_selection(flat).unwrap(), Step::ImageLoaded);
        assert!(s.match_grid().is_err());
        assert!(s.image().is_ok());
    }

    #[test]
    fn failed_build_stays_converted() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Rgb, false).unwrap();
        s.build(BuildOptions::default()).unwrap();
        let bad = BuildOptions {
            max_height: 3,
            compress: crate::models::CompressStrategy::Both,
            ..BuildOptions::default()
        };
        assert!(matches!(
            s.build(bad),
            Err(SessionError::InvalidHeightBudget { max_height: 3, .. })
        ));
        assert_eq!(s.step(), Step::Converted);
        assert!(s.voxels().is_err());
    }

    #[test]
    fn decrease_step_walks_back() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Rgb, false).unwrap();
        s.build(BuildOptions::default()).unwrap();
        assert_eq!(s.decrease_step(), Step::Converted);
        assert!(s.voxels().is_err());
        assert!(s.match_grid().is_ok());
        assert_eq!(s.decrease_step(), Step::ImageLoaded);
        assert_eq!(s.decrease_step(), Step::PaletteReady);
        assert!(s.image().is_err());
        assert_eq!(s.decrease_step(), Step::Empty);
        assert_eq!(s.decrease_step(), Step::Empty);
    }

    #[test]
    fn block_palette_change_resets_to_empty() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::default()).unwrap();
        s.load_image(red_image()).unwrap();
        assert_eq!(s.set_block_palette(BlockPalette::default()), Step::Empty);
        assert_eq!(s.set_palette_selection(PaletteSelection::default()).unwrap(), Step::ImageLoaded);
    }

    #[test]
    fn map_data_is_column_major_map_bytes() {
        let mut s = session();
        s.set_palette_selection(PaletteSelection::new(WorldVersion::Mc20, MapShape::Flat))
            .unwrap();
        s.load_image(red_image()).unwrap();
        s.convert(ColorSpace::Rgb, false).unwrap();
        let grid = s.match_grid().unwrap();
        assert!(grid.cells().iter().all(|c| *c == Some(join_index(4, 1))));
        assert_eq!(s.map_data().unwrap(), vec![4 * 4 + 1; 4]);
    }

    #[test]
    fn sessions_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Session>();
    }
}
