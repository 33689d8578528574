use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use map_dither::{ColorSpace, MapShape, Palette, WorldVersion};
use mapforge::assets::{AssetCategory, AssetLoader};
use mapforge::building::BuildStats;
use mapforge::models::{AppConfig, BlockPalette, BuildOptions, CompressStrategy};
use mapforge::rendering::{decode_png, encode_rgba_png};
use mapforge::services::{LogReporter, Session};

#[derive(Parser)]
#[command(name = "mapforge")]
#[command(about = "Convert images into buildable map art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG into map colors and a voxel build
    Convert {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the matched map colors as a PNG preview
        #[arg(long)]
        output_preview: Option<PathBuf>,

        /// Write a JSON summary of the build
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Color space used for matching (rgb, rgb-better, hsv, lab94, lab00, xyz)
        #[arg(long)]
        color_space: Option<ColorSpace>,

        /// Diffuse matching error (Floyd-Steinberg)
        #[arg(long)]
        dither: bool,

        /// Map shape: slope, flat, wall or file-only
        #[arg(long)]
        shape: Option<MapShape>,

        /// Game version, e.g. 1.16
        #[arg(long)]
        version: Option<WorldVersion>,

        /// Highest allowed block top
        #[arg(long)]
        max_height: Option<u32>,

        /// Height compression: none, natural-only, forced-only, both
        #[arg(long)]
        compress: Option<CompressStrategy>,

        /// Every n-th supported block gets a full glass pillar
        #[arg(long)]
        bridge_interval: Option<u32>,

        /// Do not place glass supports
        #[arg(long)]
        no_bridges: bool,
    },
    /// List the map colors the current configuration allows
    Colors,
    /// Extract embedded config.yaml and blocks.yaml for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output_preview,
            summary,
            color_space,
            dither,
            shape,
            version,
            max_height,
            compress,
            bridge_interval,
            no_bridges,
        }) => {
            init_logging();
            let (mut config, loader) = load_config();
            if let Some(shape) = shape {
                config.palette.shape = shape;
            }
            if let Some(version) = version {
                config.palette.version = version;
            }
            if let Some(space) = color_space {
                config.convert.color_space = space;
            }
            config.convert.dither |= dither;
            if let Some(max_height) = max_height {
                config.build.max_height = max_height;
            }
            if let Some(compress) = compress {
                config.build.compress = compress;
            }
            if let Some(interval) = bridge_interval {
                config.build.bridge_interval = interval;
            }
            if no_bridges {
                config.build.bridges = false;
            }
            run_convert_command(
                &config,
                &loader,
                &input,
                output_preview.as_deref(),
                summary.as_deref(),
            )
        }
        Some(Commands::Colors) => {
            init_logging();
            let (config, loader) = load_config();
            run_colors_command(&config, &loader)
        }
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapforge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> (AppConfig, AssetLoader) {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed assets");
    }
    (AppConfig::load_from_assets(&loader), loader)
}

#[derive(Serialize)]
struct Summary<'a> {
    input: String,
    rows: usize,
    cols: usize,
    version: WorldVersion,
    shape: MapShape,
    color_space: ColorSpace,
    dither: bool,
    build: BuildOptions,
    allowed_colors: usize,
    height: u32,
    supports: usize,
    voxels: [usize; 3],
    stats: &'a BuildStats,
    map_data: Vec<u8>,
}

fn run_convert_command(
    config: &AppConfig,
    loader: &AssetLoader,
    input: &Path,
    output_preview: Option<&Path>,
    summary: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input)?;
    let image = decode_png(&bytes)?;

    let blocks = BlockPalette::load_from_assets(loader, &config.blocks);
    let mut session =
        Session::new(Palette::shared(), blocks).with_reporter(Arc::new(LogReporter::new()));
    session.set_palette_selection(config.palette.selection())?;
    session.load_image(image)?;
    session.convert(config.convert.color_space, config.convert.dither)?;
    session.build(config.build)?;

    let grid = session.match_grid()?;
    if let Some(path) = output_preview {
        let png = encode_rgba_png(grid.cols() as u32, grid.rows() as u32, &session.preview_rgba()?)?;
        std::fs::write(path, &png)?;
        println!("Preview written to {} ({} bytes)", path.display(), png.len());
    }

    let field = session.height_field()?;
    let (x_len, y_len, z_len) = session.voxels()?.dimensions();
    let stats = session.stats()?;
    println!(
        "Converted {} ({}x{}): {} blocks, {}x{}x{} voxels, height {}",
        input.display(),
        grid.cols(),
        grid.rows(),
        stats.total_blocks,
        x_len,
        y_len,
        z_len,
        field.max_height()
    );

    if let Some(path) = summary {
        let report = Summary {
            input: input.display().to_string(),
            rows: grid.rows(),
            cols: grid.cols(),
            version: config.palette.version,
            shape: config.palette.shape,
            color_space: config.convert.color_space,
            dither: config.convert.dither,
            build: config.build,
            allowed_colors: session.allowed()?.len(),
            height: field.max_height(),
            supports: session.support_plan()?.len(),
            voxels: [x_len, y_len, z_len],
            stats,
            map_data: session.map_data()?,
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn run_colors_command(config: &AppConfig, loader: &AssetLoader) -> anyhow::Result<()> {
    let palette = Palette::shared();
    let blocks = BlockPalette::load_from_assets(loader, &config.blocks);
    let mut session = Session::new(palette.clone(), blocks);
    session.set_palette_selection(config.palette.selection())?;
    let allowed = session.allowed()?;

    println!(
        "{} map colors for {} ({}):\n",
        allowed.len(),
        config.palette.version,
        config.palette.shape
    );
    println!("  index  map  rgb      base");
    for &index in allowed.indices() {
        let entry = palette.entry(index);
        let [r, g, b] = entry.rgb8;
        let block = session
            .blocks()
            .get(entry.base)
            .map_or("-", |info| info.id.as_str());
        println!(
            "  {index:>5}  {:>3}  #{r:02x}{g:02x}{b:02x}  {} (depth {}) {block}",
            entry.map_color(),
            palette.base_name(entry.base),
            entry.depth
        );
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&AssetCategory::ALL, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Mapforge v{VERSION}");
    println!("Image to block map art converter\n");

    println!("Environment Variables:");
    for category in AssetCategory::ALL {
        let var = category.env_var();
        let value = std::env::var(var).ok();
        println!(
            "  {var:<11} = {}",
            value.as_deref().unwrap_or("(not set)")
        );
    }

    let loader = AssetLoader::from_env();
    println!("\nAsset Sources:");
    for category in AssetCategory::ALL {
        println!("  {:<7} {}", category.file_name(), loader.source(category));
    }

    let config = AppConfig::load_from_assets(&loader);
    let blocks = BlockPalette::load_from_assets(&loader, &config.blocks);
    println!("\nConfiguration:");
    println!("  Version:     {}", config.palette.version);
    println!("  Shape:       {}", config.palette.shape);
    println!("  Color space: {}", config.convert.color_space);
    println!("  Dither:      {}", config.convert.dither);
    println!("  Max height:  {}", config.build.max_height);
    println!("  Compress:    {}", config.build.compress);
    println!(
        "  Bridges:     {}",
        if config.build.bridges {
            format!("every {}", config.build.bridge_interval)
        } else {
            "off".to_string()
        }
    );
    println!("  Blocks:      {} of 64 colors assigned", blocks.assigned_count());

    println!("\nRun 'mapforge init' to extract config files for editing.");
    println!("Run 'mapforge convert --input image.png' to convert an image.");
}
