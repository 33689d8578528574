//! Asset loading with embedded fallbacks
//!
//! Two assets ship inside the binary: `config.yaml` and `blocks.yaml`.
//!
//! - If the env var for an asset is NOT set: use the embedded copy only
//! - If it IS set and the file is missing: seed it from the embedded copy, then use it
//! - If it IS set and the file exists: read it from the filesystem

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default assets
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.yaml"]
struct EmbeddedAssets;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Blocks,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Config, AssetCategory::Blocks];

    /// File name inside the embedded folder
    pub fn file_name(self) -> &'static str {
        match self {
            AssetCategory::Config => "config.yaml",
            AssetCategory::Blocks => "blocks.yaml",
        }
    }

    /// Environment variable that points at an external copy
    pub fn env_var(self) -> &'static str {
        match self {
            AssetCategory::Config => "CONFIG_FILE",
            AssetCategory::Blocks => "BLOCKS_FILE",
        }
    }
}

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub seeded: Vec<String>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External block list path (from BLOCKS_FILE env var)
    blocks_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    pub fn new(config_file: Option<PathBuf>, blocks_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            blocks_file,
        }
    }

    /// Create a loader from `CONFIG_FILE` and `BLOCKS_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(AssetCategory::Config.env_var()).ok().map(PathBuf::from),
            std::env::var(AssetCategory::Blocks.env_var()).ok().map(PathBuf::from),
        )
    }

    fn external(&self, category: AssetCategory) -> Option<&Path> {
        match category {
            AssetCategory::Config => self.config_file.as_deref(),
            AssetCategory::Blocks => self.blocks_file.as_deref(),
        }
    }

    /// Where `init` writes a category when no path is configured
    fn target_path(&self, category: AssetCategory) -> PathBuf {
        self.external(category)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format!("./{}", category.file_name())))
    }

    /// Describe where an asset is read from (for status output)
    pub fn source(&self, category: AssetCategory) -> String {
        match self.external(category) {
            Some(path) if path.exists() => path.display().to_string(),
            Some(_) => "embedded (file not found)".to_string(),
            None => "embedded".to_string(),
        }
    }

    /// Read an asset
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to the embedded copy.
    pub fn read(&self, category: AssetCategory) -> io::Result<Cow<'static, [u8]>> {
        if let Some(path) = self.external(category) {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading asset from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        let name = category.file_name();
        EmbeddedAssets::get(name)
            .map(|f| {
                tracing::trace!(asset = name, "Loading asset from embedded copy");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Embedded {name} not found"))
            })
    }

    /// Read an asset as a UTF-8 string
    pub fn read_string(&self, category: AssetCategory) -> io::Result<String> {
        let bytes = self.read(category)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn read_config_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Config)
    }

    pub fn read_blocks_string(&self) -> io::Result<String> {
        self.read_string(AssetCategory::Blocks)
    }

    /// Write missing configured files from the embedded copies
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        for category in AssetCategory::ALL {
            let Some(path) = self.external(category) else {
                continue;
            };
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Some(data) = EmbeddedAssets::get(category.file_name()) {
                fs::write(path, &*data.data)?;
                tracing::info!(path = %path.display(), "Seeded asset with embedded default");
                report.seeded.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths, or the working directory if not set.
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for &category in categories {
            let path = self.target_path(category);
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Some(data) = EmbeddedAssets::get(category.file_name()) {
                fs::write(&path, &*data.data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedAssets::iter().map(|s| s.to_string()).collect();
        files.sort();
        files
    }
}
