use crate::assets::AssetLoader;
use crate::models::block::{base_by_name, BlockOverrides};
use crate::models::options::{BuildOptions, PaletteSelection};
use map_dither::{ColorSpace, MapShape, WorldVersion};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Which map colors may be used
    pub palette: PaletteConfig,

    /// Color matching settings
    pub convert: ConvertConfig,

    /// Height budget, compression and bridges
    pub build: BuildOptions,

    /// Per-color overrides of the embedded block list
    pub blocks: BlockOverrides,
}

/// Palette section of the configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub version: WorldVersion,
    pub shape: MapShape,

    /// Base colors to leave out, by name or number
    pub disabled: Vec<String>,

    pub fire_proof: bool,
    pub enderman_proof: bool,
}

/// Convert section of the configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConvertConfig {
    pub color_space: ColorSpace,
    pub dither: bool,
}

impl PaletteConfig {
    /// Turn names into a selection; unknown names are skipped with a warning.
    pub fn selection(&self) -> PaletteSelection {
        let mut selection = PaletteSelection::new(self.version, self.shape)
            .fire_proof(self.fire_proof)
            .enderman_proof(self.enderman_proof);
        for name in &self.disabled {
            match base_by_name(name) {
                Some(base) => selection = selection.without(base),
                None => tracing::warn!(color = %name, "Unknown base color in disabled list"),
            }
        }
        selection
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        version = %config.palette.version,
                        shape = %config.palette.shape,
                        color_space = %config.convert.color_space,
                        overrides = config.blocks.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::CompressStrategy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.palette.version, WorldVersion::Mc20);
        assert_eq!(config.palette.shape, MapShape::Slope);
        assert!(config.palette.disabled.is_empty());
        assert_eq!(config.convert.color_space, ColorSpace::RgbBetter);
        assert!(!config.convert.dither);
        assert_eq!(config.build, BuildOptions::default());
        assert!(config.blocks.is_empty());
    }

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::load_from_assets(&AssetLoader::default());

        assert_eq!(config.convert.color_space, ColorSpace::Lab00);
        assert_eq!(config.build.compress, CompressStrategy::Both);
        assert!(config.build.bridges);
        assert_eq!(config.build.bridge_interval, 3);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str(
            "palette:\n  version: \"1.16\"\n  shape: flat\n  disabled: [fire, \"5\"]\n\
             convert:\n  dither: true\n\
             blocks:\n  plant: ~\n",
        )
        .unwrap();

        assert_eq!(config.palette.version, WorldVersion::Mc16);
        assert_eq!(config.palette.shape, MapShape::Flat);
        assert!(config.convert.dither);
        assert_eq!(config.convert.color_space, ColorSpace::RgbBetter);
        assert_eq!(config.blocks.get("plant"), Some(&None));

        let selection = config.palette.selection();
        assert!(!selection.enabled[4]);
        assert!(!selection.enabled[5]);
        assert!(selection.enabled[6]);
    }

    #[test]
    fn test_unknown_disabled_names_are_ignored() {
        let palette = PaletteConfig {
            disabled: vec!["unobtainium".into()],
            ..PaletteConfig::default()
        };
        assert!(palette.selection().enabled.iter().all(|&e| e));
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "palette: [not, a, map]\n").unwrap();

        let config = AppConfig::load_from_assets(&AssetLoader::new(Some(path), None));
        assert_eq!(config, AppConfig::default());
    }
}
