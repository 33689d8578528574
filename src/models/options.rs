//! Option structs passed into a session.

use map_dither::{MapShape, WorldVersion, BASE_COLOR_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which height compression passes a build may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressStrategy {
    #[default]
    None,
    NaturalOnly,
    ForcedOnly,
    Both,
}

impl CompressStrategy {
    pub fn natural(self) -> bool {
        matches!(self, CompressStrategy::NaturalOnly | CompressStrategy::Both)
    }

    pub fn forced(self) -> bool {
        matches!(self, CompressStrategy::ForcedOnly | CompressStrategy::Both)
    }
}

impl fmt::Display for CompressStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompressStrategy::None => "none",
            CompressStrategy::NaturalOnly => "natural-only",
            CompressStrategy::ForcedOnly => "forced-only",
            CompressStrategy::Both => "both",
        })
    }
}

/// A name that is not a compression strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compression strategy '{0}' (expected none, natural-only, forced-only, both)")]
pub struct ParseStrategyError(pub String);

impl FromStr for CompressStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CompressStrategy::None),
            "natural" | "natural-only" => Ok(CompressStrategy::NaturalOnly),
            "forced" | "forced-only" => Ok(CompressStrategy::ForcedOnly),
            "both" => Ok(CompressStrategy::Both),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Everything the build step needs beyond the converted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Highest allowed block top, inclusive.
    pub max_height: u32,
    pub compress: CompressStrategy,
    pub bridges: bool,
    /// Every `bridge_interval`-th supported block along a column gets a full pillar.
    pub bridge_interval: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_height: 256,
            compress: CompressStrategy::None,
            bridges: false,
            bridge_interval: 3,
        }
    }
}

/// Inputs that decide the allowed palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSelection {
    pub enabled: [bool; BASE_COLOR_COUNT],
    pub version: WorldVersion,
    pub shape: MapShape,
    /// Skip base colors whose block burns.
    pub fire_proof: bool,
    /// Skip base colors whose block endermen can carry away.
    pub enderman_proof: bool,
}

impl Default for PaletteSelection {
    fn default() -> Self {
        Self {
            enabled: [true; BASE_COLOR_COUNT],
            version: WorldVersion::default(),
            shape: MapShape::default(),
            fire_proof: false,
            enderman_proof: false,
        }
    }
}

impl PaletteSelection {
    pub fn new(version: WorldVersion, shape: MapShape) -> Self {
        Self {
            version,
            shape,
            ..Self::default()
        }
    }

    /// Disable a base color.
    pub fn without(mut self, base: u8) -> Self {
        if let Some(flag) = self.enabled.get_mut(base as usize) {
            *flag = false;
        }
        self
    }

    pub fn fire_proof(mut self, on: bool) -> Self {
        self.fire_proof = on;
        self
    }

    pub fn enderman_proof(mut self, on: bool) -> Self {
        self.enderman_proof = on;
        self
    }
}
