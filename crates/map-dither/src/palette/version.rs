//! Target world versions and output shapes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Game release the map art is built for.
///
/// Ordered, so `entry.min_version <= target` answers "does this color exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldVersion {
    #[cfg_attr(feature = "serde", serde(rename = "1.12"))]
    Mc12,
    #[cfg_attr(feature = "serde", serde(rename = "1.13"))]
    Mc13,
    #[cfg_attr(feature = "serde", serde(rename = "1.14"))]
    Mc14,
    #[cfg_attr(feature = "serde", serde(rename = "1.15"))]
    Mc15,
    #[cfg_attr(feature = "serde", serde(rename = "1.16"))]
    Mc16,
    #[cfg_attr(feature = "serde", serde(rename = "1.17"))]
    Mc17,
    #[cfg_attr(feature = "serde", serde(rename = "1.18"))]
    Mc18,
    #[cfg_attr(feature = "serde", serde(rename = "1.19"))]
    Mc19,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1.20"))]
    Mc20,
    /// Placeholder for colors no released version offers yet.
    #[cfg_attr(feature = "serde", serde(rename = "future"))]
    Future,
}

impl WorldVersion {
    pub const RELEASED: [WorldVersion; 9] = [
        WorldVersion::Mc12,
        WorldVersion::Mc13,
        WorldVersion::Mc14,
        WorldVersion::Mc15,
        WorldVersion::Mc16,
        WorldVersion::Mc17,
        WorldVersion::Mc18,
        WorldVersion::Mc19,
        WorldVersion::Mc20,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorldVersion::Mc12 => "1.12",
            WorldVersion::Mc13 => "1.13",
            WorldVersion::Mc14 => "1.14",
            WorldVersion::Mc15 => "1.15",
            WorldVersion::Mc16 => "1.16",
            WorldVersion::Mc17 => "1.17",
            WorldVersion::Mc18 => "1.18",
            WorldVersion::Mc19 => "1.19",
            WorldVersion::Mc20 => "1.20",
            WorldVersion::Future => "future",
        }
    }
}

impl fmt::Display for WorldVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the finished map art is laid out in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MapShape {
    /// Staircase of blocks; every shade is reachable.
    #[default]
    Slope,
    /// Single-height plate on the ground.
    Flat,
    /// Single-depth plate stood upright.
    Wall,
    /// Only the map data is produced; nothing has to be buildable.
    FileOnly,
}

impl MapShape {
    pub const ALL: [MapShape; 4] = [
        MapShape::Slope,
        MapShape::Flat,
        MapShape::Wall,
        MapShape::FileOnly,
    ];

    /// Whether the result has to be obtainable in an unmodified game.
    #[inline]
    pub fn is_vanilla(self) -> bool {
        self != MapShape::FileOnly
    }

    /// Whether every block sits at the same level.
    #[inline]
    pub fn is_flat(self) -> bool {
        matches!(self, MapShape::Flat | MapShape::Wall)
    }

    pub fn name(self) -> &'static str {
        match self {
            MapShape::Slope => "slope",
            MapShape::Flat => "flat",
            MapShape::Wall => "wall",
            MapShape::FileOnly => "file-only",
        }
    }
}

impl fmt::Display for MapShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that does not denote any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for WorldVersion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let wanted = trimmed.strip_prefix("mc").unwrap_or(&trimmed);
        WorldVersion::RELEASED
            .into_iter()
            .chain(std::iter::once(WorldVersion::Future))
            .find(|v| v.name() == wanted || v.name().trim_start_matches("1.") == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "world version",
                value: s.to_string(),
            })
    }
}

impl FromStr for MapShape {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        MapShape::ALL
            .into_iter()
            .find(|shape| shape.name() == lower)
            .ok_or_else(|| ParseEnumError {
                kind: "map shape",
                value: s.to_string(),
            })
    }
}
