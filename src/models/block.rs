//! Blocks assigned to base map colors.

use crate::assets::AssetLoader;
use map_dither::palette::BASE_COLORS;
use map_dither::{BASE_COLOR_COUNT, WATER_BASE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Block id used for supports and water basins.
pub const GLASS_ID: &str = "minecraft:glass";

/// A placeable block and the properties that matter for building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub id: String,
    #[serde(default)]
    pub needs_glass: bool,
    #[serde(default)]
    pub burnable: bool,
    #[serde(default)]
    pub enderman_pickable: bool,
}

impl BlockInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            needs_glass: false,
            burnable: false,
            enderman_pickable: false,
        }
    }

    pub fn glass() -> Self {
        Self::new(GLASS_ID)
    }
}

/// Block list entries keyed by base color name; `~` clears an entry.
pub type BlockOverrides = BTreeMap<String, Option<BlockInfo>>;

#[derive(Debug, Error)]
pub enum BlockPaletteError {
    #[error("invalid block list: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown base color '{0}'")]
    UnknownBaseColor(String),

    #[error("the support block (base color 'none') cannot be removed")]
    SupportRemoved,
}

/// One optional block per base color. Base 0 always holds the support block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPalette {
    support: BlockInfo,
    /// Indexed by base color; slot 0 stays empty.
    blocks: Vec<Option<BlockInfo>>,
}

/// Resolve a base color by name or number.
pub fn base_by_name(name: &str) -> Option<u8> {
    let name = name.trim();
    if let Ok(n) = name.parse::<u8>() {
        return ((n as usize) < BASE_COLOR_COUNT).then_some(n);
    }
    BASE_COLORS
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case(name))
        .map(|i| i as u8)
}

impl BlockPalette {
    /// Only the support block assigned.
    pub fn empty() -> Self {
        Self {
            support: BlockInfo::glass(),
            blocks: vec![None; BASE_COLOR_COUNT],
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, BlockPaletteError> {
        let entries: BlockOverrides = serde_yaml::from_str(content)?;
        let mut palette = Self::empty();
        palette.apply(&entries)?;
        Ok(palette)
    }

    /// Load the block list from assets and layer `overrides` on top.
    ///
    /// A broken block list falls back to an empty palette with a warning;
    /// broken overrides are skipped the same way.
    pub fn load_from_assets(loader: &AssetLoader, overrides: &BlockOverrides) -> Self {
        let mut palette = match loader.read_blocks_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(palette) => palette,
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse block list, no blocks assigned");
                    Self::empty()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read block list, no blocks assigned");
                Self::empty()
            }
        };
        if let Err(e) = palette.apply(overrides) {
            tracing::warn!(%e, "Ignoring invalid block override");
        }
        tracing::debug!(assigned = palette.assigned_count(), "Loaded block palette");
        palette
    }

    /// Apply entries in name order. Stops at the first invalid entry,
    /// keeping the ones applied before it.
    pub fn apply(&mut self, entries: &BlockOverrides) -> Result<(), BlockPaletteError> {
        for (name, info) in entries {
            let base = base_by_name(name)
                .ok_or_else(|| BlockPaletteError::UnknownBaseColor(name.clone()))?;
            self.set(base, info.clone())?;
        }
        Ok(())
    }

    pub fn set(&mut self, base: u8, info: Option<BlockInfo>) -> Result<(), BlockPaletteError> {
        if base == 0 {
            self.support = info.ok_or(BlockPaletteError::SupportRemoved)?;
            return Ok(());
        }
        match self.blocks.get_mut(base as usize) {
            Some(slot) => {
                *slot = info;
                Ok(())
            }
            None => Err(BlockPaletteError::UnknownBaseColor(base.to_string())),
        }
    }

    pub fn get(&self, base: u8) -> Option<&BlockInfo> {
        if base == 0 {
            return Some(&self.support);
        }
        self.blocks.get(base as usize).and_then(Option::as_ref)
    }

    pub fn support(&self) -> &BlockInfo {
        &self.support
    }

    /// Whether the block for `base` has to rest on something.
    pub fn needs_support(&self, base: u8) -> bool {
        base != WATER_BASE && self.get(base).is_some_and(|b| b.needs_glass)
    }

    /// Base colors with a usable block, after the safety filters.
    pub fn assigned_mask(&self, fire_proof: bool, enderman_proof: bool) -> [bool; BASE_COLOR_COUNT] {
        let mut mask = [false; BASE_COLOR_COUNT];
        for (base, slot) in mask.iter_mut().enumerate() {
            *slot = match self.get(base as u8) {
                Some(b) => !(fire_proof && b.burnable) && !(enderman_proof && b.enderman_pickable),
                None => false,
            };
        }
        mask
    }

    pub fn assigned_count(&self) -> usize {
        1 + self.blocks.iter().filter(|b| b.is_some()).count()
    }
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self::load_from_assets(&AssetLoader::default(), &BlockOverrides::new())
    }
}
