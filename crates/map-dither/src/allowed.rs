//! Selection of the palette entries a conversion may use.

use thiserror::Error;

use crate::color::ColorSpace;
use crate::palette::{split_index, MapShape, Palette, WorldVersion, NONE_BASE, WATER_BASE};

/// Fewest usable entries a conversion can work with.
pub const MIN_ALLOWED_COLORS: usize = 1;

/// The selection left fewer entries than [`MIN_ALLOWED_COLORS`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("only {count} usable map colors left, at least {MIN_ALLOWED_COLORS} required")]
pub struct TooFewColors {
    pub count: usize,
    pub indices: Vec<u8>,
}

/// Why a palette index was left out. Checks run in declaration order and
/// the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Disabled,
    NoneColor,
    Version,
    NoBlock,
    NotVanilla,
    FlatShape,
}

/// Sorted set of usable palette indices.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedColors {
    indices: Vec<u8>,
}

impl AllowedColors {
    /// Filter the palette.
    ///
    /// `enabled` is the user's base color choice, `assigned` marks base
    /// colors that have a block to build them with. On flat shapes each base
    /// color keeps only the depth a level block produces: depth 1, except
    /// water on a floor-level plate which needs depth 2 (one block deep).
    pub fn compute(
        palette: &Palette,
        enabled: &[bool; 64],
        assigned: &[bool; 64],
        version: WorldVersion,
        shape: MapShape,
    ) -> Result<Self, TooFewColors> {
        let indices: Vec<u8> = palette
            .entries()
            .iter()
            .filter(|e| exclusion(palette, e.index, enabled, assigned, version, shape).is_none())
            .map(|e| e.index)
            .collect();

        if indices.len() < MIN_ALLOWED_COLORS {
            return Err(TooFewColors {
                count: indices.len(),
                indices,
            });
        }
        Ok(Self { indices })
    }

    /// Build a set from explicit indices; duplicates are dropped.
    pub fn from_indices(indices: &[u8]) -> Self {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: u8) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Candidate list for a matcher: `(index, coordinates)` in ascending order.
    pub fn candidates(&self, palette: &Palette, space: ColorSpace) -> Vec<(u8, [f32; 3])> {
        self.indices
            .iter()
            .map(|&i| (i, palette.rgb(i, space)))
            .collect()
    }
}

/// First rule excluding `index`, or `None` if the entry is usable.
pub fn exclusion(
    palette: &Palette,
    index: u8,
    enabled: &[bool; 64],
    assigned: &[bool; 64],
    version: WorldVersion,
    shape: MapShape,
) -> Option<Exclusion> {
    let (base, depth) = split_index(index);
    if !enabled[base as usize] {
        return Some(Exclusion::Disabled);
    }
    if base == NONE_BASE {
        return Some(Exclusion::NoneColor);
    }
    match palette.entry(index).min_version {
        Some(since) if since <= version => {}
        _ => return Some(Exclusion::Version),
    }
    if !assigned[base as usize] {
        return Some(Exclusion::NoBlock);
    }
    if shape.is_vanilla() && depth >= 3 {
        return Some(Exclusion::NotVanilla);
    }
    if shape.is_flat() {
        let required = if base == WATER_BASE && shape != MapShape::Wall {
            2
        } else {
            1
        };
        if depth != required {
            return Some(Exclusion::FlatShape);
        }
    }
    None
}
