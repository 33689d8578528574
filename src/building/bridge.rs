//! Glass supports under blocks that would otherwise fall or break.

use super::height::HeightField;
use map_dither::MapShape;

/// Glass block positions to add to a build, as `(x, y, z)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportPlan {
    blocks: Vec<(usize, u32, usize)>,
}

impl SupportPlan {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u32, usize)> + '_ {
        self.blocks.iter().copied()
    }

    pub fn contains(&self, x: usize, y: u32, z: usize) -> bool {
        self.blocks.contains(&(x, y, z))
    }
}

/// Plan glass under every block that needs support.
///
/// Every `interval`-th supported block along a column (counted by z, with
/// the north row at z = 0) gets a pillar down to y = 0 instead of a single
/// block. Walls stand upright and get no supports.
pub fn build_bridges(field: &HeightField, interval: u32, enabled: bool) -> SupportPlan {
    if !enabled || field.shape() == MapShape::Wall {
        return SupportPlan::default();
    }
    let interval = interval.max(1) as usize;

    let mut blocks = Vec::new();
    let mut pillars = 0usize;
    for col in 0..field.cols() {
        for row in 0..field.rows() {
            let cell = field.cell(row, col);
            if !cell.is_occupied() || !cell.needs_support {
                continue;
            }
            let z = row + 1;
            let top = field.top(row, col);
            if top == 0 {
                continue;
            }
            if z % interval == 0 {
                blocks.extend((0..top).map(|y| (col, y, z)));
                pillars += 1;
            } else {
                blocks.push((col, top - 1, z));
            }
        }
    }

    tracing::debug!(blocks = blocks.len(), pillars, interval, "Planned glass supports");
    SupportPlan { blocks }
}
