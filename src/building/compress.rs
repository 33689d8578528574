//! Height compression under a maximum-height budget.
//!
//! Natural compression renumbers a column to the lowest heights that keep
//! every relation, so the map looks identical but the staircase is shorter.
//! Forced compression clamps what natural compression could not fit and
//! accepts that some shades change.

use super::height::{HeightField, Relation};
use crate::error::BuildError;
use crate::models::CompressStrategy;

/// Smallest budget that still fits the deepest water basin.
pub const MIN_HEIGHT_BUDGET: u32 = super::height::WATER_DEPTHS[0];

/// Fit `field` under `max_height` (inclusive) using the chosen passes.
///
/// Columns already within budget are left untouched. `None` returns the
/// field as is without looking at the budget.
pub fn compress(
    field: &HeightField,
    max_height: u32,
    strategy: CompressStrategy,
) -> Result<HeightField, BuildError> {
    if strategy == CompressStrategy::None {
        return Ok(field.clone());
    }
    if max_height < MIN_HEIGHT_BUDGET {
        return Err(BuildError::InvalidHeightBudget {
            max_height,
            minimum: MIN_HEIGHT_BUDGET,
        });
    }

    let mut out = field.clone();
    let mut natural_columns = 0usize;
    let mut forced_columns = 0usize;

    for col in 0..out.cols() {
        if out.column_max(col) <= max_height {
            continue;
        }
        if strategy.natural() {
            let heights = natural_column(&out, col);
            out.column_mut(col).copy_from_slice(&heights);
            natural_columns += 1;
        }
        let height = out.column_max(col);
        if height <= max_height {
            continue;
        }
        if !strategy.forced() {
            return Err(BuildError::CompressionFailed {
                column: col,
                height,
                max_height,
            });
        }
        let heights = forced_column(&out, col, max_height);
        out.column_mut(col).copy_from_slice(&heights);
        forced_columns += 1;
    }

    tracing::debug!(
        %strategy,
        max_height,
        before = field.max_height(),
        after = out.max_height(),
        natural_columns,
        forced_columns,
        "Compressed height field"
    );
    Ok(out)
}

/// Lowest heights for one column that keep every relation and floor.
///
/// Positions joined by `Level` form groups sharing one height. A forward
/// pass gives each group the least height its floors and a preceding `Up`
/// allow; a backward pass raises groups that must stay above a following
/// `Down`. Raising a group never breaks the `Up` into it, so one pass each
/// way is enough.
pub(crate) fn natural_column(field: &HeightField, col: usize) -> Vec<u32> {
    let n = field.positions();
    let step = field.step();

    // (first position, relation into the group, lower bound)
    let mut groups: Vec<(usize, Relation, u32)> = Vec::new();
    for p in 0..n {
        let floor = field.floor_at(col, p);
        let relation = if p == 0 {
            Relation::Free
        } else {
            field.cell_at(col, p).relation
        };
        if p > 0 && relation == Relation::Level {
            if let Some(group) = groups.last_mut() {
                group.2 = group.2.max(floor);
                continue;
            }
        }
        let bound = match (relation, groups.last()) {
            (Relation::Up, Some(prev)) => prev.2 + step,
            _ => 0,
        };
        groups.push((p, relation, bound.max(floor)));
    }

    let mut heights: Vec<u32> = groups.iter().map(|g| g.2).collect();
    for g in (0..groups.len().saturating_sub(1)).rev() {
        if groups[g + 1].1 == Relation::Down {
            heights[g] = heights[g].max(heights[g + 1] + step);
        }
    }

    let mut out = vec![0; n];
    for (g, &(start, _, _)) in groups.iter().enumerate() {
        let end = groups.get(g + 1).map_or(n, |next| next.0);
        out[start..end].fill(heights[g]);
    }
    out
}

/// Greedy clamp walk: follow each relation from the previous height but
/// never leave `[floor, max_height]`.
pub(crate) fn forced_column(field: &HeightField, col: usize, max_height: u32) -> Vec<u32> {
    let step = field.step() as i64;
    let input = field.column(col);
    let mut out = Vec::with_capacity(input.len());

    let mut current = input[0].min(max_height) as i64;
    out.push(current as u32);
    for (p, &derived) in input.iter().enumerate().skip(1) {
        let wanted = match field.cell_at(col, p).relation {
            Relation::Up => current + step,
            Relation::Down => current - step,
            Relation::Level => current,
            Relation::Free => derived as i64,
        };
        let floor = field.floor_at(col, p) as i64;
        current = wanted.clamp(floor, max_height as i64);
        out.push(current as u32);
    }
    out
}
