//! Height field derived from a match grid.
//!
//! The map's x axis runs along image columns and z runs north to south
//! along image rows. A block's shade depends on its height relative to the
//! block north of it, so each image column is an independent chain of
//! heights. Every chain starts with one extra "north" position in front of
//! image row 0 that holds the reference block for the first row.

use crate::models::BlockPalette;
use map_dither::{join_index, split_index, MapShape, MatchGrid, Palette, WATER_BASE};

/// How a cell's top must sit relative to the position north of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Lower than its northern neighbor (darkest shade).
    Down,
    /// Same height (normal shade).
    Level,
    /// Higher than its northern neighbor (brightest shade).
    Up,
    /// Unconstrained; water shades by its own depth.
    Free,
}

/// Water blocks stacked over the basin floor for shade depths 0, 1 and 2.
pub const WATER_DEPTHS: [u32; 3] = [10, 5, 1];

/// Water depth for a water entry's shade.
pub fn water_depth(depth: u8) -> u32 {
    WATER_DEPTHS.get(depth as usize).copied().unwrap_or(1)
}

/// One image pixel seen from the height pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub index: Option<u8>,
    pub relation: Relation,
    /// Water blocks in this cell's basin; 0 for anything but water.
    pub water_depth: u32,
    pub needs_support: bool,
}

impl Cell {
    const EMPTY: Cell = Cell {
        index: None,
        relation: Relation::Level,
        water_depth: 0,
        needs_support: false,
    };

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.index.is_some()
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        self.water_depth > 0
    }

    /// Lowest top this cell can have while its basin or support stays above y = 0.
    #[inline]
    pub fn floor(&self) -> u32 {
        if self.water_depth > 0 {
            self.water_depth
        } else if self.needs_support {
            1
        } else {
            0
        }
    }
}

/// Per-cell build data plus the top height of every position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightField {
    rows: usize,
    cols: usize,
    shape: MapShape,
    /// Height gained by one `Up` relation.
    step: u32,
    /// Row-major, one per image pixel.
    cells: Vec<Cell>,
    /// Column-major, `rows + 1` per column; position 0 is the north block.
    tops: Vec<u32>,
}

impl HeightField {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> MapShape {
        self.shape
    }

    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Positions per column, north block included.
    #[inline]
    pub fn positions(&self) -> usize {
        self.rows + 1
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    /// Top of image pixel `(row, col)`.
    #[inline]
    pub fn top(&self, row: usize, col: usize) -> u32 {
        self.tops[col * self.positions() + row + 1]
    }

    /// Top of the north reference block of a column.
    #[inline]
    pub fn north(&self, col: usize) -> u32 {
        self.tops[col * self.positions()]
    }

    /// All tops of one column, north block first.
    pub fn column(&self, col: usize) -> &[u32] {
        let n = self.positions();
        &self.tops[col * n..(col + 1) * n]
    }

    pub(crate) fn column_mut(&mut self, col: usize) -> &mut [u32] {
        let n = self.positions();
        &mut self.tops[col * n..(col + 1) * n]
    }

    /// Cell at chain position `p >= 1`.
    #[inline]
    pub(crate) fn cell_at(&self, col: usize, p: usize) -> &Cell {
        self.cell(p - 1, col)
    }

    /// Lowest legal top at chain position `p`.
    #[inline]
    pub fn floor_at(&self, col: usize, p: usize) -> u32 {
        if p == 0 {
            0
        } else {
            self.cell_at(col, p).floor()
        }
    }

    pub fn column_max(&self, col: usize) -> u32 {
        self.column(col).iter().copied().max().unwrap_or(0)
    }

    /// Highest top anywhere, 0 for an empty field.
    pub fn max_height(&self) -> u32 {
        self.tops.iter().copied().max().unwrap_or(0)
    }

    /// Shades the current heights actually produce.
    ///
    /// Equal to the source match grid after a lossless build; after forced
    /// compression it shows what the built map will look like. The shade of
    /// a block after a transparent gap is read against the gap's top, where
    /// assembly places a glass reference block.
    pub fn realized_map(&self) -> MatchGrid {
        MatchGrid::from_fn(self.rows, self.cols, |row, col| {
            let cell = self.cell(row, col);
            cell.index.map(|index| {
                if cell.is_water() || self.shape.is_flat() {
                    return index;
                }
                let (base, depth) = split_index(index);
                let here = self.top(row, col);
                let north = self.column(col)[row];
                let shade = match here.cmp(&north) {
                    std::cmp::Ordering::Greater => 2,
                    std::cmp::Ordering::Less => 0,
                    std::cmp::Ordering::Equal if depth == 3 => 3,
                    std::cmp::Ordering::Equal => 1,
                };
                join_index(base, shade)
            })
        })
    }
}

fn relation_for(index: u8, shape: MapShape) -> Relation {
    let (base, depth) = split_index(index);
    if base == WATER_BASE {
        return Relation::Free;
    }
    if shape.is_flat() {
        return Relation::Level;
    }
    match depth {
        0 => Relation::Down,
        2 => Relation::Up,
        // depth 3 only tints the map; physically it sits level
        _ => Relation::Level,
    }
}

/// Turn matched shades into per-column heights.
///
/// Each column is walked north to south applying its relations with the
/// shape's step (1 for staircases, 0 for flat plates), then lifted just
/// enough that every basin and support block stays at or above y = 0.
pub fn derive(
    grid: &MatchGrid,
    palette: &Palette,
    shape: MapShape,
    blocks: &BlockPalette,
) -> HeightField {
    let (rows, cols) = (grid.rows(), grid.cols());
    let step = if shape.is_flat() { 0 } else { 1 };

    let cells: Vec<Cell> = grid
        .cells()
        .iter()
        .map(|matched| match *matched {
            None => Cell::EMPTY,
            Some(index) => {
                let entry = palette.entry(index);
                Cell {
                    index: Some(index),
                    relation: relation_for(index, shape),
                    water_depth: if entry.is_water() {
                        water_depth(entry.depth)
                    } else {
                        0
                    },
                    needs_support: blocks.needs_support(entry.base),
                }
            }
        })
        .collect();

    let positions = rows + 1;
    let mut tops = vec![0u32; positions * cols];
    let mut chain = vec![0i64; positions];
    for col in 0..cols {
        chain[0] = 0;
        for row in 0..rows {
            let cell = &cells[row * cols + col];
            let prev = chain[row];
            chain[row + 1] = match cell.relation {
                Relation::Down => prev - step as i64,
                Relation::Up => prev + step as i64,
                Relation::Level | Relation::Free => prev,
            };
        }
        let lift = (0..positions)
            .map(|p| {
                let floor = if p == 0 {
                    0
                } else {
                    cells[(p - 1) * cols + col].floor() as i64
                };
                floor - chain[p]
            })
            .max()
            .unwrap_or(0)
            .max(0);
        for (top, h) in tops[col * positions..(col + 1) * positions]
            .iter_mut()
            .zip(&chain)
        {
            *top = (h + lift) as u32;
        }
    }

    tracing::debug!(rows, cols, %shape, "Derived height field");
    HeightField {
        rows,
        cols,
        shape,
        step,
        cells,
        tops,
    }
}
