//! Input pixel grid and matched output grid.

use thiserror::Error;

use crate::palette::Palette;

/// Buffer length does not agree with the declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("buffer holds {actual} cells, {rows}x{cols} needs {expected}")]
pub struct GridSizeError {
    pub rows: usize,
    pub cols: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Split a `0xAARRGGBB` sample.
#[inline]
pub fn argb_channels(argb: u32) -> (u8, [u8; 3]) {
    let [a, r, g, b] = argb.to_be_bytes();
    (a, [r, g, b])
}

/// Pack alpha and RGB into `0xAARRGGBB`.
#[inline]
pub fn pack_argb(alpha: u8, rgb: [u8; 3]) -> u32 {
    u32::from_be_bytes([alpha, rgb[0], rgb[1], rgb[2]])
}

/// Image to convert: ARGB32 samples stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

fn check_len(rows: usize, cols: usize, len: usize) -> Result<(), GridSizeError> {
    let expected = rows * cols;
    if expected == len {
        Ok(())
    } else {
        Err(GridSizeError {
            rows,
            cols,
            expected,
            actual: len,
        })
    }
}

impl PixelGrid {
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<u32>) -> Result<Self, GridSizeError> {
        check_len(rows, cols, data.len())?;
        Ok(Self { rows, cols, data })
    }

    /// Accepts samples stored column after column.
    pub fn from_col_major(rows: usize, cols: usize, data: Vec<u32>) -> Result<Self, GridSizeError> {
        check_len(rows, cols, data.len())?;
        let mut row_major = vec![0; data.len()];
        for c in 0..cols {
            for r in 0..rows {
                row_major[r * cols + c] = data[c * rows + r];
            }
        }
        Ok(Self {
            rows,
            cols,
            data: row_major,
        })
    }

    /// Same color everywhere.
    pub fn filled(rows: usize, cols: usize, argb: u32) -> Self {
        Self {
            rows,
            cols,
            data: vec![argb; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

/// Palette index per pixel, `None` where the image is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<u8>>,
}

impl MatchGrid {
    /// Row-major cells; the length must be `rows * cols`.
    pub fn new(rows: usize, cols: usize, cells: Vec<Option<u8>>) -> Result<Self, GridSizeError> {
        check_len(rows, cols, cells.len())?;
        Ok(Self { rows, cols, cells })
    }

    /// Fill every cell from `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Option<u8>) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// Caller guarantees `cells.len() == rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Option<u8>>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells[row * self.cols + col]
    }

    pub fn cells(&self) -> &[Option<u8>] {
        &self.cells
    }

    /// Map bytes (`base * 4 + depth`, 0 where transparent) in the game's
    /// column-major order.
    pub fn map_colors(&self, palette: &Palette) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cells.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                out.push(self.get(r, c).map_or(0, |i| palette.entry(i).map_color()));
            }
        }
        out
    }

    /// RGBA8 preview, row-major.
    pub fn preview_rgba(&self, palette: &Palette) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cells.len() * 4);
        for cell in &self.cells {
            match cell {
                Some(i) => {
                    out.extend_from_slice(&palette.entry(*i).rgb8);
                    out.push(255);
                }
                None => out.extend_from_slice(&[0, 0, 0, 0]),
            }
        }
        out
    }

    /// Number of cells using each palette index.
    pub fn histogram(&self) -> [u64; 256] {
        let mut counts = [0u64; 256];
        for i in self.cells.iter().flatten() {
            counts[*i as usize] += 1;
        }
        counts
    }
}
