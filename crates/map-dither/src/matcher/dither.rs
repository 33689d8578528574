//! Floyd-Steinberg error diffusion with serpentine scanning.
//!
//! Error is accumulated in the coordinates of the active color space, so
//! what gets pushed to the neighbors is exactly what the metric measured.

use super::Matcher;
use crate::grid::{argb_channels, MatchGrid, PixelGrid};
use crate::progress::Progress;

/// `(dx, dy, weight)` with weights in sixteenths, for a left-to-right row.
/// Right-to-left rows mirror `dx`.
pub const FLOYD_STEINBERG: [(isize, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Two error rows: the one being scanned and the one below it.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: [Vec<[f32; 3]>; 2],
    width: usize,
}

impl ErrorBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            rows: [vec![[0.0; 3]; width], vec![[0.0; 3]; width]],
            width,
        }
    }

    #[inline]
    pub fn get(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Out-of-bounds targets are dropped.
    #[inline]
    pub fn add(&mut self, x: isize, row_offset: usize, error: [f32; 3], weight: f32) {
        if x < 0 || x as usize >= self.width || row_offset > 1 {
            return;
        }
        let cell = &mut self.rows[row_offset][x as usize];
        for c in 0..3 {
            cell[c] += error[c] * weight;
        }
    }

    pub fn advance_row(&mut self) {
        self.rows.swap(0, 1);
        self.rows[1].fill([0.0; 3]);
    }
}

pub(super) fn diffuse(matcher: &Matcher<'_>, pixels: &PixelGrid, progress: &dyn Progress) -> MatchGrid {
    let (rows, cols) = (pixels.rows(), pixels.cols());
    let space = matcher.space();
    let mut cells = vec![None; rows * cols];
    let mut errors = ErrorBuffer::new(cols);

    progress.set_range(0, rows as u64, 0);
    for y in 0..rows {
        let reverse = y % 2 == 1;
        for step in 0..cols {
            let x = if reverse { cols - 1 - step } else { step };
            let (alpha, rgb) = argb_channels(pixels.get(y, x));
            if alpha == 0 {
                continue;
            }

            let carried = errors.get(x);
            let base = space.project(rgb);
            let wanted = [
                base[0] + carried[0],
                base[1] + carried[1],
                base[2] + carried[2],
            ];
            let (index, coords) = matcher.nearest(wanted);
            cells[y * cols + x] = Some(index);

            let residual = [
                wanted[0] - coords[0],
                wanted[1] - coords[1],
                wanted[2] - coords[2],
            ];
            if residual == [0.0; 3] {
                continue;
            }
            for (dx, dy, weight) in FLOYD_STEINBERG {
                let dx = if reverse { -dx } else { dx };
                errors.add(x as isize + dx, dy, residual, weight);
            }
        }
        errors.advance_row();
        progress.add(1);
    }

    MatchGrid::from_cells(rows, cols, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allowed::AllowedColors;
    use crate::color::ColorSpace;
    use crate::grid::pack_argb;
    use crate::palette::{join_index, Palette, BASE_COLORS};
    use crate::progress::NoProgress;

    fn gray(v: u8) -> u32 {
        pack_argb(255, [v, v, v])
    }

    /// White (255) and near-black (25), both at the full-brightness shade.
    fn two_grays() -> (u8, u8) {
        let base = |name: &str| BASE_COLORS.iter().position(|c| c.name == name).unwrap() as u8;
        (join_index(base("snow"), 2), join_index(base("color_black"), 2))
    }

    #[test]
    fn kernel_propagates_all_error() {
        let total: f32 = FLOYD_STEINBERG.iter().map(|k| k.2).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn error_buffer_rotates_rows() {
        let mut buf = ErrorBuffer::new(3);
        buf.add(1, 0, [1.0, 2.0, 3.0], 0.5);
        buf.add(2, 1, [4.0, 4.0, 4.0], 0.25);
        assert_eq!(buf.get(1), [0.5, 1.0, 1.5]);

        buf.advance_row();
        assert_eq!(buf.get(1), [0.0; 3]);
        assert_eq!(buf.get(2), [1.0; 3]);

        buf.advance_row();
        assert_eq!(buf.get(2), [0.0; 3]);
    }

    #[test]
    fn odd_rows_scan_right_to_left() {
        let palette = Palette::new();
        let (white, black) = two_grays();
        let allowed = AllowedColors::from_indices(&[white, black]);
        let matcher = Matcher::new(&palette, &allowed, ColorSpace::Rgb).unwrap();

        // row 0 matches exactly and carries no error down
        let pixels = PixelGrid::from_row_major(
            2,
            3,
            vec![gray(255), gray(255), gray(255), gray(255), gray(160), gray(200)],
        )
        .unwrap();
        let grid = diffuse(&matcher, &pixels, &NoProgress);

        // Row 1 starts at x = 2: 200 -> white leaves -55, 7/16 of it lands
        // on x = 1 and pulls 160 down to ~136, which is nearer black.
        // Scanned left to right, x = 1 would see no error and match white.
        assert_eq!(
            grid.cells(),
            &[
                Some(white),
                Some(white),
                Some(white),
                Some(white),
                Some(black),
                Some(white)
            ]
        );
    }

    #[test]
    fn even_rows_scan_left_to_right() {
        let palette = Palette::new();
        let (white, black) = two_grays();
        let allowed = AllowedColors::from_indices(&[white, black]);
        let matcher = Matcher::new(&palette, &allowed, ColorSpace::Rgb).unwrap();

        // mirror image of the row above: 200 first, then 160 gets pulled down
        let pixels = PixelGrid::from_row_major(1, 3, vec![gray(200), gray(160), gray(255)]).unwrap();
        let grid = diffuse(&matcher, &pixels, &NoProgress);
        assert_eq!(grid.cells(), &[Some(white), Some(black), Some(white)]);
    }

    #[test]
    fn error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(2);
        buf.add(-1, 0, [1.0; 3], 1.0);
        buf.add(2, 1, [1.0; 3], 1.0);
        buf.add(0, 2, [1.0; 3], 1.0);
        assert_eq!(buf.get(0), [0.0; 3]);
        assert_eq!(buf.get(1), [0.0; 3]);
    }
}
