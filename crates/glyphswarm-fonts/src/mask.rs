//! Presence masks produced by the rasterizer.

/// Boolean grid marking glyph ink per cell.
///
/// Every row has the same length. Columns are trimmed to the tightest
/// horizontal ink extent; rows are kept as rendered so that glyphs share a
/// common baseline. A glyph without ink yields the empty mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    rows: Vec<Vec<bool>>,
}

impl Mask {
    /// The mask with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mask from row-major `pixels`, marking cells equal to `ink`
    /// and trimming columns without ink on both sides. A trailing partial
    /// row is ignored.
    pub fn from_pixels(pixels: &[u32], width: usize, ink: u32) -> Self {
        if width == 0 {
            return Self::empty();
        }

        let grid: Vec<Vec<bool>> = pixels
            .chunks_exact(width)
            .map(|row| row.iter().map(|&p| p == ink).collect())
            .collect();

        let column_has_ink = |c: usize| grid.iter().any(|row| row[c]);
        let Some(first) = (0..width).find(|&c| column_has_ink(c)) else {
            return Self::empty();
        };
        let last = (0..width)
            .rev()
            .find(|&c| column_has_ink(c))
            .unwrap_or(first);

        let rows = grid
            .into_iter()
            .map(|row| row[first..=last].to_vec())
            .collect();
        Self { rows }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// `(row, col)` of every ink cell, row by row.
    pub fn ink_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &ink)| ink)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn ink_count(&self) -> usize {
        self.ink_cells().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0xffffff;

    #[test]
    fn test_trims_columns_only() {
        #[rustfmt::skip]
        let pixels = [
            0, 0,   0,   0, 0,
            0, INK, 0,   0, 0,
            0, 0,   INK, 0, 0,
            0, 0,   0,   0, 0,
        ];
        let mask = Mask::from_pixels(&pixels, 5, INK);
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.height(), 4);
        assert!(mask.get(1, 0));
        assert!(mask.get(2, 1));
        assert!(!mask.get(0, 0));
        assert_eq!(mask.ink_cells().collect::<Vec<_>>(), vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn test_no_ink_is_empty() {
        let mask = Mask::from_pixels(&[0; 16], 4, INK);
        assert!(mask.is_empty());
        assert_eq!(mask.height(), 0);
        assert_eq!(mask.ink_count(), 0);
        assert_eq!(mask, Mask::empty());
    }

    #[test]
    fn test_partial_row_is_ignored() {
        let pixels = [0, INK, 0, INK, 0, 0, INK];
        let mask = Mask::from_pixels(&pixels, 3, INK);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.ink_count(), 2);

        assert!(Mask::from_pixels(&[INK, INK], 3, INK).is_empty());
    }

    #[test]
    fn test_rows_have_equal_length() {
        let pixels = [INK, 0, 0, 0, 0, INK, 0, 0, 0];
        let mask = Mask::from_pixels(&pixels, 3, INK);
        assert!(mask.rows().iter().all(|row| row.len() == mask.width()));
        assert_eq!(mask.width(), 3);
    }

    #[test]
    fn test_out_of_range_get_is_false() {
        let mask = Mask::from_pixels(&[INK], 1, INK);
        assert!(mask.get(0, 0));
        assert!(!mask.get(0, 1));
        assert!(!mask.get(5, 0));
    }
}
