use crate::CellMask;

/// A rectangular field of two-state cells.
///
/// Cells are stored column-major (`cells[x * rows + y]`), so `x` selects the
/// column and `y` the row everywhere in this crate. Patterns are converted to
/// this layout when they are built, never at the call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a `cols x rows` grid of dead cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Converts signed coordinates into a flat index, `None` when outside the grid.
    ///
    /// Takes `i64` so that an `i32` origin plus a cell offset never overflows.
    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.cols && y < self.rows).then_some(x * self.rows + y)
    }

    /// Returns the state of the cell, cells outside the grid are dead.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.get_offset(x, y, 0, 0)
    }

    /// Sets the state of the cell; writes outside the grid are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, alive: bool) {
        self.set_offset(x, y, 0, 0, alive);
    }

    /// Reads the cell `(dx, dy)` away from the origin `(x, y)`; dead outside the grid.
    #[inline]
    pub(crate) fn get_offset(&self, x: i32, y: i32, dx: usize, dy: usize) -> bool {
        self.index(i64::from(x) + dx as i64, i64::from(y) + dy as i64)
            .is_some_and(|idx| self.cells[idx])
    }

    /// Writes the cell `(dx, dy)` away from the origin `(x, y)`; dropped outside the grid.
    #[inline]
    pub(crate) fn set_offset(&mut self, x: i32, y: i32, dx: usize, dy: usize, alive: bool) {
        if let Some(idx) = self.index(i64::from(x) + dx as i64, i64::from(y) + dy as i64) {
            self.cells[idx] = alive;
        }
    }

    /// In-bounds accessor for loops that iterate over the grid.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> bool {
        self.cells[x * self.rows + y]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, alive: bool) {
        self.cells[x * self.rows + y] = alive;
    }

    /// Returns the cells of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> &[bool] {
        &self.cells[x * self.rows..(x + 1) * self.rows]
    }

    pub(crate) fn column_mut(&mut self, x: usize) -> &mut [bool] {
        &mut self.cells[x * self.rows..(x + 1) * self.rows]
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Returns the smallest `(min_x, min_y, max_x, max_y)` box holding all
    /// alive cells, or `None` for a blank grid.
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bbox: Option<(usize, usize, usize, usize)> = None;
        for x in 0..self.cols {
            for y in 0..self.rows {
                if !self.at(x, y) {
                    continue;
                }
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bbox
    }
}

impl CellMask for Grid {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows && self.at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(4, 3);
        grid.set(-1, 0, true);
        grid.set(4, 0, true);
        grid.set(0, 3, true);
        assert_eq!(grid.alive_count(), 0);
        assert!(!grid.get(-1, -1));
        assert!(!grid.get(100, 1));
    }

    #[test]
    fn test_offsets_past_i32_range() {
        let mut grid = Grid::new(4, 3);
        grid.set_offset(i32::MAX, 0, 2, 0, true);
        grid.set_offset(i32::MIN, i32::MIN, 1, 1, true);
        assert_eq!(grid.alive_count(), 0);
        assert!(!grid.get_offset(i32::MAX, i32::MAX, 3, 2));

        grid.set_offset(-2, -1, 3, 2, true);
        assert!(grid.get(1, 1));
        assert!(grid.get_offset(-1, 0, 2, 1));
    }

    #[test]
    fn test_column_major_layout() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 0, true);
        grid.set(1, 1, true);
        assert_eq!(grid.column(1), &[true, true]);
        assert_eq!(grid.column(0), &[false, false]);
    }

    #[test]
    fn test_bounding_box() {
        let mut grid = Grid::new(10, 10);
        assert_eq!(grid.bounding_box(), None);
        grid.set(2, 7, true);
        grid.set(5, 3, true);
        assert_eq!(grid.bounding_box(), Some((2, 3, 5, 7)));
    }
}
