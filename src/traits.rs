/// Read-only view of a rectangular two-state cell field.
///
/// This is what a renderer consumes: every alive cell becomes a filled
/// `cell_size x cell_size` square at `(x * cell_size, y * cell_size)` relative
/// to the entity's screen offset. Implementors never expose mutation through it.
pub trait CellMask {
    /// Returns the width of the field in cells.
    fn cols(&self) -> usize;

    /// Returns the height of the field in cells.
    fn rows(&self) -> usize;

    /// Returns whether the cell at column `x`, row `y` is alive.
    ///
    /// # Parameters
    /// * `x` - Column index, `0..cols()`
    /// * `y` - Row index, `0..rows()`
    ///
    /// # Returns
    /// `false` for coordinates outside the field, matching the fixed dead
    /// boundary used by the engine.
    fn is_alive(&self, x: usize, y: usize) -> bool;

    /// Iterates over the coordinates of all alive cells, column by column.
    fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_
    where
        Self: Sized,
    {
        (0..self.cols())
            .flat_map(move |x| (0..self.rows()).map(move |y| (x, y)))
            .filter(move |&(x, y)| self.is_alive(x, y))
    }

    /// Returns the pixel size `[width, height]` of the field drawn with `cell_size`.
    fn pixel_size(&self, cell_size: u32) -> [u32; 2] {
        [
            self.cols() as u32 * cell_size,
            self.rows() as u32 * cell_size,
        ]
    }
}
