use crate::{CellMask, Grid, VERSION};
use anyhow::{anyhow, Context, Result};

/// Largest pattern, in cells, [`Pattern::from_rle`] accepts.
pub const MAX_RLE_CELLS: usize = 1 << 26;

/// An immutable rectangular arrangement of cells that can be stamped into a grid.
///
/// # Overview
///
/// Patterns are authored row-major (`rows[y][x]`, the way they appear on
/// LifeWiki), but stored column-major like [`Grid`], so [`Pattern::get`] and
/// every consumer index them as `(x, y)`. The transpose happens exactly once,
/// in [`Pattern::from_rows`] and [`Pattern::from_rle`].
///
/// All transforms ([`Pattern::rotate_90`], [`Pattern::flip_horizontal`],
/// [`Pattern::flip_vertical`]) return new patterns and are total.
///
/// # Limitations
///
/// *   **Two-State Only:** only dead/alive cells are supported.
/// *   **B3/S23 Rule:** RLE headers naming any other rule are rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    /// Column-major cells, `cells[x * height + y]`.
    cells: Vec<bool>,
}

impl Pattern {
    /// Builds a pattern from row-major rows of `0`/`1`.
    ///
    /// Rows shorter than the longest one are padded with dead cells.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gol_effects::Pattern;
    ///
    /// let glider = Pattern::from_rows(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]);
    /// assert_eq!((glider.width(), glider.height()), (3, 3));
    /// assert!(glider.get(2, 1));
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut pattern = Self::blank(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                pattern.cells[x * height + y] = cell != 0;
            }
        }
        pattern
    }

    /// Creates a `width x height` pattern of dead cells.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Copies the `w x h` area of `grid` starting at `(x, y)` into a new pattern.
    /// Cells outside the grid read as dead.
    pub fn from_grid_region(grid: &Grid, x: i32, y: i32, w: usize, h: usize) -> Self {
        let mut pattern = Self::blank(w, h);
        for dx in 0..w {
            for dy in 0..h {
                pattern.cells[dx * h + dy] = grid.get_offset(x, y, dx, dy);
            }
        }
        pattern
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at column `x`, row `y`; outside the pattern is dead.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[x * self.height + y]
    }

    /// Counts the alive cells of the pattern.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Exports the pattern back to row-major rows of `0`/`1`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.get(x, y) as u8).collect())
            .collect()
    }

    /// Returns the pattern rotated 90 degrees clockwise.
    ///
    /// A `width x height` pattern becomes `height x width`; four rotations
    /// give back the original exactly.
    pub fn rotate_90(&self) -> Self {
        let (w, h) = (self.height, self.width);
        let mut rotated = Self::blank(w, h);
        for x in 0..w {
            for y in 0..h {
                // new (x, y) comes from old column y, row (old_height - 1 - x)
                rotated.cells[x * h + y] = self.get(y, self.height - 1 - x);
            }
        }
        rotated
    }

    /// Returns the pattern mirrored left to right (every row reversed).
    pub fn flip_horizontal(&self) -> Self {
        let mut flipped = Self::blank(self.width, self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                flipped.cells[x * self.height + y] = self.get(self.width - 1 - x, y);
            }
        }
        flipped
    }

    /// Returns the pattern mirrored top to bottom (row order reversed).
    pub fn flip_vertical(&self) -> Self {
        let mut flipped = Self::blank(self.width, self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                flipped.cells[x * self.height + y] = self.get(x, self.height - 1 - y);
            }
        }
        flipped
    }

    /// Parses a pattern in [Extended RLE](https://golly.sourceforge.io/Help/formats.html#rle)
    /// format.
    ///
    /// # Arguments
    ///
    /// * `data` - The RLE text, `#` comment lines are skipped.
    ///
    /// # Returns
    ///
    /// A `Result` containing either the parsed `Pattern` or an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or malformed, names a rule
    /// other than B3/S23, or if the cell data runs past the declared size.
    pub fn from_rle(data: &str) -> Result<Self> {
        let mut lines = data
            .lines()
            .map(str::trim_end)
            .filter(|x| !x.is_empty() && !x.starts_with('#'));
        let width: usize;
        let height: usize;

        // Parse header
        if let Some(line) = lines.next() {
            let mut parts = line.split(',').map(str::trim);

            let extract_value = |part: &str, expected_key: &str| -> Result<String> {
                let mut items = part.split('=');
                let key = items.next().unwrap_or("").trim_end();
                if key != expected_key {
                    return Err(anyhow!(
                        "Invalid header: expected {}, got {}",
                        expected_key,
                        key
                    ));
                }
                let value = items.next().unwrap_or("").trim_start();
                if items.next().is_some() {
                    return Err(anyhow!("Invalid header: missing ',' between '='"));
                }
                Ok(value.to_string())
            };

            let value = extract_value(
                parts
                    .next()
                    .ok_or_else(|| anyhow!("Invalid header: missing \"x\""))?,
                "x",
            )?;
            width = value.parse()?;

            let value = extract_value(
                parts
                    .next()
                    .ok_or_else(|| anyhow!("Invalid header: missing \"y\""))?,
                "y",
            )?;
            height = value.parse()?;

            // rule is optional
            if let Some(rule) = parts.next().map(|part| extract_value(part, "rule")) {
                let rule = rule?;
                if !rule.eq_ignore_ascii_case("B3/S23") && rule != "23/3" {
                    return Err(anyhow!("Only B3/S23 rule is supported, got {}", rule));
                }
            }
        } else {
            return Err(anyhow!("Missing header"));
        }

        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_RLE_CELLS)
            .ok_or_else(|| anyhow!("Pattern too large: {}x{}", width, height))?;
        let mut pattern = Self {
            width,
            height,
            cells: vec![false; cells],
        };
        let mut x: usize = 0;
        let mut y: usize = 0;
        let mut count: usize = 0;
        let overflow = || anyhow!("Run count overflow");

        'outer: for line in lines {
            for b in line.bytes() {
                match b {
                    b'0'..=b'9' => {
                        count = count
                            .checked_mul(10)
                            .and_then(|c| c.checked_add((b - b'0') as usize))
                            .ok_or_else(overflow)?;
                    }
                    b'b' | b'.' => {
                        x = x.checked_add(count.max(1)).ok_or_else(overflow)?;
                        count = 0;
                    }
                    b'o' | b'A' => {
                        let end = x.checked_add(count.max(1)).ok_or_else(overflow)?;
                        if end > width || y >= height {
                            return Err(anyhow!(
                                "Pattern data out of bounds: x = {}, y = {}",
                                end - 1,
                                y
                            ));
                        }
                        for i in x..end {
                            pattern.cells[i * height + y] = true;
                        }
                        x = end;
                        count = 0;
                    }
                    b'$' => {
                        y = y.checked_add(count.max(1)).ok_or_else(overflow)?;
                        x = 0;
                        count = 0;
                    }
                    b'!' => break 'outer,
                    b' ' | b'\t' => continue,
                    _ => return Err(anyhow!("Invalid RLE character: '{}'", b as char)),
                }
                if x > width {
                    return Err(anyhow!("Pattern data out of bounds: x = {}, y = {}", x, y));
                }
            }
        }

        Ok(pattern)
    }

    /// Reads and parses an RLE file, see [`Pattern::from_rle`].
    pub fn from_rle_file(path: &str) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file {}", path))?;
        Self::from_rle(&data)
    }

    /// Writes [`Pattern::to_rle`] to `path`, under a `#C` line naming the
    /// crate version.
    pub fn to_rle_file(&self, path: &str) -> Result<()> {
        let data = format!("#C Written by gol_effects {}\n{}\n", VERSION, self.to_rle());
        std::fs::write(path, data)
            .with_context(|| format!("Failed to write pattern file {}", path))
    }

    /// Encodes the pattern as Extended RLE, trimmed to its live bounding box.
    ///
    /// Lines are wrapped at 70 characters. A blank pattern encodes as
    /// `x = 0, y = 0, rule = B3/S23` followed by `!`.
    pub fn to_rle(&self) -> String {
        let Some((min_x, min_y, max_x, max_y)) = self.bounding_box() else {
            return "x = 0, y = 0, rule = B3/S23\n!".to_string();
        };

        let mut result = format!(
            "x = {}, y = {}, rule = B3/S23\n",
            max_x - min_x + 1,
            max_y - min_y + 1
        );
        let mut line_length = 0;
        let mut push_token = |result: &mut String, token: &str, reserve: usize| {
            if line_length + token.len() + reserve > 70 {
                result.push('\n');
                line_length = 0;
            }
            result.push_str(token);
            line_length += token.len();
        };
        let run = |run_length: u32, state: bool| {
            let tag = if state { 'o' } else { 'b' };
            if run_length > 1 {
                format!("{}{}", run_length, tag)
            } else {
                tag.to_string()
            }
        };

        for y in min_y..=max_y {
            let mut run_length = 0u32;
            let mut last_state = false;

            for x in min_x..=max_x {
                let current_state = self.get(x, y);
                if x == min_x || current_state != last_state {
                    if run_length > 0 {
                        push_token(&mut result, &run(run_length, last_state), 0);
                    }
                    run_length = 1;
                    last_state = current_state;
                } else {
                    run_length += 1;
                }
            }

            // trailing dead cells carry no information
            if run_length > 0 && last_state {
                // +1 for the $ or ! that follows
                push_token(&mut result, &run(run_length, last_state), 1);
            }

            push_token(&mut result, if y < max_y { "$" } else { "!" }, 0);
        }

        result
    }

    /// Returns the `(min_x, min_y, max_x, max_y)` box of alive cells.
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bbox: Option<(usize, usize, usize, usize)> = None;
        for (x, y) in self.alive_cells() {
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bbox
    }
}

impl CellMask for Pattern {
    fn cols(&self) -> usize {
        self.width
    }

    fn rows(&self) -> usize {
        self.height
    }

    fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y)
    }
}

/// Overwrites the footprint of `pattern` in `grid`, with its top-left corner at
/// `(start_x, start_y)`.
///
/// Both dead and alive pattern cells are written. Cells that fall outside the
/// grid are clipped silently, and cells outside the footprint are untouched.
pub fn stamp_pattern(grid: &mut Grid, pattern: &Pattern, start_x: i32, start_y: i32) {
    for x in 0..pattern.width {
        for y in 0..pattern.height {
            grid.set_offset(start_x, start_y, x, y, pattern.get(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider() -> Pattern {
        Pattern::from_rows(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]])
    }

    #[test]
    fn test_from_rows_transposes() {
        let beehive = Pattern::from_rows(&[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]]);
        assert_eq!(beehive.width(), 4);
        assert_eq!(beehive.height(), 3);
        assert!(beehive.get(0, 1));
        assert!(!beehive.get(1, 1));
        assert_eq!(
            beehive.to_rows(),
            vec![vec![0, 1, 1, 0], vec![1, 0, 0, 1], vec![0, 1, 1, 0]]
        );
    }

    #[test]
    fn test_rotate_90_clockwise() {
        // 2 wide, 3 tall, single cell top-left
        let pattern = Pattern::from_rows(&[&[1, 0], &[0, 0], &[0, 0]]);
        let rotated = pattern.rotate_90();
        assert_eq!((rotated.width(), rotated.height()), (3, 2));
        // top-left goes to top-right under a clockwise turn
        assert_eq!(rotated.to_rows(), vec![vec![0, 0, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let original = glider();
        let rotated = original.rotate_90().rotate_90().rotate_90().rotate_90();
        assert_eq!(rotated, original);

        let acorn = Pattern::from_rows(&[&[0, 1, 0, 0, 0, 0, 0], &[0, 0, 0, 1, 0, 0, 0]]);
        assert_eq!(acorn.rotate_90().rotate_90().rotate_90().rotate_90(), acorn);
    }

    #[test]
    fn test_flips_are_involutions() {
        let original = glider();
        assert_ne!(original.flip_horizontal(), original);
        assert_eq!(original.flip_horizontal().flip_horizontal(), original);
        assert_ne!(original.flip_vertical(), original);
        assert_eq!(original.flip_vertical().flip_vertical(), original);
        assert_eq!(
            original.flip_horizontal().to_rows(),
            vec![vec![0, 1, 0], vec![1, 0, 0], vec![1, 1, 1]]
        );
        assert_eq!(
            original.flip_vertical().to_rows(),
            vec![vec![1, 1, 1], vec![0, 0, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_stamp_pattern_clipping() {
        let mut grid = Grid::new(10, 10);
        let block = Pattern::from_rows(&[&[1, 1], &[1, 1]]);
        stamp_pattern(&mut grid, &block, 9, 9);
        assert_eq!(grid.alive_count(), 1);
        assert!(grid.get(9, 9));

        stamp_pattern(&mut grid, &block, -1, -1);
        assert_eq!(grid.alive_count(), 2);
        assert!(grid.get(0, 0));
    }

    #[test]
    fn test_stamp_pattern_overwrites_footprint_only() {
        let mut grid = Grid::new(5, 5);
        grid.set(0, 0, true);
        grid.set(4, 4, true);
        grid.set(2, 2, true);
        let hollow = Pattern::from_rows(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]);
        stamp_pattern(&mut grid, &hollow, 1, 1);
        assert!(grid.get(0, 0));
        assert!(grid.get(4, 4));
        // dead pattern cells are written too
        assert!(!grid.get(2, 2));
        assert_eq!(grid.alive_count(), 10);
    }

    #[test]
    fn test_rle_parsing() {
        let rle = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!";
        let pattern = Pattern::from_rle(rle).unwrap();
        assert_eq!(pattern, glider());
    }

    #[test]
    fn test_rle_errors() {
        assert!(Pattern::from_rle("").is_err());
        assert!(Pattern::from_rle("x = 3, y = 3, rule = B36/S23\n3o!").is_err());
        assert!(Pattern::from_rle("x = 2, y = 1\n3o!").is_err());
        assert!(Pattern::from_rle("x = 2, y = 1\n2z!").is_err());
    }

    #[test]
    fn test_rle_oversized_input_is_an_error() {
        assert!(Pattern::from_rle("x = 3, y = 3\n99999999999999999999999o!").is_err());
        assert!(Pattern::from_rle("x = 3, y = 3\n99999999999999999999999b!").is_err());
        assert!(Pattern::from_rle("x = 3, y = 3\n99999999999999999999999$!").is_err());
        assert!(Pattern::from_rle("x = 3, y = 3\n3o18446744073709551615o!").is_err());
        assert!(Pattern::from_rle("x = 18446744073709551615, y = 2\no!").is_err());
        assert!(Pattern::from_rle("x = 100000, y = 100000\no!").is_err());
        // within the limit still parses
        let line = Pattern::from_rle("x = 4096, y = 1\n4095bo!").unwrap();
        assert!(line.get(4095, 0));
    }

    #[test]
    fn test_rle_encoding() {
        assert_eq!(glider().to_rle(), "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!");
        assert_eq!(Pattern::blank(3, 3).to_rle(), "x = 0, y = 0, rule = B3/S23\n!");
        let reparsed = Pattern::from_rle(&glider().to_rle()).unwrap();
        assert_eq!(reparsed, glider());
    }

    #[test]
    fn test_rle_file() {
        let name = format!("gol_effects_glider_{}.rle", std::process::id());
        let path = std::env::temp_dir().join(name);
        let path = path.to_str().unwrap();
        glider().to_rle_file(path).unwrap();
        let data = std::fs::read_to_string(path).unwrap();
        assert!(data.starts_with(&format!("#C Written by gol_effects {}\n", VERSION)));
        assert_eq!(Pattern::from_rle_file(path).unwrap(), glider());
        std::fs::remove_file(path).unwrap();
        assert!(Pattern::from_rle_file(path).is_err());
    }

    #[test]
    fn test_rle_lines_fit_in_70_columns() {
        let rows = vec![&[1u8][..]; 100];
        let column = Pattern::from_rows(&rows);
        let checkerboard = Pattern::from_rows(&[&[1, 0].repeat(60)[..], &[0, 1].repeat(60)[..]]);
        for pattern in [column, checkerboard] {
            let rle = pattern.to_rle();
            assert!(rle.lines().all(|line| line.len() <= 70), "{}", rle);
            assert_eq!(Pattern::from_rle(&rle).unwrap(), pattern);
        }
    }

    #[test]
    fn test_from_grid_region() {
        let mut grid = Grid::new(4, 4);
        grid.set(3, 3, true);
        let region = Pattern::from_grid_region(&grid, 2, 2, 3, 3);
        assert_eq!(region.to_rows(), vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
    }
}
