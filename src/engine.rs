use crate::{stamp_pattern, CellMask, Grid, LoopState, Pattern};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A bounded, double-buffered Game of Life simulation under B3/S23.
///
/// Every visual entity owns one engine. Cells outside the grid are always
/// dead, there is no wraparound. Reads of the field between calls always see
/// a complete generation: [`GoLEngine::update`] writes into a scratch buffer
/// and swaps it in only after the whole field has been computed.
///
/// The engine never fails at runtime: out-of-range coordinates read as dead
/// and writes to them are dropped, patterns are clipped to the grid.
///
/// # Example
///
/// ```rust
/// use gol_effects::{GoLEngine, PatternKind};
///
/// let mut engine = GoLEngine::new(5, 5, 10.0);
/// engine.set_pattern(&PatternKind::Blinker.pattern(), 1, 1);
///
/// // vertical blinker in column 2 turns horizontal in row 2
/// engine.update();
/// assert!(engine.get_cell(1, 2) && engine.get_cell(2, 2) && engine.get_cell(3, 2));
/// assert_eq!(engine.count_alive_cells(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct GoLEngine {
    cols: usize,
    rows: usize,
    /// The generation visible to readers.
    current: Grid,
    /// Scratch buffer the next generation is computed into.
    next: Grid,
    generation: u64,
    update_rate_fps: f64,
    /// Frame rate the host loop is assumed to run at.
    host_fps: f64,
    frames_between_updates: u64,
    /// A frozen engine is skipped by [`GoLEngine::update_throttled`].
    frozen: bool,
    pub(crate) loop_state: Option<LoopState>,
}

impl GoLEngine {
    pub const DEFAULT_UPDATE_RATE_FPS: f64 = 10.0;
    pub const DEFAULT_HOST_FPS: f64 = 60.0;
    pub const DEFAULT_SEED_DENSITY: f64 = 0.3;

    /// Creates an engine with a `cols x rows` field of dead cells.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or if `update_rate_fps` is not a
    /// positive finite number. These values come from the entity setup code,
    /// never from user input.
    pub fn new(cols: usize, rows: usize, update_rate_fps: f64) -> Self {
        assert!(
            cols > 0 && rows > 0,
            "Grid dimensions must be positive, got {}x{}",
            cols,
            rows
        );
        assert!(
            update_rate_fps > 0.0 && update_rate_fps.is_finite(),
            "Update rate must be positive, got {}",
            update_rate_fps
        );
        let mut engine = Self {
            cols,
            rows,
            current: Grid::new(cols, rows),
            next: Grid::new(cols, rows),
            generation: 0,
            update_rate_fps,
            host_fps: Self::DEFAULT_HOST_FPS,
            frames_between_updates: 1,
            frozen: false,
            loop_state: None,
        };
        engine.recompute_throttle();
        engine
    }

    /// Overrides the frame rate the host render loop is assumed to run at.
    ///
    /// # Panics
    ///
    /// Panics if `host_fps` is not a positive finite number.
    pub fn with_host_fps(mut self, host_fps: f64) -> Self {
        assert!(
            host_fps > 0.0 && host_fps.is_finite(),
            "Host frame rate must be positive, got {}",
            host_fps
        );
        self.host_fps = host_fps;
        self.recompute_throttle();
        self
    }

    fn recompute_throttle(&mut self) {
        let frames = (self.host_fps / self.update_rate_fps).round() as u64;
        self.frames_between_updates = frames.max(1);
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update_rate_fps(&self) -> f64 {
        self.update_rate_fps
    }

    pub fn host_fps(&self) -> f64 {
        self.host_fps
    }

    pub fn frames_between_updates(&self) -> u64 {
        self.frames_between_updates
    }

    /// Changes the simulation rate; takes effect on the next throttled update.
    /// Non-positive or non-finite rates are ignored.
    pub fn set_update_rate(&mut self, update_rate_fps: f64) {
        if !(update_rate_fps > 0.0 && update_rate_fps.is_finite()) {
            log::warn!("Ignoring invalid update rate {}", update_rate_fps);
            return;
        }
        self.update_rate_fps = update_rate_fps;
        self.recompute_throttle();
    }

    /// The current generation, as consumed by renderers.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stops throttled updates; the field keeps its exact current image.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Returns the loop tracking state if the engine hosts a loop pattern.
    pub fn loop_state(&self) -> Option<&LoopState> {
        self.loop_state.as_ref()
    }

    pub fn is_loop_pattern(&self) -> bool {
        self.loop_state.is_some()
    }

    /// Marks the engine as hosting `pattern`, resynchronised every `period`
    /// generations by [`crate::update_loop_pattern`].
    pub fn attach_loop_pattern(&mut self, pattern: Pattern, period: u32) {
        self.loop_state = Some(LoopState::new(pattern, period, self.generation));
    }

    pub fn detach_loop_pattern(&mut self) {
        self.loop_state = None;
    }

    /// Sets the cell at column `x`, row `y`; writes outside the grid are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) {
        self.current.set(x, y, alive);
    }

    /// Returns the cell at column `x`, row `y`; outside the grid is dead.
    pub fn get_cell(&self, x: i32, y: i32) -> bool {
        self.current.get(x, y)
    }

    /// Kills every cell in both buffers and resets the generation counter.
    pub fn clear_grid(&mut self) {
        self.current.clear();
        self.next.clear();
        self.generation = 0;
    }

    /// Makes every cell alive independently with probability `density`,
    /// seeding from the OS, and resets the generation counter.
    pub fn random_seed(&mut self, density: f64) {
        self.random_seed_with(density, None);
    }

    /// Like [`GoLEngine::random_seed`], but reproducible when `seed` is given.
    pub fn random_seed_with(&mut self, density: f64, seed: Option<u64>) {
        self.random_seed_by(|_, _| density, seed);
    }

    /// Seeds each cell with its own probability `density_at(x, y)`.
    ///
    /// Probabilities are clamped to `[0, 1]`, NaN counts as 0.
    pub fn random_seed_by(
        &mut self,
        density_at: impl Fn(usize, usize) -> f64,
        seed: Option<u64>,
    ) {
        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_os_rng()
        };
        for x in 0..self.cols {
            for y in 0..self.rows {
                let p = density_at(x, y);
                let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
                self.current.put(x, y, rng.random_bool(p));
            }
        }
        self.next.clear();
        self.generation = 0;
    }

    /// Counts the alive cells of column `col` in rows `y - 1..=y + 1`.
    #[inline]
    fn column_sum(col: &[bool], y: usize) -> u8 {
        let lo = y.saturating_sub(1);
        let hi = (y + 1).min(col.len() - 1);
        col[lo..=hi].iter().filter(|&&c| c).count() as u8
    }

    /// Computes one column of the next generation from the three source
    /// columns around it. Missing neighbours (grid edge) are `None`.
    fn update_column(
        left: Option<&[bool]>,
        mid: &[bool],
        right: Option<&[bool]>,
        dst: &mut [bool],
    ) {
        for (y, cell) in dst.iter_mut().enumerate() {
            let mut neighbours = Self::column_sum(mid, y) - mid[y] as u8;
            if let Some(left) = left {
                neighbours += Self::column_sum(left, y);
            }
            if let Some(right) = right {
                neighbours += Self::column_sum(right, y);
            }
            *cell = neighbours == 3 || (neighbours == 2 && mid[y]);
        }
    }

    /// Advances the field by one generation.
    ///
    /// Neighbour counts are read only from the current buffer, the results go
    /// to the scratch buffer, and the two are swapped afterwards, so the
    /// outcome does not depend on scan order.
    pub fn update(&mut self) {
        for x in 0..self.cols {
            let left = x.checked_sub(1).map(|l| self.current.column(l));
            let right = (x + 1 < self.cols).then(|| self.current.column(x + 1));
            let mid = self.current.column(x);
            Self::update_column(left, mid, right, self.next.column_mut(x));
        }
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Runs [`GoLEngine::update`] when `frame_count` falls on the engine's
    /// update cadence. Returns whether a generation was computed.
    ///
    /// `frame_count` is the host loop's monotonically increasing frame index.
    /// Frozen engines never advance here.
    pub fn update_throttled(&mut self, frame_count: u64) -> bool {
        if self.frozen || frame_count % self.frames_between_updates != 0 {
            return false;
        }
        self.update();
        true
    }

    /// Writes `pattern` with its top-left corner at `(start_x, start_y)`,
    /// clipping whatever falls outside the grid.
    pub fn set_pattern(&mut self, pattern: &Pattern, start_x: i32, start_y: i32) {
        stamp_pattern(&mut self.current, pattern, start_x, start_y);
    }

    /// Stamps `pattern` centred in the grid, rounding the offset down.
    pub fn set_pattern_centered(&mut self, pattern: &Pattern) {
        let center_x = (self.cols as i32 - pattern.width() as i32).div_euclid(2);
        let center_y = (self.rows as i32 - pattern.height() as i32).div_euclid(2);
        self.set_pattern(pattern, center_x, center_y);
    }

    /// Returns a snapshot of the current generation, detached from the engine.
    pub fn get_pattern(&self) -> Grid {
        self.current.clone()
    }

    /// Samples the `w x h` area starting at `(x, y)`; cells outside the engine
    /// read as dead.
    pub fn get_region(&self, x: i32, y: i32, w: usize, h: usize) -> Grid {
        let mut region = Grid::new(w, h);
        for dx in 0..w {
            for dy in 0..h {
                region.put(dx, dy, self.current.get_offset(x, y, dx, dy));
            }
        }
        region
    }

    pub fn count_alive_cells(&self) -> usize {
        self.current.alive_count()
    }

    /// Returns the fraction of alive cells, in `[0, 1]`.
    pub fn get_density(&self) -> f64 {
        self.count_alive_cells() as f64 / (self.cols * self.rows) as f64
    }
}

impl CellMask for GoLEngine {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn is_alive(&self, x: usize, y: usize) -> bool {
        self.current.is_alive(x, y)
    }
}
