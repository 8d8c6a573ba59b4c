use crate::{GoLEngine, Pattern};

pub const MIN_LOOP_FPS: f64 = 0.5;
pub const MAX_LOOP_FPS: f64 = 60.0;

/// Tracking state of an engine that displays an oscillator or spaceship in
/// loop mode.
///
/// Created by [`GoLEngine::attach_loop_pattern`]. Invariant: `reset_counter`
/// stays below `period` between calls to [`update_loop_pattern`].
#[derive(Clone, Debug, PartialEq)]
pub struct LoopState {
    pattern: Pattern,
    period: u32,
    reset_counter: u32,
    last_generation: u64,
}

impl LoopState {
    pub(crate) fn new(pattern: Pattern, period: u32, generation: u64) -> Self {
        Self {
            pattern,
            period: period.max(1),
            reset_counter: 0,
            last_generation: generation,
        }
    }

    /// The canonical pattern restamped on every resync.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Generations counted since the last resync.
    pub fn reset_counter(&self) -> u32 {
        self.reset_counter
    }

    /// Engine generation seen by the previous [`update_loop_pattern`] call.
    pub fn last_generation(&self) -> u64 {
        self.last_generation
    }
}

/// Converts the "frames between phase changes" knob into a simulation rate.
pub fn loop_update_fps(loop_update_rate: u32) -> f64 {
    (GoLEngine::DEFAULT_HOST_FPS / loop_update_rate as f64).clamp(MIN_LOOP_FPS, MAX_LOOP_FPS)
}

/// Keeps a loop-pattern engine locked to its canonical cycle.
///
/// Call once per frame, after the engine's own throttled update. Does nothing
/// unless the engine hosts a loop pattern. Otherwise it:
/// * retunes the engine's update rate from `loop_update_rate`, logging the
///   change when `log_changes` is set and the rate actually differs;
/// * adds the number of generations elapsed since the previous call to the
///   reset counter;
/// * once a full period has elapsed, clears the grid and restamps the
///   canonical pattern centred, which also brings spaceships back to the middle.
pub fn update_loop_pattern(engine: &mut GoLEngine, loop_update_rate: u32, log_changes: bool) {
    let Some(mut state) = engine.loop_state.take() else {
        return;
    };

    let target_fps = loop_update_fps(loop_update_rate);
    if (target_fps - engine.update_rate_fps()).abs() > f64::EPSILON {
        if log_changes {
            log::info!(
                "Loop pattern update rate {:.2} -> {:.2} fps ({} frames per phase)",
                engine.update_rate_fps(),
                target_fps,
                loop_update_rate
            );
        }
        engine.set_update_rate(target_fps);
    }

    let generation = engine.generation();
    if generation > state.last_generation {
        let elapsed = generation - state.last_generation;
        state.reset_counter = state
            .reset_counter
            .saturating_add(u32::try_from(elapsed).unwrap_or(u32::MAX));
    }
    // the engine may also have been cleared behind our back
    state.last_generation = generation;

    if state.reset_counter >= state.period {
        log::debug!(
            "Resyncing loop pattern after {} generations (period {})",
            state.reset_counter,
            state.period
        );
        engine.clear_grid();
        engine.set_pattern_centered(&state.pattern);
        state.reset_counter = 0;
        state.last_generation = engine.generation();
    }

    engine.loop_state = Some(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternKind;

    fn looped(kind: PatternKind, cols: usize, rows: usize) -> GoLEngine {
        let mut engine = GoLEngine::new(cols, rows, loop_update_fps(6));
        let pattern = kind.pattern();
        engine.set_pattern_centered(&pattern);
        engine.attach_loop_pattern(pattern, kind.period().unwrap());
        engine
    }

    #[test]
    fn test_not_a_loop_pattern() {
        let mut engine = GoLEngine::new(5, 5, 10.0);
        engine.set_pattern(&PatternKind::Blinker.pattern(), 1, 1);
        update_loop_pattern(&mut engine, 1, false);
        // untouched: rate and cells stay as they were
        assert_eq!(engine.update_rate_fps(), 10.0);
        assert_eq!(engine.count_alive_cells(), 3);
    }

    #[test]
    fn test_target_fps_is_clamped() {
        assert_eq!(loop_update_fps(6), 10.0);
        assert_eq!(loop_update_fps(1), 60.0);
        assert_eq!(loop_update_fps(0), 60.0);
        assert_eq!(loop_update_fps(1000), 0.5);
    }

    #[test]
    fn test_rate_is_retuned() {
        let mut engine = looped(PatternKind::Blinker, 5, 5);
        update_loop_pattern(&mut engine, 12, true);
        assert_eq!(engine.update_rate_fps(), 5.0);
        assert_eq!(engine.frames_between_updates(), 12);
        update_loop_pattern(&mut engine, 12, true);
        assert_eq!(engine.update_rate_fps(), 5.0);
    }

    #[test]
    fn test_blinker_resync() {
        let mut engine = looped(PatternKind::Blinker, 5, 5);
        let canonical = engine.get_pattern();

        engine.update();
        update_loop_pattern(&mut engine, 6, false);
        assert_eq!(engine.loop_state().unwrap().reset_counter(), 1);

        engine.update();
        update_loop_pattern(&mut engine, 6, false);
        let state = engine.loop_state().unwrap();
        assert_eq!(state.reset_counter(), 0);
        assert_eq!(state.last_generation(), 0);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.get_pattern(), canonical);
    }

    #[test]
    fn test_glider_is_recentred() {
        let mut engine = looped(PatternKind::Glider, 9, 9);
        let canonical = engine.get_pattern();
        for _ in 0..3 {
            engine.update();
            update_loop_pattern(&mut engine, 6, false);
        }
        engine.update();
        // a freely running glider has moved by one cell here
        assert_ne!(engine.get_pattern(), canonical);
        update_loop_pattern(&mut engine, 6, false);
        assert_eq!(engine.get_pattern(), canonical);
    }

    #[test]
    fn test_counts_exact_generation_delta() {
        let mut engine = looped(PatternKind::Glider, 9, 9);
        engine.update();
        engine.update();
        update_loop_pattern(&mut engine, 6, false);
        assert_eq!(engine.loop_state().unwrap().reset_counter(), 2);

        engine.update();
        engine.update();
        engine.update();
        update_loop_pattern(&mut engine, 6, false);
        // 5 >= 4 triggers the resync, the counter never stays above the period
        assert_eq!(engine.loop_state().unwrap().reset_counter(), 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_idle_frames_do_not_count() {
        let mut engine = looped(PatternKind::Pulsar, 17, 17);
        for _ in 0..10 {
            update_loop_pattern(&mut engine, 6, false);
        }
        assert_eq!(engine.loop_state().unwrap().reset_counter(), 0);
        engine.update();
        update_loop_pattern(&mut engine, 6, false);
        update_loop_pattern(&mut engine, 6, false);
        assert_eq!(engine.loop_state().unwrap().reset_counter(), 1);
    }
}
