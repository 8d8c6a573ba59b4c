use crate::{
    AppearanceConfig, AppearanceMode, AppearanceOverride, GoLEngine, Pattern, PatternKind,
};

/// How a resolved catalog pattern is shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Presentation {
    /// Frozen on the given phase.
    Static { phase: u32 },
    /// Cycling, resynchronised every `period` generations.
    Loop { period: u32, update_rate_fps: f64 },
}

/// Everything needed to allocate and fill an engine for a pattern override.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAppearance {
    pub kind: PatternKind,
    /// The exact cells to display: the requested phase for static overrides,
    /// the canonical phase for loop overrides.
    pub pattern: Pattern,
    /// Pixels per cell.
    pub cell_size: u32,
    pub cols: usize,
    pub rows: usize,
    pub presentation: Presentation,
}

impl ResolvedAppearance {
    /// Allocates an engine of the resolved size. The engine is blank; pass it
    /// to [`apply_appearance_override`] to fill it.
    pub fn allocate_engine(&self) -> GoLEngine {
        let update_rate_fps = match self.presentation {
            Presentation::Loop {
                update_rate_fps, ..
            } => update_rate_fps,
            Presentation::Static { .. } => GoLEngine::DEFAULT_UPDATE_RATE_FPS,
        };
        log::debug!(
            "Allocating {}x{} engine for {}",
            self.cols,
            self.rows,
            self.kind
        );
        GoLEngine::new(self.cols, self.rows, update_rate_fps)
    }

    /// Returns the on-screen size `[width, height]` in pixels.
    pub fn pixel_size(&self) -> [u32; 2] {
        [
            self.cols as u32 * self.cell_size,
            self.rows as u32 * self.cell_size,
        ]
    }
}

/// Result of [`apply_appearance_override`].
#[derive(Clone, Debug, PartialEq)]
pub enum OverrideOutcome {
    /// No pattern override: the caller runs its default density-seeded setup.
    NoOverride,
    /// No engine was supplied; allocate one with these parameters.
    ResolvedForAllocation(ResolvedAppearance),
    /// The supplied engine now shows the resolved pattern.
    AppliedToEngine(ResolvedAppearance),
}

impl OverrideOutcome {
    pub fn is_override(&self) -> bool {
        !matches!(self, OverrideOutcome::NoOverride)
    }

    pub fn resolved(&self) -> Option<&ResolvedAppearance> {
        match self {
            OverrideOutcome::NoOverride => None,
            OverrideOutcome::ResolvedForAllocation(resolved)
            | OverrideOutcome::AppliedToEngine(resolved) => Some(resolved),
        }
    }
}

/// Resolves an override into concrete cells and sizes.
///
/// Returns `None` for [`AppearanceMode::ModifiedGoL`]. Unknown pattern names
/// fall back to BLINKER; a loop override naming a methuselah, which has no
/// period, falls back to BLINKER as well.
pub fn resolve_appearance(
    appearance: &AppearanceOverride,
    config: &AppearanceConfig,
) -> Option<ResolvedAppearance> {
    let kind = || PatternKind::resolve_or_default(appearance.pattern.as_deref());
    match appearance.mode {
        AppearanceMode::ModifiedGoL => None,
        AppearanceMode::StaticPattern => {
            let kind = kind();
            let phase = appearance.period.unwrap_or(0);
            let pattern = kind.phase(phase);
            Some(ResolvedAppearance {
                kind,
                cols: pattern.width(),
                rows: pattern.height(),
                pattern,
                cell_size: config.cell_size(),
                presentation: Presentation::Static { phase },
            })
        }
        AppearanceMode::LoopPattern => {
            let kind = kind();
            let kind = if kind.period().is_some() {
                kind
            } else {
                log::warn!("{} never repeats, looping BLINKER instead", kind);
                PatternKind::Blinker
            };
            let pattern = kind.pattern();
            let margin = kind.loop_margin();
            Some(ResolvedAppearance {
                kind,
                cols: pattern.width() + 2 * margin,
                rows: pattern.height() + 2 * margin,
                pattern,
                cell_size: config.cell_size(),
                presentation: Presentation::Loop {
                    period: kind.period().unwrap_or(1),
                    update_rate_fps: config.loop_update_fps(),
                },
            })
        }
    }
}

/// Puts `engine` into the visual mode configured for `entity_type`.
///
/// * Without an override (or with [`AppearanceMode::ModifiedGoL`]) a supplied
///   engine is unfrozen and released from loop tracking, and
///   [`OverrideOutcome::NoOverride`] tells the caller to run its own setup.
/// * Without an engine, the resolved sizes are returned so the caller can
///   allocate one, see [`ResolvedAppearance::allocate_engine`].
/// * A static override clears the engine, copies the phase in (clipped to the
///   overlap if sizes differ) and freezes it.
/// * A loop override clears the engine, stamps the canonical pattern centred,
///   attaches loop tracking, sets the loop update rate and unfreezes it.
pub fn apply_appearance_override(
    engine: Option<&mut GoLEngine>,
    entity_type: &str,
    config: &AppearanceConfig,
) -> OverrideOutcome {
    let resolved = config
        .override_for(entity_type)
        .and_then(|appearance| resolve_appearance(appearance, config));

    let Some(resolved) = resolved else {
        if let Some(engine) = engine {
            engine.detach_loop_pattern();
            engine.unfreeze();
        }
        return OverrideOutcome::NoOverride;
    };
    let Some(engine) = engine else {
        return OverrideOutcome::ResolvedForAllocation(resolved);
    };

    if engine.cols() != resolved.cols || engine.rows() != resolved.rows {
        log::warn!(
            "{} engine is {}x{} but {} needs {}x{}, clipping",
            entity_type,
            engine.cols(),
            engine.rows(),
            resolved.kind,
            resolved.cols,
            resolved.rows
        );
    }

    engine.clear_grid();
    match resolved.presentation {
        Presentation::Static { .. } => {
            engine.detach_loop_pattern();
            engine.set_pattern(&resolved.pattern, 0, 0);
            engine.freeze();
        }
        Presentation::Loop {
            period,
            update_rate_fps,
        } => {
            engine.set_pattern_centered(&resolved.pattern);
            engine.attach_loop_pattern(resolved.pattern.clone(), period);
            engine.set_update_rate(update_rate_fps);
            engine.unfreeze();
        }
    }
    OverrideOutcome::AppliedToEngine(resolved)
}

/// Builds the engine for a freshly spawned entity.
///
/// Pattern overrides get an engine sized for their pattern; otherwise
/// `default_setup` provides the entity's own density-seeded engine.
pub fn setup_entity_engine(
    entity_type: &str,
    config: &AppearanceConfig,
    default_setup: impl FnOnce() -> GoLEngine,
) -> GoLEngine {
    match apply_appearance_override(None, entity_type, config) {
        OverrideOutcome::NoOverride => default_setup(),
        OverrideOutcome::ResolvedForAllocation(resolved)
        | OverrideOutcome::AppliedToEngine(resolved) => {
            let mut engine = resolved.allocate_engine();
            apply_appearance_override(Some(&mut engine), entity_type, config);
            engine
        }
    }
}

/// Returns a per-cell density that falls linearly from `center` in the middle
/// of a `cols x rows` grid to `edge` at its corners.
///
/// Meant for [`GoLEngine::random_seed_by`], so entities look solid in the
/// middle and ragged at the rim.
pub fn radial_density(
    cols: usize,
    rows: usize,
    center: f64,
    edge: f64,
) -> impl Fn(usize, usize) -> f64 {
    let (cx, cy) = ((cols as f64 - 1.0) / 2.0, (rows as f64 - 1.0) / 2.0);
    let max_distance = cx.hypot(cy).max(f64::EPSILON);
    move |x, y| {
        let t = (x as f64 - cx).hypot(y as f64 - cy) / max_distance;
        center + (edge - center) * t
    }
}
