use crate::{GoLEngine, Pattern};
use std::fmt;
use std::str::FromStr;

/// Broad behaviour class of a catalog pattern under B3/S23.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// Unchanged by the rule.
    StillLife,
    /// Returns to its exact starting configuration after its period.
    Oscillator,
    /// Returns to its starting shape after its period, translated.
    Spaceship,
    /// Evolves chaotically for a long time before settling or dying.
    Methuselah,
}

/// The fixed catalog of canonical patterns, keyed by their LifeWiki names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Block,
    Beehive,
    Loaf,
    Boat,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    Glider,
    LightweightSpaceship,
    RPentomino,
    Acorn,
    Diehard,
}

/// Methuselahs have no period, so static phases of them are capped here.
pub const MAX_TRANSIENT_PHASE: u32 = 64;

impl PatternKind {
    pub const ALL: [PatternKind; 13] = [
        PatternKind::Block,
        PatternKind::Beehive,
        PatternKind::Loaf,
        PatternKind::Boat,
        PatternKind::Blinker,
        PatternKind::Toad,
        PatternKind::Beacon,
        PatternKind::Pulsar,
        PatternKind::Glider,
        PatternKind::LightweightSpaceship,
        PatternKind::RPentomino,
        PatternKind::Acorn,
        PatternKind::Diehard,
    ];

    /// Returns the catalog name, e.g. `LIGHTWEIGHT_SPACESHIP`.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Block => "BLOCK",
            PatternKind::Beehive => "BEEHIVE",
            PatternKind::Loaf => "LOAF",
            PatternKind::Boat => "BOAT",
            PatternKind::Blinker => "BLINKER",
            PatternKind::Toad => "TOAD",
            PatternKind::Beacon => "BEACON",
            PatternKind::Pulsar => "PULSAR",
            PatternKind::Glider => "GLIDER",
            PatternKind::LightweightSpaceship => "LIGHTWEIGHT_SPACESHIP",
            PatternKind::RPentomino => "R_PENTOMINO",
            PatternKind::Acorn => "ACORN",
            PatternKind::Diehard => "DIEHARD",
        }
    }

    pub fn category(self) -> PatternCategory {
        match self {
            PatternKind::Block | PatternKind::Beehive | PatternKind::Loaf | PatternKind::Boat => {
                PatternCategory::StillLife
            }
            PatternKind::Blinker | PatternKind::Toad | PatternKind::Beacon | PatternKind::Pulsar => {
                PatternCategory::Oscillator
            }
            PatternKind::Glider | PatternKind::LightweightSpaceship => PatternCategory::Spaceship,
            PatternKind::RPentomino | PatternKind::Acorn | PatternKind::Diehard => {
                PatternCategory::Methuselah
            }
        }
    }

    /// Returns the documented period: `Some(1)` for still lifes, `None` for
    /// methuselahs, which never recur.
    pub fn period(self) -> Option<u32> {
        match self.category() {
            PatternCategory::StillLife => Some(1),
            PatternCategory::Methuselah => None,
            _ => Some(match self {
                PatternKind::Pulsar => 3,
                PatternKind::Glider | PatternKind::LightweightSpaceship => 4,
                _ => 2,
            }),
        }
    }

    /// Returns the `[dx, dy]` translation after one full period.
    ///
    /// Only spaceships move; the glider travels one cell diagonally per four
    /// generations, the lightweight spaceship two cells west per four.
    pub fn displacement(self) -> [i32; 2] {
        match self {
            PatternKind::Glider => [1, 1],
            PatternKind::LightweightSpaceship => [-2, 0],
            _ => [0, 0],
        }
    }

    /// Row-major cells of the canonical phase.
    pub fn rows(self) -> &'static [&'static [u8]] {
        match self {
            PatternKind::Block => &[&[1, 1], &[1, 1]],
            PatternKind::Beehive => &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]],
            PatternKind::Loaf => &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 0, 1], &[0, 0, 1, 0]],
            PatternKind::Boat => &[&[1, 1, 0], &[1, 0, 1], &[0, 1, 0]],
            // vertical phase, centred in a 3x3 box so both phases share it
            PatternKind::Blinker => &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]],
            PatternKind::Toad => &[&[0, 1, 1, 1], &[1, 1, 1, 0]],
            PatternKind::Beacon => &[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1], &[0, 0, 1, 1]],
            PatternKind::Pulsar => &PULSAR,
            PatternKind::Glider => &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
            PatternKind::LightweightSpaceship => &[
                &[0, 1, 0, 0, 1],
                &[1, 0, 0, 0, 0],
                &[1, 0, 0, 0, 1],
                &[1, 1, 1, 1, 0],
            ],
            PatternKind::RPentomino => &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]],
            PatternKind::Acorn => &[
                &[0, 1, 0, 0, 0, 0, 0],
                &[0, 0, 0, 1, 0, 0, 0],
                &[1, 1, 0, 0, 1, 1, 1],
            ],
            PatternKind::Diehard => &[
                &[0, 0, 0, 0, 0, 0, 1, 0],
                &[1, 1, 0, 0, 0, 0, 0, 0],
                &[0, 1, 0, 0, 0, 1, 1, 1],
            ],
        }
    }

    /// Builds the canonical phase as a [`Pattern`].
    pub fn pattern(self) -> Pattern {
        Pattern::from_rows(self.rows())
    }

    /// Looks a pattern up by name.
    ///
    /// Matching ignores case and treats `-` and spaces like `_`, so
    /// `"R-pentomino"` and `"Lightweight spaceship"` both resolve. `LWSS` is
    /// accepted as an alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect::<String>();
        if normalized == "LWSS" {
            return Some(PatternKind::LightweightSpaceship);
        }
        Self::ALL.into_iter().find(|kind| kind.name() == normalized)
    }

    /// Resolves an optional name, falling back to [`PatternKind::Blinker`].
    pub fn resolve_or_default(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown pattern {:?}, falling back to BLINKER", name);
                PatternKind::Blinker
            }),
            None => PatternKind::Blinker,
        }
    }

    /// Returns the phase reached after `phase` generations, cropped to its
    /// live bounding box.
    ///
    /// Periodic patterns take `phase` modulo their period; methuselahs are
    /// capped at [`MAX_TRANSIENT_PHASE`]. If the pattern has died out by then,
    /// the canonical phase is returned instead.
    pub fn phase(self, phase: u32) -> Pattern {
        let canonical = self.pattern();
        let steps = match self.period() {
            Some(period) => phase % period,
            None => phase.min(MAX_TRANSIENT_PHASE),
        };
        if steps == 0 {
            return canonical;
        }

        // a pattern grows by at most one cell per generation in each direction
        let margin = steps as usize + 1;
        let mut engine = GoLEngine::new(
            canonical.width() + 2 * margin,
            canonical.height() + 2 * margin,
            GoLEngine::DEFAULT_UPDATE_RATE_FPS,
        );
        engine.set_pattern(&canonical, margin as i32, margin as i32);
        for _ in 0..steps {
            engine.update();
        }

        match engine.current().bounding_box() {
            Some((x0, y0, x1, y1)) => Pattern::from_grid_region(
                engine.current(),
                x0 as i32,
                y0 as i32,
                x1 - x0 + 1,
                y1 - y0 + 1,
            ),
            None => {
                log::warn!(
                    "{} died out after {} generations, using its canonical phase",
                    self.name(),
                    steps
                );
                canonical
            }
        }
    }

    /// Returns the margin a bounded grid needs around the centred canonical
    /// phase so that one full period evolves exactly as on the infinite plane.
    ///
    /// Returns 0 for methuselahs, which are never looped.
    pub fn loop_margin(self) -> usize {
        let Some(period) = self.period() else {
            return 0;
        };
        let canonical = self.pattern();
        let (w, h) = (canonical.width(), canonical.height());
        let pad = period as usize + 1;
        let mut engine = GoLEngine::new(
            w + 2 * pad,
            h + 2 * pad,
            GoLEngine::DEFAULT_UPDATE_RATE_FPS,
        );
        engine.set_pattern(&canonical, pad as i32, pad as i32);

        let mut margin = 0;
        for _ in 0..period {
            engine.update();
            if let Some((x0, y0, x1, y1)) = engine.current().bounding_box() {
                margin = margin
                    .max(pad.saturating_sub(x0))
                    .max(pad.saturating_sub(y0))
                    .max((x1 + 1).saturating_sub(pad + w))
                    .max((y1 + 1).saturating_sub(pad + h));
            }
        }
        margin
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| anyhow::anyhow!("Unknown pattern name: {}", s))
    }
}

#[rustfmt::skip]
const PULSAR: [&[u8]; 13] = [
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let dims = |kind: PatternKind| {
            let p = kind.pattern();
            (p.width(), p.height())
        };
        assert_eq!(dims(PatternKind::Block), (2, 2));
        assert_eq!(dims(PatternKind::Beehive), (4, 3));
        assert_eq!(dims(PatternKind::Loaf), (4, 4));
        assert_eq!(dims(PatternKind::Boat), (3, 3));
        assert_eq!(dims(PatternKind::Toad), (4, 2));
        assert_eq!(dims(PatternKind::Beacon), (4, 4));
        assert_eq!(dims(PatternKind::Pulsar), (13, 13));
        assert_eq!(dims(PatternKind::LightweightSpaceship), (5, 4));
        assert_eq!(dims(PatternKind::Acorn), (7, 3));
        assert_eq!(dims(PatternKind::Diehard), (8, 3));
    }

    #[test]
    fn test_name_lookup() {
        for kind in PatternKind::ALL {
            assert_eq!(PatternKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.to_string().parse::<PatternKind>().unwrap(), kind);
        }
        assert_eq!(PatternKind::from_name("r-pentomino"), Some(PatternKind::RPentomino));
        assert_eq!(
            PatternKind::from_name("Lightweight spaceship"),
            Some(PatternKind::LightweightSpaceship)
        );
        assert_eq!(PatternKind::from_name("lwss"), Some(PatternKind::LightweightSpaceship));
        assert_eq!(PatternKind::from_name("gosper"), None);
        assert!("gosper".parse::<PatternKind>().is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_blinker() {
        assert_eq!(PatternKind::resolve_or_default(Some("nope")), PatternKind::Blinker);
        assert_eq!(PatternKind::resolve_or_default(None), PatternKind::Blinker);
        assert_eq!(PatternKind::resolve_or_default(Some("toad")), PatternKind::Toad);
    }

    #[test]
    fn test_periods_and_displacement() {
        assert_eq!(PatternKind::Block.period(), Some(1));
        assert_eq!(PatternKind::Beacon.period(), Some(2));
        assert_eq!(PatternKind::Pulsar.period(), Some(3));
        assert_eq!(PatternKind::Glider.period(), Some(4));
        assert_eq!(PatternKind::Acorn.period(), None);
        assert_eq!(PatternKind::Pulsar.displacement(), [0, 0]);
        assert_eq!(PatternKind::LightweightSpaceship.displacement(), [-2, 0]);
    }

    #[test]
    fn test_phase_of_blinker() {
        let horizontal = PatternKind::Blinker.phase(1);
        assert_eq!(horizontal.to_rows(), vec![vec![1, 1, 1]]);
        assert_eq!(PatternKind::Blinker.phase(2), PatternKind::Blinker.pattern());
        assert_eq!(PatternKind::Blinker.phase(3), horizontal);
    }

    #[test]
    fn test_phase_of_glider_is_a_glider() {
        for phase in 0..4 {
            assert_eq!(PatternKind::Glider.phase(phase).population(), 5);
        }
    }

    #[test]
    fn test_phase_of_diehard_is_capped() {
        // diehard lives for 130 generations, so the cap keeps it alive
        let late = PatternKind::Diehard.phase(10_000);
        assert_eq!(late, PatternKind::Diehard.phase(MAX_TRANSIENT_PHASE));
        assert!(late.population() > 0);
    }

    #[test]
    fn test_loop_margins() {
        assert_eq!(PatternKind::Blinker.loop_margin(), 0);
        assert_eq!(PatternKind::Toad.loop_margin(), 1);
        assert_eq!(PatternKind::Pulsar.loop_margin(), 1);
        assert_eq!(PatternKind::Glider.loop_margin(), 1);
        assert_eq!(PatternKind::LightweightSpaceship.loop_margin(), 2);
        assert_eq!(PatternKind::Block.loop_margin(), 0);
        assert_eq!(PatternKind::Acorn.loop_margin(), 0);
    }
}
