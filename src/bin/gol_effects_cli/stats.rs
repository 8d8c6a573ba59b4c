use crate::util::{load_pattern, print_population};
use clap::Args;
use gol_effects::{GoLEngine, Grid, Pattern, PatternKind};

#[derive(Args, Debug)]
pub(super) struct StatsArgs {
    /// Catalog name or path to an .rle file
    pattern: String,

    /// How many generations to search for a period
    #[arg(short, long, default_value_t = 64)]
    max_period: u32,
}

pub(super) fn run_stats(args: StatsArgs) -> anyhow::Result<()> {
    let timer = std::time::Instant::now();
    let pattern = load_pattern(&args.pattern)?;
    println!("Size: {}x{}", pattern.width(), pattern.height());
    print_population(pattern.population());
    match pattern.bounding_box() {
        Some((x0, y0, x1, y1)) => println!("Bounding box: ({}, {}) - ({}, {})", x0, y0, x1, y1),
        None => println!("Bounding box: empty"),
    }

    match classify(&pattern, args.max_period) {
        Some((1, [0, 0])) => println!("Class: still life"),
        Some((period, [0, 0])) => println!("Class: oscillator, period {}", period),
        Some((period, [dx, dy])) => {
            println!("Class: spaceship, period {}, moves ({}, {})", period, dx, dy)
        }
        None => println!("Class: no period up to {}", args.max_period),
    }

    if let Some(kind) = PatternKind::from_name(&args.pattern) {
        if let Some(period) = kind.period() {
            let margin = kind.loop_margin();
            println!(
                "Loop envelope: {}x{} (margin {})",
                pattern.width() + 2 * margin,
                pattern.height() + 2 * margin,
                margin
            );
            for phase in 0..period {
                let cells = kind.phase(phase);
                println!(
                    "Phase {}: {}x{}, {} cells",
                    phase,
                    cells.width(),
                    cells.height(),
                    cells.population()
                );
            }
        }
    }
    println!(
        "Computed stats in {:.3} secs",
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Finds the smallest period after which the live cells repeat, possibly
/// translated, and the translation per period.
fn classify(pattern: &Pattern, max_period: u32) -> Option<(u32, [i32; 2])> {
    // nothing can reach the border within `max_period` generations
    let pad = max_period as usize + 1;
    let mut engine = GoLEngine::new(
        pattern.width() + 2 * pad,
        pattern.height() + 2 * pad,
        GoLEngine::DEFAULT_UPDATE_RATE_FPS,
    );
    engine.set_pattern(pattern, pad as i32, pad as i32);
    let (x0, y0, initial) = live_part(engine.current())?;

    for generation in 1..=max_period {
        engine.update();
        let (x, y, current) = live_part(engine.current())?;
        if current == initial {
            let dx = x as i32 - x0 as i32;
            let dy = y as i32 - y0 as i32;
            return Some((generation, [dx, dy]));
        }
    }
    None
}

/// Crops `grid` to its live cells, with the position of the crop.
fn live_part(grid: &Grid) -> Option<(usize, usize, Pattern)> {
    let (x0, y0, x1, y1) = grid.bounding_box()?;
    let cropped = Pattern::from_grid_region(grid, x0 as i32, y0 as i32, x1 - x0 + 1, y1 - y0 + 1);
    Some((x0, y0, cropped))
}
