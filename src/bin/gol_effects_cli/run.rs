use crate::util::{load_pattern, print_population, render};
use clap::Args;
use gol_effects::GoLEngine;

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Catalog name or path to an .rle file; a random soup is used if omitted
    pattern: Option<String>,

    /// Width of the field in cells
    #[arg(short, long, default_value_t = 40)]
    cols: usize,

    /// Height of the field in cells
    #[arg(short, long, default_value_t = 20)]
    rows: usize,

    /// Number of generations to simulate
    #[arg(short, long, default_value_t = 16)]
    generations: u64,

    /// Simulation rate in generations per second, scheduled on host frames
    #[arg(short, long, default_value_t = GoLEngine::DEFAULT_UPDATE_RATE_FPS)]
    fps: f64,

    /// Host frame rate the simulation is scheduled on
    #[arg(long, default_value_t = GoLEngine::DEFAULT_HOST_FPS)]
    host_fps: f64,

    /// Print the field every `every` generations, 0 prints only the result
    #[arg(short, long, default_value_t = 0)]
    every: u64,

    /// Alive probability of the random soup
    #[arg(short, long, default_value_t = GoLEngine::DEFAULT_SEED_DENSITY)]
    density: f64,

    /// Seed of the random soup, taken from the OS if omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

pub(super) fn run_run(args: RunArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.cols > 0 && args.rows > 0, "The field must not be empty");
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "The update rate must be positive"
    );
    anyhow::ensure!(
        args.host_fps.is_finite() && args.host_fps > 0.0,
        "The host frame rate must be positive"
    );
    let mut engine = GoLEngine::new(args.cols, args.rows, args.fps).with_host_fps(args.host_fps);
    match &args.pattern {
        Some(source) => {
            let pattern = load_pattern(source)?;
            engine.set_pattern_centered(&pattern);
        }
        None => engine.random_seed_with(args.density, args.seed),
    }
    print!("{}", render(engine.current()));

    let timer = std::time::Instant::now();
    let mut frame = 0;
    while engine.generation() < args.generations {
        let updated = engine.update_throttled(frame);
        frame += 1;
        if updated && args.every != 0 && engine.generation() % args.every == 0 {
            println!("Generation {}", engine.generation());
            print!("{}", render(engine.current()));
        }
    }
    let elapsed = timer.elapsed();

    if args.every == 0 || args.generations % args.every != 0 {
        println!("Generation {}", engine.generation());
        print!("{}", render(engine.current()));
    }
    print_population(engine.count_alive_cells());
    println!("Density: {:.3}", engine.get_density());
    println!(
        "Updated for {} generations over {} host frames ({:.1} secs of game time) in {:.3} secs",
        args.generations,
        frame,
        frame as f64 / engine.host_fps(),
        elapsed.as_secs_f64()
    );
    Ok(())
}
