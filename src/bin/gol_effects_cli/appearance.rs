use crate::util::{print_population, render};
use clap::Args;
use gol_effects::{
    radial_density, setup_entity_engine, update_loop_pattern, AppearanceConfig, CellMask, GoLEngine,
};

#[derive(Args, Debug)]
pub(super) struct AppearanceArgs {
    /// Path to the JSON appearance configuration
    config: String,

    /// Entity types to spawn, all configured ones if omitted
    entities: Vec<String>,

    /// Number of host frames to replay
    #[arg(short, long, default_value_t = 60)]
    frames: u64,

    /// Size of the density-seeded fallback engine
    #[arg(short, long, default_value_t = 12)]
    size: usize,

    /// Seed of the density-seeded fallback engines
    #[arg(long)]
    seed: Option<u64>,
}

pub(super) fn run_appearance(args: AppearanceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.size > 0, "The fallback engine must not be empty");
    let config = AppearanceConfig::from_file(&args.config)?;
    let mut entity_types = args.entities.clone();
    if entity_types.is_empty() {
        entity_types = config.overrides.keys().cloned().collect();
        entity_types.sort();
    }

    let mut entities = entity_types
        .iter()
        .map(|entity_type| {
            let engine = setup_entity_engine(entity_type, &config, || {
                let mut engine =
                    GoLEngine::new(args.size, args.size, GoLEngine::DEFAULT_UPDATE_RATE_FPS);
                engine.random_seed_by(radial_density(args.size, args.size, 0.6, 0.1), args.seed);
                engine
            });
            (entity_type.as_str(), engine)
        })
        .collect::<Vec<_>>();

    for frame in 0..args.frames {
        for (_, engine) in entities.iter_mut() {
            engine.update_throttled(frame);
            update_loop_pattern(engine, config.loop_update_rate, true);
        }
    }

    for (entity_type, engine) in &entities {
        let [width, height] = engine.pixel_size(config.cell_size());
        let mode = if engine.is_loop_pattern() {
            "loop"
        } else if engine.is_frozen() {
            "static"
        } else {
            "live"
        };
        println!(
            "{}: {}x{} cells, {}x{} px, {}, generation {}",
            entity_type,
            engine.cols(),
            engine.rows(),
            width,
            height,
            mode,
            engine.generation()
        );
        print!("{}", render(engine.current()));
        print_population(engine.count_alive_cells());
    }
    Ok(())
}
