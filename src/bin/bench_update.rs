use gol_effects::*;

const SEED: u64 = 42;

fn main() {
    // raw update throughput on random soups of growing size
    for size_log2 in 5..=10 {
        let size = 1usize << size_log2;
        let mut engine = GoLEngine::new(size, size, GoLEngine::DEFAULT_UPDATE_RATE_FPS);
        engine.random_seed_with(GoLEngine::DEFAULT_SEED_DENSITY, Some(SEED));
        let generations = (1u64 << 24) / (size * size) as u64;

        let timer = std::time::Instant::now();
        for _ in 0..generations {
            engine.update();
        }
        let elapsed = timer.elapsed().as_secs_f64();
        println!(
            "{}x{}\tgens={}\ttime={:.3}\tcells/s={:.3e}\tpop={}",
            size,
            size,
            generations,
            elapsed,
            (size * size) as f64 * generations as f64 / elapsed,
            engine.count_alive_cells()
        );
    }

    // a frame loop of many small loop-pattern entities
    let mut config = AppearanceConfig::new();
    config.set_override("invaders", AppearanceOverride::loop_pattern("LWSS"));
    let mut engines = (0..1000)
        .map(|_| setup_entity_engine("invaders", &config, || GoLEngine::new(8, 8, 10.0)))
        .collect::<Vec<_>>();
    let timer = std::time::Instant::now();
    for frame in 0..6000 {
        for engine in engines.iter_mut() {
            engine.update_throttled(frame);
            update_loop_pattern(engine, config.loop_update_rate, false);
        }
    }
    println!(
        "1000 loop entities x 6000 frames: {:.3} secs",
        timer.elapsed().as_secs_f64()
    );
}
