mod appearance;
mod catalog;
mod export;
mod run;
mod stats;
mod util;

use appearance::{run_appearance, AppearanceArgs};
use catalog::{run_catalog, CatalogArgs};
use clap::{Parser, Subcommand};
use export::{run_export, ExportArgs};
use run::{run_run, RunArgs};
use stats::{run_stats, StatsArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// List the built-in patterns with their category, size and period
    Catalog(CatalogArgs),
    /// Simulate a pattern or a random soup and print it as text
    Run(RunArgs),
    /// Replay the frame loop of entities configured by an appearance file
    Appearance(AppearanceArgs),
    /// Write a (transformed) pattern phase in RLE format
    Export(ExportArgs),
    /// Compute pattern's population, bounding box and loop envelope
    Stats(StatsArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CLIParser::parse();

    match args.action {
        Action::Catalog(args) => run_catalog(args),
        Action::Run(args) => run_run(args),
        Action::Appearance(args) => run_appearance(args),
        Action::Export(args) => run_export(args),
        Action::Stats(args) => run_stats(args),
    }
}
