use clap::Args;
use gol_effects::{PatternCategory, PatternKind};

#[derive(Args, Debug)]
pub(super) struct CatalogArgs {
    /// Also draw every pattern
    #[arg(short, long)]
    draw: bool,
}

pub(super) fn run_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    println!(
        "{:<24}{:<12}{:>6}{:>8}{:>6}  displacement",
        "name", "category", "size", "period", "pop"
    );
    for kind in PatternKind::ALL {
        let pattern = kind.pattern();
        let category = match kind.category() {
            PatternCategory::StillLife => "still life",
            PatternCategory::Oscillator => "oscillator",
            PatternCategory::Spaceship => "spaceship",
            PatternCategory::Methuselah => "methuselah",
        };
        let period = kind.period().map_or("-".to_string(), |p| p.to_string());
        let [dx, dy] = kind.displacement();
        println!(
            "{:<24}{:<12}{:>6}{:>8}{:>6}  ({}, {})",
            kind.name(),
            category,
            format!("{}x{}", pattern.width(), pattern.height()),
            period,
            pattern.population(),
            dx,
            dy
        );
        if args.draw {
            print!("{}", crate::util::render(&pattern));
            println!();
        }
    }
    Ok(())
}
