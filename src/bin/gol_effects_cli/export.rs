use crate::util::load_pattern;
use clap::Args;
use gol_effects::PatternKind;

#[derive(Args, Debug)]
pub(super) struct ExportArgs {
    /// Catalog name or path to an .rle file
    pattern: String,

    /// Path to the file where the pattern will be saved, stdout if omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Export the phase reached after this many generations (catalog patterns only)
    #[arg(short, long, default_value_t = 0)]
    phase: u32,

    /// Number of clockwise quarter turns
    #[arg(short, long, default_value_t = 0)]
    rotate: u32,

    /// Mirror left to right
    #[arg(long)]
    flip_horizontal: bool,

    /// Mirror top to bottom
    #[arg(long)]
    flip_vertical: bool,
}

pub(super) fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut pattern = match PatternKind::from_name(&args.pattern) {
        Some(kind) => kind.phase(args.phase),
        None => {
            if args.phase != 0 {
                log::warn!("Phases are only available for catalog patterns, ignoring");
            }
            load_pattern(&args.pattern)?
        }
    };
    for _ in 0..args.rotate % 4 {
        pattern = pattern.rotate_90();
    }
    if args.flip_horizontal {
        pattern = pattern.flip_horizontal();
    }
    if args.flip_vertical {
        pattern = pattern.flip_vertical();
    }

    match &args.output {
        Some(path) => pattern.to_rle_file(path)?,
        None => println!("{}", pattern.to_rle()),
    }
    Ok(())
}
