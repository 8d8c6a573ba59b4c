use anyhow::Result;
use gol_effects::{CellMask, Pattern, PatternKind};
use num_format::{CustomFormat, Grouping, ToFormattedString};

pub(super) fn print_population(population: usize) {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .unwrap_or_default();
    println!("Population: {}", population.to_formatted_string(&fmt));
}

/// Accepts either a catalog name (`GLIDER`, `lwss`, ...) or a path to an .rle file.
pub(super) fn load_pattern(source: &str) -> Result<Pattern> {
    if let Some(kind) = PatternKind::from_name(source) {
        return Ok(kind.pattern());
    }
    if source.ends_with(".rle") {
        return Pattern::from_rle_file(source);
    }
    anyhow::bail!("{} is neither a catalog pattern nor an .rle file", source)
}

/// Text rendering, one character per cell.
pub(super) fn render(mask: &impl CellMask) -> String {
    let mut out = String::with_capacity((mask.cols() + 1) * mask.rows());
    for y in 0..mask.rows() {
        for x in 0..mask.cols() {
            out.push(if mask.is_alive(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
