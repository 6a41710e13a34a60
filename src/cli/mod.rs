use crate::beat::BeatCatalog;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tempo in beats per minute
    #[arg(short, long)]
    pub tempo: Option<f64>,

    /// Time signature numerator (the 3 in 3/4)
    #[arg(short = 'm', long)]
    pub beats_per_measure: Option<u32>,

    /// Beat unit identifier, see --list-units
    #[arg(short = 'u', long)]
    pub beat_unit: Option<String>,

    /// Stop after this many beats
    #[arg(short, long)]
    pub beats: Option<u64>,

    /// List available beat units
    #[arg(long)]
    pub list_units: bool,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level written to the log file
    #[arg(long)]
    pub log_level: Option<String>,
}

/// One line per beat unit, in catalog order
pub fn format_unit_list(catalog: &BeatCatalog) -> Vec<String> {
    catalog
        .iter()
        .map(|unit| format!("{:<8} {:<4} {}", unit.id, unit.glyph, unit.label))
        .collect()
}
