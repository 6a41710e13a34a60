// config.rs

use crate::cli::Args;
use crate::error::Result;
use config::{Config, ConfigError, Environment, File};
use log::{debug, info};
use std::path::Path;

pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;
pub const DEFAULT_BEAT_UNIT: &str = "4";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Prefix for environment overrides, e.g. `BEATTICK_TEMPO=90`
pub const ENV_PREFIX: &str = "BEATTICK";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tempo: f64,
    pub beats_per_measure: u32,
    pub beat_unit: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tempo: DEFAULT_TEMPO,
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            beat_unit: DEFAULT_BEAT_UNIT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Layers defaults, an optional settings file and `BEATTICK_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("tempo", DEFAULT_TEMPO)?
            .set_default("beats_per_measure", i64::from(DEFAULT_BEATS_PER_MEASURE))?
            .set_default("beat_unit", DEFAULT_BEAT_UNIT)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = path {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_config(&config)
    }

    fn from_config(config: &Config) -> Result<Self> {
        let tempo = config.get_float("tempo")?;
        let raw_beats_per_measure = config.get_int("beats_per_measure")?;
        let beats_per_measure = u32::try_from(raw_beats_per_measure).map_err(|_| {
            ConfigError::Message(format!(
                "beats_per_measure out of range: {}",
                raw_beats_per_measure
            ))
        })?;
        let beat_unit = config.get_string("beat_unit")?;
        let log_level = config.get_string("log_level")?;

        debug!(
            "Loaded settings: tempo={}, beats_per_measure={}, beat_unit={}, log_level={}",
            tempo, beats_per_measure, beat_unit, log_level
        );

        Ok(Settings {
            tempo,
            beats_per_measure,
            beat_unit,
            log_level,
        })
    }

    /// Command-line values win over every other source
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(tempo) = args.tempo {
            debug!("Tempo overridden on command line: {}", tempo);
            self.tempo = tempo;
        }
        if let Some(beats_per_measure) = args.beats_per_measure {
            debug!(
                "Beats per measure overridden on command line: {}",
                beats_per_measure
            );
            self.beats_per_measure = beats_per_measure;
        }
        if let Some(beat_unit) = &args.beat_unit {
            debug!("Beat unit overridden on command line: {}", beat_unit);
            self.beat_unit = beat_unit.clone();
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }
        self
    }
}
