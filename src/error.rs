use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised by beat lookup, duration arithmetic and the tick scheduler
#[derive(Debug)]
pub enum MetronomeError {
    /// No beat unit with this identifier exists in the catalog
    InvalidBeatUnit(String),
    /// Tempo must be a positive, finite number of beats per minute
    InvalidTempo(f64),
    /// Time signature numerator must be at least one
    InvalidBeatsPerMeasure(u32),
    /// Tick interval must be a positive, finite number of milliseconds
    InvalidInterval(f64),
    /// The scheduler thread is gone
    Disconnected,
    /// The scheduler thread could not be spawned
    Spawn(io::Error),
    /// Settings could not be loaded
    Config(::config::ConfigError),
}

impl fmt::Display for MetronomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetronomeError::InvalidBeatUnit(id) => write!(f, "Invalid beat unit: {}", id),
            MetronomeError::InvalidTempo(bpm) => write!(f, "Invalid tempo: {} BPM", bpm),
            MetronomeError::InvalidBeatsPerMeasure(n) => {
                write!(f, "Invalid beats per measure: {}", n)
            }
            MetronomeError::InvalidInterval(ms) => write!(f, "Invalid tick interval: {} ms", ms),
            MetronomeError::Disconnected => write!(f, "Tick scheduler disconnected"),
            MetronomeError::Spawn(e) => write!(f, "Failed to spawn tick scheduler: {}", e),
            MetronomeError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl Error for MetronomeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MetronomeError::Spawn(e) => Some(e),
            MetronomeError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MetronomeError {
    fn from(e: io::Error) -> Self {
        MetronomeError::Spawn(e)
    }
}

impl From<::config::ConfigError> for MetronomeError {
    fn from(e: ::config::ConfigError) -> Self {
        MetronomeError::Config(e)
    }
}

/// Result type for metronome operations
pub type Result<T> = std::result::Result<T, MetronomeError>;
