pub mod beat;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod logging;
pub mod metronome;
pub mod state;
pub mod ticker;

pub use beat::{compute_beat_duration, BeatCatalog, BeatUnit};
pub use cli::Args;
pub use error::{MetronomeError, Result};
pub use metronome::Metronome;
pub use ticker::{Tick, TickCommand, TickScheduler};
