//! Beat units and beat duration arithmetic
//!
//! This module holds the fixed table of note values a metronome beat can be
//! counted in, and the conversion from tempo and time signature to the
//! real-time length of one beat.
//!
//! The main components are:
//! - [`BeatUnit`] and [`BeatCatalog`] for selecting a note value by identifier
//! - [`compute_beat_duration`] for the seconds-per-beat formula
//!
mod catalog;
mod duration;

pub use catalog::{BeatCatalog, BeatUnit, BEAT_UNITS};
pub use duration::{beat_interval_millis, compute_beat_duration};
