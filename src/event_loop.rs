// event_loop.rs

use crate::error::Result;
use crate::metronome::Metronome;
use crate::state::Beat;
use log::{debug, error, info};
use std::time::{Duration, Instant};

/// Pulls beats from a running metronome and hands them to a consumer
pub struct EventLoop {
    metronome: Metronome,
    last_beat_time: Option<Instant>,
}

impl EventLoop {
    pub fn new(metronome: Metronome) -> Self {
        EventLoop {
            metronome,
            last_beat_time: None,
        }
    }

    /// Runs until `max_beats` beats have been delivered, or forever when `None`.
    /// The handler receives each beat and the time since the previous one.
    pub fn run<F>(&mut self, max_beats: Option<u64>, mut handler: F) -> Result<u64>
    where
        F: FnMut(&Beat, Option<Duration>),
    {
        let mut delivered = 0;
        while max_beats.map_or(true, |max| delivered < max) {
            let beat = match self.metronome.next_beat() {
                Ok(beat) => beat,
                Err(e) => {
                    error!("Beat channel error: {}", e);
                    return Err(e);
                }
            };

            let now = Instant::now();
            let spacing = self.last_beat_time.map(|last| now.duration_since(last));
            if let Some(spacing) = spacing {
                debug!(
                    "Observed beat spacing: {:?} ({} BPM)",
                    spacing,
                    observed_bpm(spacing)
                );
            } else {
                info!("First beat received");
            }
            self.last_beat_time = Some(now);

            handler(&beat, spacing);
            delivered += 1;
        }
        Ok(delivered)
    }

    pub fn metronome(&mut self) -> &mut Metronome {
        &mut self.metronome
    }

    pub fn into_inner(self) -> Metronome {
        self.metronome
    }
}

/// Beats per minute implied by one beat spacing, 0 for a zero spacing
pub fn observed_bpm(spacing: Duration) -> f64 {
    let seconds = spacing.as_secs_f64();
    if seconds == 0.0 {
        return 0.0;
    }
    60.0 / seconds
}
