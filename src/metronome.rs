// metronome.rs

use crate::beat::{beat_interval_millis, BeatCatalog, BeatUnit};
use crate::config::Settings;
use crate::error::Result;
use crate::state::{Beat, BeatPosition};
use crate::ticker::TickScheduler;
use log::{debug, info};
use std::time::Duration;

/// Drives a tick scheduler at the period of one beat and counts the ticks
/// as beats within measures.
pub struct Metronome {
    catalog: BeatCatalog,
    scheduler: TickScheduler,
    unit: &'static BeatUnit,
    tempo: f64,
    beats_per_measure: u32,
    position: BeatPosition,
}

impl Metronome {
    /// Resolves the beat unit and period first; nothing is spawned if either is invalid.
    pub fn new(
        catalog: BeatCatalog,
        tempo: f64,
        beats_per_measure: u32,
        beat_unit: &str,
    ) -> Result<Self> {
        let unit = catalog.lookup(beat_unit)?;
        let interval_ms = beat_interval_millis(tempo, beats_per_measure, unit)?;
        let scheduler = TickScheduler::with_interval(interval_ms)?;

        info!(
            "Metronome ready: {} BPM, {} beats per measure, beat unit {} ({:.3} ms per beat)",
            tempo, beats_per_measure, unit.label, interval_ms
        );

        Ok(Self {
            catalog,
            scheduler,
            unit,
            tempo,
            beats_per_measure,
            position: BeatPosition::new(beats_per_measure),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            BeatCatalog::standard(),
            settings.tempo,
            settings.beats_per_measure,
            &settings.beat_unit,
        )
    }

    pub fn start(&mut self) -> Result<()> {
        info!("Metronome started");
        self.scheduler.start()
    }

    /// Stops ticking and rewinds to the first beat of the first measure
    pub fn stop(&mut self) -> Result<()> {
        self.scheduler.stop()?;
        self.position.reset();
        info!("Metronome stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn set_tempo(&mut self, tempo: f64) -> Result<()> {
        self.reconfigure(tempo, self.beats_per_measure, self.unit)?;
        self.tempo = tempo;
        Ok(())
    }

    pub fn set_beat_unit(&mut self, beat_unit: &str) -> Result<()> {
        let unit = self.catalog.lookup(beat_unit)?;
        self.reconfigure(self.tempo, self.beats_per_measure, unit)?;
        self.unit = unit;
        Ok(())
    }

    pub fn set_beats_per_measure(&mut self, beats_per_measure: u32) -> Result<()> {
        self.reconfigure(self.tempo, beats_per_measure, self.unit)?;
        self.beats_per_measure = beats_per_measure;
        self.position.set_beats_per_measure(beats_per_measure);
        Ok(())
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn beat_unit(&self) -> &'static BeatUnit {
        self.unit
    }

    pub fn beat_duration(&self) -> Duration {
        Duration::from_secs_f64(self.scheduler.interval_millis() / 1000.0)
    }

    pub fn position(&self) -> &BeatPosition {
        &self.position
    }

    /// Blocks until the next beat
    pub fn next_beat(&mut self) -> Result<Beat> {
        self.scheduler.recv()?;
        Ok(self.position.advance())
    }

    pub fn next_beat_timeout(&mut self, timeout: Duration) -> Result<Option<Beat>> {
        Ok(self
            .scheduler
            .recv_timeout(timeout)?
            .map(|_| self.position.advance()))
    }

    pub fn shutdown(self) -> Result<()> {
        self.scheduler.shutdown()
    }

    fn reconfigure(&mut self, tempo: f64, beats_per_measure: u32, unit: &BeatUnit) -> Result<()> {
        let interval_ms = beat_interval_millis(tempo, beats_per_measure, unit)?;
        debug!(
            "Reconfiguring metronome: {} BPM, {} beats per measure, unit {} -> {:.3} ms",
            tempo, beats_per_measure, unit.id, interval_ms
        );
        self.scheduler.set_interval(interval_ms)
    }
}
