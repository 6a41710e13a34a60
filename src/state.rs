/// A counted beat, as handed to beat consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    pub measure: u64,
    /// 1-based position within the measure
    pub beat: u32,
    pub downbeat: bool,
}

/// Beat and measure counter advanced once per tick
#[derive(Debug, Clone)]
pub struct BeatPosition {
    tick_count: u64,
    beat: u32,
    measure: u64,
    beats_per_measure: u32,
}

impl Default for BeatPosition {
    fn default() -> Self {
        Self::new(4)
    }
}

impl BeatPosition {
    pub fn new(beats_per_measure: u32) -> Self {
        Self {
            tick_count: 0,
            beat: 0,
            measure: 0,
            beats_per_measure: beats_per_measure.max(1),
        }
    }

    /// Counts one tick as the next beat
    pub fn advance(&mut self) -> Beat {
        self.tick_count += 1;

        if self.beat == 0 || self.beat >= self.beats_per_measure {
            self.beat = 1;
            self.measure += 1;
        } else {
            self.beat += 1;
        }

        Beat {
            measure: self.measure,
            beat: self.beat,
            downbeat: self.beat == 1,
        }
    }

    /// Takes effect from the next measure boundary
    pub fn set_beats_per_measure(&mut self, beats_per_measure: u32) {
        self.beats_per_measure = beats_per_measure.max(1);
    }

    pub fn reset(&mut self) {
        self.tick_count = 0;
        self.beat = 0;
        self.measure = 0;
    }

    pub fn get_tick_count(&self) -> u64 {
        self.tick_count
    }

    /// 0 before the first beat
    pub fn get_beat(&self) -> u32 {
        self.beat
    }

    pub fn get_measure(&self) -> u64 {
        self.measure
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }
}
