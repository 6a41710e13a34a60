use super::duration::compute_beat_duration;
use crate::error::{MetronomeError, Result};
use log::debug;

/// A note value one metronome beat can be counted in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatUnit {
    /// Selection key, compared as a string ("4" and "4." are different units)
    pub id: &'static str,
    pub label: &'static str,
    /// Notation symbol, passed through untouched
    pub glyph: &'static str,
    /// Denominator relative to a whole note (1, 2, 4, 8, 16)
    pub note_type: u32,
    pub dotted: bool,
}

impl BeatUnit {
    /// Seconds per beat for this unit at the given tempo and time signature numerator
    pub fn duration(&self, tempo_bpm: f64, beats_per_measure: u32) -> Result<f64> {
        compute_beat_duration(tempo_bpm, beats_per_measure, self.note_type, self.dotted)
    }
}

pub static BEAT_UNITS: [BeatUnit; 8] = [
    BeatUnit {
        id: "1",
        label: "whole note",
        glyph: "𝅝",
        note_type: 1,
        dotted: false,
    },
    BeatUnit {
        id: "2",
        label: "half note",
        glyph: "𝅗𝅥",
        note_type: 2,
        dotted: false,
    },
    BeatUnit {
        id: "doted2",
        label: "dotted half note",
        glyph: "𝅗𝅥.",
        note_type: 2,
        dotted: true,
    },
    BeatUnit {
        id: "4",
        label: "quarter note",
        glyph: "𝅘𝅥",
        note_type: 4,
        dotted: false,
    },
    BeatUnit {
        id: "4.",
        label: "dotted quarter note",
        glyph: "𝅘𝅥.",
        note_type: 4,
        dotted: true,
    },
    BeatUnit {
        id: "8",
        label: "eighth note",
        glyph: "𝅘𝅥𝅮",
        note_type: 8,
        dotted: false,
    },
    BeatUnit {
        id: "8.",
        label: "dotted eighth note",
        glyph: "𝅘𝅥𝅮.",
        note_type: 8,
        dotted: true,
    },
    BeatUnit {
        id: "16",
        label: "sixteenth note",
        glyph: "𝅘𝅥𝅯",
        note_type: 16,
        dotted: false,
    },
];

/// Read-only view over an ordered table of beat units
#[derive(Debug, Clone, Copy)]
pub struct BeatCatalog {
    units: &'static [BeatUnit],
}

impl Default for BeatCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl BeatCatalog {
    /// The built-in table of eight beat units
    pub fn standard() -> Self {
        BeatCatalog { units: &BEAT_UNITS }
    }

    /// Finds the first unit whose identifier matches exactly
    pub fn lookup(&self, id: &str) -> Result<&'static BeatUnit> {
        let unit = self
            .units
            .iter()
            .find(|unit| unit.id == id)
            .ok_or_else(|| MetronomeError::InvalidBeatUnit(id.to_string()))?;
        debug!("Resolved beat unit '{}' -> {}", id, unit.label);
        Ok(unit)
    }

    pub fn units(&self) -> &'static [BeatUnit] {
        self.units
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static BeatUnit> {
        self.units.iter()
    }
}
