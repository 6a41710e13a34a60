use super::BeatUnit;
use crate::error::{MetronomeError, Result};

/// Returns the length of one beat in seconds.
///
/// The note value is scaled against a quarter note and the time signature
/// numerator against a four-beat measure:
///
/// ```text
/// multiplier = 4 / note_type          (÷ 1.5 when dotted)
/// multiplier = multiplier * (4 / beats_per_measure)
/// seconds    = (60 / tempo_bpm) * multiplier
/// ```
///
/// The operations are applied in exactly this order so results match
/// bit-for-bit across callers.
pub fn compute_beat_duration(
    tempo_bpm: f64,
    beats_per_measure: u32,
    note_type: u32,
    dotted: bool,
) -> Result<f64> {
    if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
        return Err(MetronomeError::InvalidTempo(tempo_bpm));
    }
    if beats_per_measure == 0 {
        return Err(MetronomeError::InvalidBeatsPerMeasure(beats_per_measure));
    }
    if note_type == 0 {
        return Err(MetronomeError::InvalidBeatUnit(note_type.to_string()));
    }

    let mut multiplier = 4.0 / f64::from(note_type);
    if dotted {
        multiplier /= 1.5;
    }
    multiplier *= 4.0 / f64::from(beats_per_measure);
    Ok((60.0 / tempo_bpm) * multiplier)
}

/// Beat length in milliseconds, the unit the tick scheduler takes as its period
pub fn beat_interval_millis(tempo_bpm: f64, beats_per_measure: u32, unit: &BeatUnit) -> Result<f64> {
    Ok(unit.duration(tempo_bpm, beats_per_measure)? * 1000.0)
}
