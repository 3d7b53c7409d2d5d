//! Instrument and effects settings (pure data, no audio)
//!
//! Mirrors the piano panel of the editor: which sampled instrument plays,
//! the three-band EQ, octave shift and the effect send levels.

/// Three-band EQ in decibels, each band in `[-24, 24]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EqSettings {
    pub bass: f64,
    pub mid: f64,
    pub treble: f64,
}

impl EqSettings {
    pub fn new(bass: f64, mid: f64, treble: f64) -> Self {
        Self { bass, mid, treble }
    }

    pub fn is_flat(&self) -> bool {
        self.bass == 0.0 && self.mid == 0.0 && self.treble == 0.0
    }
}

/// The eleven-field audio settings block
///
/// - `instrument_index`: index into the instrument lookup table
/// - `octave_offset`: `-3..=3`
/// - `reverb_level`, `volume_level`, `chorus_level`, `delay_level`: `0.0-1.0`
/// - `note_duration`: fraction of a step a note sounds for, `0.1-1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentProfile {
    pub instrument_index: usize,
    pub cut_off_previous_notes: bool,
    pub eq: EqSettings,
    pub octave_offset: i32,
    pub reverb_level: f64,
    pub note_duration: f64,
    pub volume_level: f64,
    pub chorus_level: f64,
    pub delay_level: f64,
}

impl InstrumentProfile {
    pub const DEFAULT_NOTE_DURATION: f64 = 0.8;
    pub const DEFAULT_VOLUME: f64 = 0.8;
}

impl Default for InstrumentProfile {
    fn default() -> Self {
        Self {
            instrument_index: 0,
            cut_off_previous_notes: true,
            eq: EqSettings::default(),
            octave_offset: 0,
            reverb_level: 0.0,
            note_duration: Self::DEFAULT_NOTE_DURATION,
            volume_level: Self::DEFAULT_VOLUME,
            chorus_level: 0.0,
            delay_level: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let p = InstrumentProfile::default();
        assert!(p.cut_off_previous_notes);
        assert!(p.eq.is_flat());
        assert_eq!(p.note_duration, 0.8);
        assert_eq!(p.volume_level, 0.8);
        assert_eq!(p.chorus_level, 0.0);
    }
}
