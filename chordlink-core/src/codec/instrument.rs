//! Instrument profile segment (the "piano" block).
//!
//! Field order is fixed:
//!
//! ```text
//! inst|cutoff|eqBass|eqMid|eqTreble|octave|reverb|duration|volume|chorus|delay
//! ```
//!
//! The last three fields were added in v6. Older tokens stop after
//! `duration` and those fields take their defaults.

use super::numeric::{pack_index, pack_int, unpack_index, unpack_int, Quantizer};
use crate::types::{EqSettings, InstrumentProfile};

const OCTAVE_MIN: i64 = -3;
const OCTAVE_MAX: i64 = 3;

/// Write all eleven fields
pub fn encode_instrument(profile: &InstrumentProfile, instrument_count: usize) -> String {
    let fields = [
        pack_index(profile.instrument_index, instrument_count),
        if profile.cut_off_previous_notes { "1" } else { "0" }.to_string(),
        Quantizer::EQ_DB.pack(profile.eq.bass),
        Quantizer::EQ_DB.pack(profile.eq.mid),
        Quantizer::EQ_DB.pack(profile.eq.treble),
        pack_int(profile.octave_offset as i64, OCTAVE_MIN, OCTAVE_MAX),
        Quantizer::LEVEL.pack(profile.reverb_level),
        Quantizer::DURATION.pack(profile.note_duration),
        Quantizer::LEVEL.pack(profile.volume_level),
        Quantizer::LEVEL.pack(profile.chorus_level),
        Quantizer::LEVEL.pack(profile.delay_level),
    ];
    fields.join("|")
}

/// Read an instrument segment. `with_effect_levels` selects whether the
/// trailing volume/chorus/delay fields exist in this schema.
pub fn decode_instrument(
    token: &str,
    instrument_count: usize,
    with_effect_levels: bool,
) -> InstrumentProfile {
    let defaults = InstrumentProfile::default();
    let parts: Vec<&str> = token.split('|').collect();
    let part = |i: usize| parts.get(i).copied();

    let cut_off_previous_notes = match part(1) {
        None | Some("") => defaults.cut_off_previous_notes,
        Some(flag) => flag == "1",
    };

    let mut profile = InstrumentProfile {
        instrument_index: unpack_index(part(0), instrument_count),
        cut_off_previous_notes,
        eq: EqSettings {
            bass: Quantizer::EQ_DB.unpack(part(2), defaults.eq.bass),
            mid: Quantizer::EQ_DB.unpack(part(3), defaults.eq.mid),
            treble: Quantizer::EQ_DB.unpack(part(4), defaults.eq.treble),
        },
        octave_offset: unpack_int(part(5), OCTAVE_MIN, OCTAVE_MAX, 0) as i32,
        reverb_level: Quantizer::LEVEL.unpack(part(6), defaults.reverb_level),
        note_duration: Quantizer::DURATION.unpack(part(7), defaults.note_duration),
        ..defaults
    };

    if with_effect_levels {
        profile.volume_level = Quantizer::LEVEL.unpack(part(8), defaults.volume_level);
        profile.chorus_level = Quantizer::LEVEL.unpack(part(9), defaults.chorus_level);
        profile.delay_level = Quantizer::LEVEL.unpack(part(10), defaults.delay_level);
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTRUMENTS: usize = 8;

    fn close(a: f64, b: f64, width: f64) -> bool {
        (a - b).abs() <= width
    }

    #[test]
    fn test_encode_defaults() {
        let encoded = encode_instrument(&InstrumentProfile::default(), INSTRUMENTS);
        assert_eq!(encoded, "0|1|o|o|o|3|0|7|s|0|0");
    }

    #[test]
    fn test_roundtrip_within_buckets() {
        let profile = InstrumentProfile {
            instrument_index: 5,
            cut_off_previous_notes: false,
            eq: EqSettings::new(-12.0, 3.0, 24.0),
            octave_offset: -2,
            reverb_level: 0.42,
            note_duration: 0.35,
            volume_level: 0.66,
            chorus_level: 0.1,
            delay_level: 1.0,
        };
        let decoded = decode_instrument(
            &encode_instrument(&profile, INSTRUMENTS),
            INSTRUMENTS,
            true,
        );

        assert_eq!(decoded.instrument_index, 5);
        assert!(!decoded.cut_off_previous_notes);
        assert_eq!(decoded.eq, profile.eq);
        assert_eq!(decoded.octave_offset, -2);
        let level = Quantizer::LEVEL.bucket_width();
        assert!(close(decoded.reverb_level, 0.42, level));
        assert!(close(decoded.volume_level, 0.66, level));
        assert!(close(decoded.chorus_level, 0.1, level));
        assert!(close(decoded.delay_level, 1.0, level));
        assert!(close(
            decoded.note_duration,
            0.35,
            Quantizer::DURATION.bucket_width()
        ));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let profile = InstrumentProfile {
            instrument_index: 99,
            eq: EqSettings::new(-80.0, 0.0, 80.0),
            octave_offset: 9,
            note_duration: 3.0,
            ..InstrumentProfile::default()
        };
        let decoded = decode_instrument(
            &encode_instrument(&profile, INSTRUMENTS),
            INSTRUMENTS,
            true,
        );
        assert_eq!(decoded.instrument_index, 0);
        assert_eq!(decoded.eq, EqSettings::new(-24.0, 0.0, 24.0));
        assert_eq!(decoded.octave_offset, 3);
        assert_eq!(decoded.note_duration, 1.0);
    }

    #[test]
    fn test_legacy_segment_uses_effect_defaults() {
        // v5 token: eight fields only
        let decoded = decode_instrument("2|0|o|o|o|4|a|3", INSTRUMENTS, false);
        assert_eq!(decoded.instrument_index, 2);
        assert_eq!(decoded.octave_offset, 1);
        assert_eq!(decoded.volume_level, 0.8);
        assert_eq!(decoded.chorus_level, 0.0);
        assert_eq!(decoded.delay_level, 0.0);
    }

    #[test]
    fn test_legacy_schema_ignores_trailing_fields() {
        let decoded = decode_instrument("0|1|o|o|o|3|0|7|z|z|z", INSTRUMENTS, false);
        assert_eq!(decoded.volume_level, 0.8);
        assert_eq!(decoded.delay_level, 0.0);
    }

    #[test]
    fn test_empty_segment_is_default_profile() {
        assert_eq!(
            decode_instrument("", INSTRUMENTS, true),
            InstrumentProfile::default()
        );
    }

    #[test]
    fn test_instrument_past_table_end_reads_as_zero() {
        assert_eq!(decode_instrument("z", INSTRUMENTS, true).instrument_index, 0);
    }
}
