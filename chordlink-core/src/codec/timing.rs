//! Timing segment: `{bpm-60}|{subdivision}|{swing}|{flags}`

use super::numeric::{pack_int, parse_base36, unpack_int};
use crate::types::timing::{BPM_MAX, BPM_MIN, SWING_MAX};
use crate::types::{Subdivision, Timing};

const FLAG_LIVE_MODE: i64 = 1;
const FLAG_SHOW_PATTERN: i64 = 2;

/// Subdivision digits. Kept as an explicit table: the codes name enum
/// variants, they are not a numeric range.
const SUBDIVISION_CODES: [(Subdivision, &str); 5] = [
    (Subdivision::ThirtySecond, "0"),
    (Subdivision::Sixteenth, "1"),
    (Subdivision::Eighth, "2"),
    (Subdivision::Quarter, "3"),
    (Subdivision::Half, "4"),
];

pub fn subdivision_code(subdivision: Subdivision) -> &'static str {
    SUBDIVISION_CODES
        .iter()
        .find(|(s, _)| *s == subdivision)
        .map(|(_, code)| *code)
        .unwrap_or("1")
}

/// Unknown or garbled digits read as 16th notes
pub fn subdivision_from_code(code: &str) -> Subdivision {
    SUBDIVISION_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(s, _)| *s)
        .unwrap_or_default()
}

pub fn encode_timing(timing: &Timing) -> String {
    let mut flags = 0;
    if timing.live_mode {
        flags |= FLAG_LIVE_MODE;
    }
    if timing.show_pattern {
        flags |= FLAG_SHOW_PATTERN;
    }

    format!(
        "{}|{}|{}|{}",
        pack_int(timing.bpm as i64, BPM_MIN as i64, BPM_MAX as i64),
        subdivision_code(timing.subdivision),
        pack_int(timing.swing as i64, 0, SWING_MAX as i64),
        pack_int(flags, 0, FLAG_LIVE_MODE | FLAG_SHOW_PATTERN),
    )
}

/// Read a timing segment; missing fields take their defaults
pub fn decode_timing(token: &str) -> Timing {
    let defaults = Timing::default();
    let parts: Vec<&str> = token.split('|').collect();
    let part = |i: usize| parts.get(i).copied();

    let bpm = unpack_int(
        part(0),
        BPM_MIN as i64,
        BPM_MAX as i64,
        defaults.bpm as i64,
    );
    let subdivision = match part(1) {
        Some(code) if !code.is_empty() => subdivision_from_code(code),
        _ => defaults.subdivision,
    };
    let swing = unpack_int(part(2), 0, SWING_MAX as i64, defaults.swing as i64);
    // A bitset: unknown bits are ignored, never clamped into known ones
    let flags = part(3).map(parse_base36).unwrap_or(0);

    Timing {
        bpm: bpm as u32,
        subdivision,
        swing: swing as u32,
        live_mode: flags & FLAG_LIVE_MODE as u64 != 0,
        show_pattern: flags & FLAG_SHOW_PATTERN as u64 != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_default_timing() {
        assert_eq!(encode_timing(&Timing::default()), "1o|1|0|0");
    }

    #[test]
    fn test_roundtrip_all_fields() {
        let timing = Timing {
            bpm: 173,
            subdivision: Subdivision::Half,
            swing: 37,
            live_mode: true,
            show_pattern: true,
        };
        let encoded = encode_timing(&timing);
        assert_eq!(encoded, "35|4|11|3");
        assert_eq!(decode_timing(&encoded), timing);
    }

    #[test]
    fn test_bpm_is_clamped() {
        let fast = Timing {
            bpm: 500,
            ..Timing::default()
        };
        assert_eq!(decode_timing(&encode_timing(&fast)).bpm, 200);

        let slow = Timing {
            bpm: 10,
            ..Timing::default()
        };
        assert_eq!(decode_timing(&encode_timing(&slow)).bpm, 60);
    }

    #[test]
    fn test_swing_is_clamped() {
        let timing = Timing {
            swing: 90,
            ..Timing::default()
        };
        assert_eq!(decode_timing(&encode_timing(&timing)).swing, 50);
    }

    #[test]
    fn test_garbled_subdivision_is_sixteenth() {
        assert_eq!(decode_timing("1o|9|0|0").subdivision, Subdivision::Sixteenth);
        assert_eq!(decode_timing("1o|zz|0|0").subdivision, Subdivision::Sixteenth);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        assert_eq!(decode_timing(""), Timing::default());
        let partial = decode_timing("0|3");
        assert_eq!(partial.bpm, 60);
        assert_eq!(partial.subdivision, Subdivision::Quarter);
        assert_eq!(partial.swing, 0);
        assert!(!partial.live_mode);
    }

    #[test]
    fn test_flag_bits() {
        let live_only = decode_timing("1o|1|0|1");
        assert!(live_only.live_mode && !live_only.show_pattern);
        let pattern_only = decode_timing("1o|1|0|2");
        assert!(!pattern_only.live_mode && pattern_only.show_pattern);
    }

    #[test]
    fn test_unknown_flag_bits_are_ignored() {
        let unknown = decode_timing("1o|1|0|4");
        assert!(!unknown.live_mode && !unknown.show_pattern);

        let mixed = decode_timing("1o|1|0|5");
        assert!(mixed.live_mode && !mixed.show_pattern);
    }
}
