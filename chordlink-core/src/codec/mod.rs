//! Versioned state codec.
//!
//! Turns a [`SessionState`] into a single URL-safe token and back. Encoding
//! always writes the current schema (`v7`); decoding also reads `v2`-`v6`.
//!
//! Neither direction ever panics on bad input. Structural problems with the
//! whole token mean "no state"; a bad chord entry is skipped; out-of-range
//! numbers are clamped.

pub mod chord;
pub mod error;
pub mod instrument;
pub mod numeric;
pub mod pattern;
pub mod session;
pub mod text;
pub mod timing;
pub mod version;

pub use error::CodecError;
pub use session::{inspect_token, TokenInspection};
pub use version::SchemaVersion;

use crate::types::{LookupContext, SessionState};
use log::{debug, warn};

/// Encode a session, reporting why encoding was refused
pub fn try_encode_state(state: &SessionState, ctx: &LookupContext) -> Result<String, CodecError> {
    if let Some(table) = ctx.missing_table() {
        return Err(CodecError::TablesUnavailable(table));
    }
    let token = session::assemble(state, ctx);
    debug!("Encoded state: {}", token);
    Ok(token)
}

/// Encode a session.
///
/// Returns an empty string when a lookup table is not loaded yet. Callers
/// must treat the empty string as "do not overwrite the stored link".
pub fn encode_state(state: &SessionState, ctx: &LookupContext) -> String {
    try_encode_state(state, ctx).unwrap_or_else(|e| {
        debug!("Skipping encode: {}", e);
        String::new()
    })
}

/// Decode a token, reporting why it was rejected
pub fn try_decode_state(token: &str, ctx: &LookupContext) -> Result<SessionState, CodecError> {
    if token.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    if let Some(table) = ctx.missing_table() {
        return Err(CodecError::TablesUnavailable(table));
    }

    let segments = session::split_segments(token)?;
    debug!("Decoding {} token", segments.version);
    Ok(session::disassemble(&segments, ctx))
}

/// Decode a token. `None` means "no state": keep whatever the session
/// already has.
pub fn decode_state(token: &str, ctx: &LookupContext) -> Option<SessionState> {
    match try_decode_state(token, ctx) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!("Ignoring state token: {}", e);
            None
        }
    }
}

/// Re-encode any readable token in the current schema.
/// Returns `None` when the token cannot be decoded or re-encoded.
pub fn upgrade_token(token: &str, ctx: &LookupContext) -> Option<String> {
    let state = decode_state(token, ctx)?;
    let upgraded = encode_state(&state, ctx);
    (!upgraded.is_empty()).then_some(upgraded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ChordEntry, EqSettings, InstrumentProfile, Pattern, Provenance, StepToken, Subdivision,
        Timing,
    };

    fn sample_state() -> SessionState {
        SessionState {
            key_index: 7,
            mode_index: 5,
            pattern: Pattern::with_steps(vec![
                StepToken::note(1),
                StepToken::note(3),
                StepToken::Rest,
                StepToken::note_up(2),
            ]),
            timing: Timing {
                bpm: 96,
                subdivision: Subdivision::Eighth,
                swing: 12,
                live_mode: true,
                show_pattern: false,
            },
            instrument: InstrumentProfile {
                instrument_index: 3,
                cut_off_previous_notes: false,
                eq: EqSettings::new(4.0, -2.0, 0.0),
                octave_offset: 1,
                ..InstrumentProfile::default()
            },
            chords: vec![
                ChordEntry::new("Am", "A, C, E").with_provenance(Provenance::new(7, 5)),
                ChordEntry::new("Cmaj7/E", "E3, C4, E4, G4, B4")
                    .with_pattern(Pattern::with_steps(vec![StepToken::note(1); 3])),
                ChordEntry::new("F", "F, A, C"),
            ],
        }
    }

    #[test]
    fn test_roundtrip_exact_fields() {
        let ctx = LookupContext::builtin();
        let state = sample_state();
        let decoded = decode_state(&encode_state(&state, &ctx), &ctx).unwrap();

        assert_eq!(decoded.key_index, state.key_index);
        assert_eq!(decoded.mode_index, state.mode_index);
        assert_eq!(decoded.pattern, state.pattern);
        assert_eq!(decoded.timing, state.timing);
        assert_eq!(decoded.chords, state.chords);
        assert_eq!(decoded.instrument.eq, state.instrument.eq);
        assert_eq!(decoded.instrument.octave_offset, 1);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let ctx = LookupContext::builtin();
        let state = sample_state();
        assert_eq!(encode_state(&state, &ctx), encode_state(&state, &ctx));
    }

    #[test]
    fn test_missing_tables_give_sentinel_and_no_state() {
        let mut ctx = LookupContext::builtin();
        let token = encode_state(&SessionState::default(), &ctx);
        ctx.chords.clear();

        assert_eq!(encode_state(&SessionState::default(), &ctx), "");
        assert_eq!(
            try_encode_state(&SessionState::default(), &ctx),
            Err(CodecError::TablesUnavailable("chords"))
        );
        assert!(decode_state(&token, &ctx).is_none());
    }

    #[test]
    fn test_malformed_input_is_no_state() {
        let ctx = LookupContext::builtin();
        assert!(decode_state("", &ctx).is_none());
        assert!(decode_state("garbage", &ctx).is_none());
        assert!(decode_state("v7_", &ctx).is_none());
        assert!(decode_state("v8_0_0_1_1o_0_", &ctx).is_none());
    }

    #[test]
    fn test_upgrade_legacy_token() {
        let ctx = LookupContext::builtin();
        let upgraded = upgrade_token("v4_0_0_1.2_1o|1|0|0_0|1|o|o|o|3|0|7_1", &ctx).unwrap();
        assert!(upgraded.starts_with("v7_0_0_1.2_"));
        assert!(upgraded.ends_with("_Dm~D%2C%20F%2C%20A@00"));
        assert!(upgrade_token("nope", &ctx).is_none());
    }
}
