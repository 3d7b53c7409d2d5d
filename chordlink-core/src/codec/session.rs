//! Top-level token grammar.
//!
//! ```text
//! {tag}_{key}_{mode}_{pattern}_{timing}_{piano}_{chords}
//! ```
//!
//! `_` only ever appears as the segment delimiter: chord text escapes it and
//! no other segment uses it.

use super::chord::{
    decode_chord_list, decode_hashed_chord, decode_indexed_chord, decode_text_chord,
    encode_chord_list, ChordDecodeContext,
};
use super::error::CodecError;
use super::instrument::{decode_instrument, encode_instrument};
use super::numeric::{pack_index, unpack_index};
use super::pattern::{decode_pattern_with, encode_pattern};
use super::timing::{decode_timing, encode_timing};
use super::version::{ChordFormat, SchemaVersion};
use crate::types::{LookupContext, Provenance, SessionState};

const SEGMENT_DELIMITER: char = '_';
/// Tag plus key, mode, pattern, timing and piano; chords may be absent
const MIN_SEGMENTS: usize = 6;

pub const SEGMENT_LABELS: [&str; 7] = [
    "tag", "key", "mode", "pattern", "timing", "piano", "chords",
];

/// The raw segments of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub version: SchemaVersion,
    pub key: &'a str,
    pub mode: &'a str,
    pub pattern: &'a str,
    pub timing: &'a str,
    pub piano: &'a str,
    pub chords: &'a str,
}

/// Split a token and identify its schema
pub fn split_segments(token: &str) -> Result<Segments<'_>, CodecError> {
    let parts: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();

    let version = SchemaVersion::from_tag(parts[0])
        .ok_or_else(|| CodecError::UnknownVersion(parts[0].to_string()))?;
    if parts.len() < MIN_SEGMENTS {
        return Err(CodecError::TooFewSegments(parts.len()));
    }

    Ok(Segments {
        version,
        key: parts[1],
        mode: parts[2],
        pattern: parts[3],
        timing: parts[4],
        piano: parts[5],
        chords: parts.get(6).copied().unwrap_or(""),
    })
}

/// Write a session in the current schema
pub fn assemble(state: &SessionState, ctx: &LookupContext) -> String {
    let segments = [
        SchemaVersion::CURRENT.tag().to_string(),
        pack_index(state.key_index, ctx.keys.len()),
        pack_index(state.mode_index, ctx.modes.len()),
        encode_pattern(&state.pattern.steps),
        encode_timing(&state.timing),
        encode_instrument(&state.instrument, ctx.instruments.len()),
        encode_chord_list(&state.chords, &state.pattern),
    ];
    segments.join("_")
}

/// Decode split segments with the layout of their schema
pub fn disassemble(segments: &Segments, ctx: &LookupContext) -> SessionState {
    let layout = segments.version.layout();

    let key_index = unpack_index(Some(segments.key), ctx.keys.len());
    let mode_index = unpack_index(Some(segments.mode), ctx.modes.len());
    let pattern = decode_pattern_with(Some(segments.pattern), layout.step_join);
    let timing = decode_timing(segments.timing);
    let instrument = decode_instrument(
        segments.piano,
        ctx.instruments.len(),
        layout.effect_levels,
    );

    let chord_ctx = ChordDecodeContext {
        current: Provenance::new(key_index, mode_index),
        key_count: ctx.keys.len(),
        mode_count: ctx.modes.len(),
        global: &pattern,
        library: &ctx.chords,
    };
    let join = layout.step_join;
    let chords = match layout.chords {
        ChordFormat::NameHash => decode_chord_list(segments.chords, |e| {
            decode_hashed_chord(e, &chord_ctx, join)
        }),
        ChordFormat::LibraryIndex => decode_chord_list(segments.chords, |e| {
            decode_indexed_chord(e, &chord_ctx, join)
        }),
        ChordFormat::Text => {
            decode_chord_list(segments.chords, |e| decode_text_chord(e, &chord_ctx, false))
        }
        ChordFormat::TextWithProvenance => {
            decode_chord_list(segments.chords, |e| decode_text_chord(e, &chord_ctx, true))
        }
    };

    SessionState {
        key_index,
        mode_index,
        pattern,
        timing,
        instrument,
        chords,
    }
}

/// A token broken into labelled segments, for display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenInspection {
    pub version: Option<SchemaVersion>,
    pub segments: Vec<(String, String)>,
    pub chord_entries: Vec<String>,
}

/// Label the segments of a token without decoding them. Works on any
/// input, including tokens the decoder would reject.
pub fn inspect_token(token: &str) -> TokenInspection {
    let parts: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();

    let segments = parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let label = SEGMENT_LABELS.get(i).copied().unwrap_or("extra");
            (label.to_string(), part.to_string())
        })
        .collect();

    let chord_entries = parts
        .get(6)
        .map(|chords| {
            chords
                .split('|')
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    TokenInspection {
        version: SchemaVersion::from_tag(parts[0]),
        segments,
        chord_entries,
    }
}
