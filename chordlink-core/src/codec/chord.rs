//! Chord entries segment.
//!
//! Current form of one entry:
//!
//! ```text
//! {name}~{notes}[@{origKey}{origMode}][:{pattern}]
//! ```
//!
//! `name` and `notes` are percent-encoded text. The provenance suffix is
//! positional: exactly one base-36 character for the key and one for the
//! mode. The pattern suffix only appears when the chord's pattern differs
//! from the global one. Entries are joined with `|`.
//!
//! Older schemas referenced library chords instead of carrying text: v3/v4
//! by index into the current chord list, v2 by a truncated name hash.

use super::error::CodecError;
use super::numeric::{parse_base36, to_base36};
use super::pattern::{decode_pattern_with, encode_pattern, StepJoin};
use super::text::{decode_text, encode_text};
use crate::types::{ChordEntry, LibraryChord, Pattern, Provenance};
use log::{debug, warn};

/// Length of the legacy v2 chord-name hash
const LEGACY_HASH_LEN: usize = 8;
/// Largest index a single base-36 character can hold
const MAX_ORIGIN_INDEX: usize = 35;

/// What a chord entry is decoded against
#[derive(Debug, Clone, Copy)]
pub struct ChordDecodeContext<'a> {
    /// Key/mode of the session being decoded
    pub current: Provenance,
    pub key_count: usize,
    pub mode_count: usize,
    /// The session's already-decoded global pattern
    pub global: &'a Pattern,
    /// Chords of the current key/mode
    pub library: &'a [LibraryChord],
}

/// Write one chord entry in the current form
pub fn encode_chord(entry: &ChordEntry, global: &Pattern) -> String {
    let mut token = format!("{}~{}", encode_text(&entry.name), encode_text(&entry.notes));

    if let Some(origin) = entry.provenance {
        if origin.original_key_index <= MAX_ORIGIN_INDEX
            && origin.original_mode_index <= MAX_ORIGIN_INDEX
        {
            token.push('@');
            token.push_str(&to_base36(origin.original_key_index as u64));
            token.push_str(&to_base36(origin.original_mode_index as u64));
        } else {
            debug!(
                "Dropping provenance of '{}': index does not fit one character",
                entry.name
            );
        }
    }

    if let Some(pattern) = &entry.pattern_override {
        let own = encode_pattern(&pattern.steps);
        if !own.is_empty() && own != encode_pattern(&global.steps) {
            token.push(':');
            token.push_str(&own);
        }
    }

    token
}

pub fn encode_chord_list(chords: &[ChordEntry], global: &Pattern) -> String {
    chords
        .iter()
        .map(|c| encode_chord(c, global))
        .collect::<Vec<_>>()
        .join("|")
}

/// Decode a v7 entry (text identity, optional provenance)
pub fn decode_chord(token: &str, ctx: &ChordDecodeContext) -> Result<ChordEntry, CodecError> {
    decode_text_chord(token, ctx, true)
}

/// Decode a v5-v7 entry. Without `with_provenance` (v5, v6) the chord is
/// attributed to the current key/mode.
pub fn decode_text_chord(
    token: &str,
    ctx: &ChordDecodeContext,
    with_provenance: bool,
) -> Result<ChordEntry, CodecError> {
    let (id, pattern) = split_pattern(token);

    let (data, provenance) = if with_provenance {
        match id.split_once('@') {
            Some((data, origin)) => (data, parse_origin(origin, ctx)),
            None => (id, None),
        }
    } else {
        (id, Some(ctx.current))
    };

    let (name, notes) = data
        .split_once('~')
        .ok_or_else(|| CodecError::MissingSeparator(token.to_string()))?;
    if name.is_empty() || notes.is_empty() {
        return Err(CodecError::EmptyChordText(token.to_string()));
    }

    Ok(ChordEntry {
        name: decode_text(name),
        notes: decode_text(notes),
        pattern_override: override_pattern(pattern, StepJoin::Dotted, ctx.global),
        provenance,
    })
}

/// Decode a v3/v4 entry: `{libraryIndex}[:{pattern}]`
pub fn decode_indexed_chord(
    token: &str,
    ctx: &ChordDecodeContext,
    join: StepJoin,
) -> Result<ChordEntry, CodecError> {
    let (id, pattern) = split_pattern(token);
    let index = parse_base36(id);

    let chord = usize::try_from(index)
        .ok()
        .and_then(|i| ctx.library.get(i))
        .ok_or_else(|| CodecError::UnknownLibraryChord(token.to_string()))?;

    Ok(library_entry(chord, pattern, join, ctx))
}

/// Decode a v2 entry: `{nameHash}[:{pattern}]`.
///
/// The hash is matched against the *current* chord list, so two chords that
/// share a hash resolve to whichever comes first.
pub fn decode_hashed_chord(
    token: &str,
    ctx: &ChordDecodeContext,
    join: StepJoin,
) -> Result<ChordEntry, CodecError> {
    let (id, pattern) = split_pattern(token);

    let chord = ctx
        .library
        .iter()
        .find(|c| !c.name.is_empty() && legacy_name_hash(&c.name) == id)
        .ok_or_else(|| CodecError::UnknownLibraryChord(token.to_string()))?;

    Ok(library_entry(chord, pattern, join, ctx))
}

/// v2 chord reference: ASCII letters and digits of the name, first 8 kept
pub fn legacy_name_hash(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(LEGACY_HASH_LEN)
        .collect()
}

/// Decode every entry of a chords segment. Entries that fail are logged and
/// skipped; the rest of the list still decodes.
pub fn decode_chord_list<F>(segment: &str, mut decode_entry: F) -> Vec<ChordEntry>
where
    F: FnMut(&str) -> Result<ChordEntry, CodecError>,
{
    segment
        .split('|')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match decode_entry(entry) {
            Ok(chord) => Some(chord),
            Err(e) => {
                warn!("Skipping chord entry: {}", e);
                None
            }
        })
        .collect()
}

fn split_pattern(token: &str) -> (&str, Option<&str>) {
    match token.split_once(':') {
        Some((id, pattern)) => (id, Some(pattern)),
        None => (token, None),
    }
}

/// An explicit pattern equal to the global one means "inherit"
fn override_pattern(token: Option<&str>, join: StepJoin, global: &Pattern) -> Option<Pattern> {
    match token {
        Some(t) if !t.is_empty() => {
            let pattern = decode_pattern_with(Some(t), join);
            (pattern != *global).then_some(pattern)
        }
        _ => None,
    }
}

fn parse_origin(origin: &str, ctx: &ChordDecodeContext) -> Option<Provenance> {
    let mut chars = origin.chars();
    let (key, mode) = match (chars.next(), chars.next()) {
        (Some(k), Some(m)) => (k, m),
        _ => {
            debug!("Ignoring truncated provenance '@{}'", origin);
            return None;
        }
    };

    let resolve = |c: char, count: usize, fallback: usize| match c.to_digit(36) {
        Some(i) if (i as usize) < count => i as usize,
        _ => fallback,
    };

    Some(Provenance::new(
        resolve(key, ctx.key_count, ctx.current.original_key_index),
        resolve(mode, ctx.mode_count, ctx.current.original_mode_index),
    ))
}

fn library_entry(
    chord: &LibraryChord,
    pattern: Option<&str>,
    join: StepJoin,
    ctx: &ChordDecodeContext,
) -> ChordEntry {
    ChordEntry {
        pattern_override: override_pattern(pattern, join, ctx.global),
        provenance: Some(ctx.current),
        ..ChordEntry::from(chord)
    }
}
