//! Lookup tables the codec resolves indices against.
//!
//! Keys, modes, instruments and chords are never written into a link by
//! value; a link stores indices into these tables. The tables come from the
//! music-theory engine and the instrument list, so they are passed to every
//! encode/decode call instead of being looked up globally.

use super::chord::LibraryChord;

const BUILTIN_KEYS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb",
    "B",
];

const BUILTIN_MODES: [&str; 7] = [
    "Ionian",
    "Dorian",
    "Phrygian",
    "Lydian",
    "Mixolydian",
    "Aeolian",
    "Locrian",
];

const BUILTIN_INSTRUMENTS: [&str; 8] = [
    "electric_piano_1",
    "acoustic_grand_piano",
    "bright_acoustic_piano",
    "electric_grand_piano",
    "honkytonk_piano",
    "electric_piano_2",
    "harpsichord",
    "clavinet",
];

const BUILTIN_CHORDS: [(&str, &str); 7] = [
    ("C", "C, E, G"),
    ("Dm", "D, F, A"),
    ("Em", "E, G, B"),
    ("F", "F, A, C"),
    ("G", "G, B, D"),
    ("Am", "A, C, E"),
    ("Bdim", "B, D, F"),
];

/// Externally supplied tables every encode/decode call needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupContext {
    pub keys: Vec<String>,
    pub modes: Vec<String>,
    pub instruments: Vec<String>,
    /// Chords of the current key/mode, in library order
    pub chords: Vec<LibraryChord>,
}

impl LookupContext {
    pub fn new(
        keys: Vec<String>,
        modes: Vec<String>,
        instruments: Vec<String>,
        chords: Vec<LibraryChord>,
    ) -> Self {
        Self {
            keys,
            modes,
            instruments,
            chords,
        }
    }

    /// Default tables: 17 key spellings, the seven church modes, the
    /// default piano sounds and the diatonic triads of C Ionian
    pub fn builtin() -> Self {
        Self {
            keys: BUILTIN_KEYS.iter().map(|s| s.to_string()).collect(),
            modes: BUILTIN_MODES.iter().map(|s| s.to_string()).collect(),
            instruments: BUILTIN_INSTRUMENTS.iter().map(|s| s.to_string()).collect(),
            chords: BUILTIN_CHORDS
                .iter()
                .map(|(name, notes)| LibraryChord::new(*name, *notes))
                .collect(),
        }
    }

    /// Name of the first empty table, if any
    pub fn missing_table(&self) -> Option<&'static str> {
        if self.keys.is_empty() {
            Some("keys")
        } else if self.modes.is_empty() {
            Some("modes")
        } else if self.instruments.is_empty() {
            Some("instruments")
        } else if self.chords.is_empty() {
            Some("chords")
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_table().is_none()
    }

    /// Index of a key name; unknown names resolve to 0
    pub fn key_index(&self, name: &str) -> usize {
        position_or_zero(&self.keys, name)
    }

    pub fn mode_index(&self, name: &str) -> usize {
        position_or_zero(&self.modes, name)
    }

    pub fn instrument_index(&self, name: &str) -> usize {
        position_or_zero(&self.instruments, name)
    }

    pub fn key_name(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    pub fn mode_name(&self, index: usize) -> Option<&str> {
        self.modes.get(index).map(String::as_str)
    }

    pub fn instrument_name(&self, index: usize) -> Option<&str> {
        self.instruments.get(index).map(String::as_str)
    }
}

fn position_or_zero(table: &[String], name: &str) -> usize {
    table.iter().position(|entry| entry == name).unwrap_or(0)
}
