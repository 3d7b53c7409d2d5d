//! Composed chord entries and the library chords they come from.
//!
//! A chord entry's `name` and `notes` are opaque text. Spellings with
//! accidentals and slash basses (`Cmaj7/E` played as `E3, C4, E4, G4, B4`)
//! are kept exactly as composed and never re-derived from a note alphabet.

use super::step::{Pattern, StepToken};

/// Key and mode a chord entry was originally composed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Provenance {
    pub original_key_index: usize,
    pub original_mode_index: usize,
}

impl Provenance {
    pub fn new(original_key_index: usize, original_mode_index: usize) -> Self {
        Self {
            original_key_index,
            original_mode_index,
        }
    }
}

/// One chord of the scale as reported by the music-theory engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LibraryChord {
    pub name: String,
    pub notes: String,
}

impl LibraryChord {
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
        }
    }
}

/// A chord the user added to the session
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordEntry {
    /// Display name, e.g. `"Cmaj7/E"`
    pub name: String,
    /// Comma-separated note names; a slash chord lists its bass note first
    pub notes: String,
    /// `None` means the chord follows the session's global pattern
    pub pattern_override: Option<Pattern>,
    pub provenance: Option<Provenance>,
}

impl ChordEntry {
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            pattern_override: None,
            provenance: None,
        }
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern_override = Some(pattern);
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Steps this chord actually plays, given the session's global pattern
    pub fn effective_pattern<'a>(&'a self, global: &'a Pattern) -> &'a [StepToken] {
        match &self.pattern_override {
            Some(p) => &p.steps,
            None => &global.steps,
        }
    }

    /// Key/mode to re-resolve this chord against, falling back to the
    /// session's current key/mode when no provenance was recorded
    pub fn origin(&self, current_key_index: usize, current_mode_index: usize) -> Provenance {
        self.provenance
            .unwrap_or_else(|| Provenance::new(current_key_index, current_mode_index))
    }

    /// Individual note names from the notes text
    pub fn note_names(&self) -> Vec<&str> {
        self.notes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Slash chords name their bass after the last `/`, e.g. `Cmaj7/E`.
    /// A slash that belongs to the chord type (`Cm/Maj7`) does not count.
    pub fn bass_note(&self) -> Option<&str> {
        let (_, bass) = self.name.rsplit_once('/')?;
        if is_note_name(bass) {
            Some(bass)
        } else {
            None
        }
    }

    pub fn is_slash_chord(&self) -> bool {
        self.bass_note().is_some()
    }
}

impl From<&LibraryChord> for ChordEntry {
    fn from(chord: &LibraryChord) -> Self {
        ChordEntry::new(chord.name.clone(), chord.notes.clone())
    }
}

/// `A`-`G` followed by at most two matching accidentals
fn is_note_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('A'..='G') => {}
        _ => return false,
    }
    let accidentals = chars.as_str();
    matches!(accidentals, "" | "#" | "##" | "b" | "bb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_chord_bass() {
        let chord = ChordEntry::new("Cmaj7/E", "E3, C4, E4, G4, B4");
        assert_eq!(chord.bass_note(), Some("E"));
        assert!(chord.is_slash_chord());
        assert_eq!(chord.note_names()[0], "E3");
    }

    #[test]
    fn test_slash_inside_chord_type_is_not_bass() {
        let chord = ChordEntry::new("Cm/Maj7", "C, Eb, G, B");
        assert_eq!(chord.bass_note(), None);

        let flat_bass = ChordEntry::new("Ab/Gb", "Gb, Ab, C, Eb");
        assert_eq!(flat_bass.bass_note(), Some("Gb"));
    }

    #[test]
    fn test_effective_pattern_inherits_global() {
        let global = Pattern::default_arpeggio();
        let plain = ChordEntry::new("C", "C, E, G");
        assert_eq!(plain.effective_pattern(&global), global.steps.as_slice());

        let custom = Pattern::with_steps(vec![StepToken::note(1), StepToken::Rest]);
        let chord = plain.with_pattern(custom.clone());
        assert_eq!(chord.effective_pattern(&global), custom.steps.as_slice());
    }

    #[test]
    fn test_from_library_chord_has_no_extras() {
        let entry = ChordEntry::from(&LibraryChord::new("G7/B", "B, G, D, F"));
        assert_eq!(entry, ChordEntry::new("G7/B", "B, G, D, F"));
        assert_eq!(entry.bass_note(), Some("B"));
    }

    #[test]
    fn test_origin_falls_back_to_current() {
        let chord = ChordEntry::new("Dm", "D, F, A");
        assert_eq!(chord.origin(3, 1), Provenance::new(3, 1));

        let chord = chord.with_provenance(Provenance::new(0, 5));
        assert_eq!(chord.origin(3, 1), Provenance::new(0, 5));
    }
}
