//! The root value a share link round-trips.

use super::chord::ChordEntry;
use super::instrument::InstrumentProfile;
use super::step::Pattern;
use super::timing::Timing;

/// Complete editing session.
///
/// Built fresh from the live session whenever it changes, encoded, and
/// thrown away. On load a decoded value seeds the live session once.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub key_index: usize,
    pub mode_index: usize,
    pub pattern: Pattern,
    pub timing: Timing,
    pub instrument: InstrumentProfile,
    pub chords: Vec<ChordEntry>,
}

impl SessionState {
    pub fn new(key_index: usize, mode_index: usize) -> Self {
        Self {
            key_index,
            mode_index,
            ..Self::default()
        }
    }

    pub fn with_chord(mut self, chord: ChordEntry) -> Self {
        self.chords.push(chord);
        self
    }

    /// Drop pattern overrides that merely repeat the global pattern.
    ///
    /// A link never stores such overrides, so this is the form a decoded
    /// session comes back in.
    pub fn normalized(mut self) -> Self {
        for chord in &mut self.chords {
            if chord.pattern_override.as_ref() == Some(&self.pattern) {
                chord.pattern_override = None;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StepToken;

    #[test]
    fn test_normalized_drops_redundant_overrides() {
        let custom = Pattern::with_steps(vec![StepToken::note(2), StepToken::Rest]);
        let state = SessionState::new(0, 0)
            .with_chord(ChordEntry::new("C", "C, E, G").with_pattern(Pattern::default()))
            .with_chord(ChordEntry::new("F", "F, A, C").with_pattern(custom.clone()))
            .normalized();

        assert_eq!(state.chords[0].pattern_override, None);
        assert_eq!(state.chords[1].pattern_override, Some(custom));
    }
}
