//! Rhythmic step tokens and the step pattern they form.
//!
//! A pattern is a short sequence of steps that arpeggiates the notes of the
//! chord being played: `1 2 3 4` plays the chord's first four notes in turn,
//! `x` rests, and a trailing `+` lifts the note an octave (`3+`).

use anyhow::{anyhow, Result};
use std::fmt;

/// Highest note index accepted by the human pattern notation.
pub const MAX_NOTE_INDEX: u8 = 8;

/// A single step in a rhythm pattern
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", from = "String")
)]
pub enum StepToken {
    /// Silence: `x`, `X` or `0`
    Rest,
    /// The Nth note of the chord (1-based), optionally one octave up
    Note { index: u8, octave_up: bool },
    /// Anything else, kept verbatim for the sequencer to interpret
    Literal(String),
}

impl StepToken {
    /// Create a note step
    pub fn note(index: u8) -> Self {
        StepToken::Note {
            index,
            octave_up: false,
        }
    }

    /// Create a note step lifted one octave
    pub fn note_up(index: u8) -> Self {
        StepToken::Note {
            index,
            octave_up: true,
        }
    }

    /// Read one token. Never fails: unknown text becomes a `Literal`.
    ///
    /// Indices are not range-checked here; that is the sequencer's job.
    pub fn parse(token: &str) -> Self {
        if token == "0" || token.eq_ignore_ascii_case("x") {
            return StepToken::Rest;
        }

        let (digits, octave_up) = match token.strip_suffix('+') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = digits.parse::<u8>() {
                return StepToken::Note { index, octave_up };
            }
        }

        StepToken::Literal(token.to_string())
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, StepToken::Rest)
    }

    /// Form used on the wire: rests become `0`, everything else is unchanged.
    pub fn wire_form(&self) -> String {
        match self {
            StepToken::Rest => "0".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for StepToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepToken::Rest => write!(f, "x"),
            StepToken::Note {
                index,
                octave_up: false,
            } => write!(f, "{}", index),
            StepToken::Note {
                index,
                octave_up: true,
            } => write!(f, "{}+", index),
            StepToken::Literal(s) => write!(f, "{}", s),
        }
    }
}

impl From<StepToken> for String {
    fn from(step: StepToken) -> Self {
        step.to_string()
    }
}

impl From<String> for StepToken {
    fn from(s: String) -> Self {
        StepToken::parse(&s)
    }
}

/// An ordered step pattern
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Pattern {
    pub steps: Vec<StepToken>,
}

impl Pattern {
    /// Longest pattern a share link carries
    pub const MAX_STEPS: usize = 16;

    pub fn with_steps(steps: Vec<StepToken>) -> Self {
        Self { steps }
    }

    /// The ascending `1 2 3 4` pattern used when nothing else is known
    pub fn default_arpeggio() -> Self {
        Self::with_steps((1..=4).map(StepToken::note).collect())
    }

    /// Parse human pattern notation, e.g. `"1 2 x 3+"` or `"1,2,x,3+"`.
    ///
    /// Unlike the wire decoder this is strict: every step must be a rest or
    /// a note index in `1..=8`, and at most 16 steps are allowed.
    pub fn parse(notation: &str) -> Result<Self> {
        let mut steps = Vec::new();

        for raw in notation
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
        {
            let step = StepToken::parse(raw);
            match &step {
                StepToken::Rest => {}
                StepToken::Note { index, .. } if (1..=MAX_NOTE_INDEX).contains(index) => {}
                StepToken::Note { index, .. } => {
                    return Err(anyhow!(
                        "Note index {} out of range (1-{})",
                        index,
                        MAX_NOTE_INDEX
                    ));
                }
                StepToken::Literal(s) => {
                    return Err(anyhow!("Unexpected step in pattern: '{}'", s));
                }
            }
            steps.push(step);
        }

        if steps.is_empty() {
            return Err(anyhow!("Pattern cannot be empty"));
        }
        if steps.len() > Self::MAX_STEPS {
            return Err(anyhow!(
                "Pattern has {} steps, at most {} are allowed",
                steps.len(),
                Self::MAX_STEPS
            ));
        }

        Ok(Self::with_steps(steps))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepToken> {
        self.steps.iter()
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::default_arpeggio()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl From<Vec<StepToken>> for Pattern {
    fn from(steps: Vec<StepToken>) -> Self {
        Self::with_steps(steps)
    }
}
