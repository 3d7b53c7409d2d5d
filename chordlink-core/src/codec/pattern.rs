//! Step pattern segment: `1.2.0.3+`
//!
//! Steps are joined with `.` so that two-character steps such as `2+`
//! survive. The two oldest schemas joined single characters with no
//! delimiter at all; [`StepJoin::Concatenated`] reads those.

use crate::types::{Pattern, StepToken};
use log::debug;

/// How the steps of a pattern segment are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepJoin {
    /// `1.2.0.3+` (v4 onward)
    Dotted,
    /// `1203` (v2, v3): one character per step
    Concatenated,
}

/// Write at most 16 steps, rests as `0`, joined by `.`
pub fn encode_pattern(steps: &[StepToken]) -> String {
    steps
        .iter()
        .take(Pattern::MAX_STEPS)
        .map(wire_step)
        .collect::<Vec<_>>()
        .join(".")
}

/// Read a dotted pattern segment
pub fn decode_pattern(token: &str) -> Pattern {
    decode_pattern_with(Some(token), StepJoin::Dotted)
}

/// Read a pattern segment. An empty or missing segment is the default
/// `1 2 3 4` pattern.
pub fn decode_pattern_with(token: Option<&str>, join: StepJoin) -> Pattern {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Pattern::default_arpeggio(),
    };

    let steps = match join {
        StepJoin::Dotted => token.split('.').map(StepToken::parse).collect(),
        StepJoin::Concatenated => token
            .chars()
            .map(|c| StepToken::parse(c.encode_utf8(&mut [0; 4])))
            .collect(),
    };
    Pattern::with_steps(steps)
}

fn wire_step(step: &StepToken) -> String {
    match step {
        StepToken::Literal(s)
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'+') =>
        {
            debug!("Writing unrepresentable step '{}' as a rest", s);
            "0".to_string()
        }
        other => other.wire_form(),
    }
}
