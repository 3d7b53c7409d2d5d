//! Tempo and step-clock settings for a session.

/// Slowest tempo a session can carry
pub const BPM_MIN: u32 = 60;
/// Fastest tempo a session can carry
pub const BPM_MAX: u32 = 200;
/// Largest swing percentage
pub const SWING_MAX: u32 = 50;

/// Length of one pattern step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subdivision {
    ThirtySecond,
    #[default]
    Sixteenth,
    Eighth,
    Quarter,
    Half,
}

impl Subdivision {
    pub const ALL: [Subdivision; 5] = [
        Subdivision::ThirtySecond,
        Subdivision::Sixteenth,
        Subdivision::Eighth,
        Subdivision::Quarter,
        Subdivision::Half,
    ];

    /// Step length in beats (quarter note = 1.0)
    pub fn beats(&self) -> f64 {
        match self {
            Subdivision::ThirtySecond => 0.125,
            Subdivision::Sixteenth => 0.25,
            Subdivision::Eighth => 0.5,
            Subdivision::Quarter => 1.0,
            Subdivision::Half => 2.0,
        }
    }

    /// Map a step length in beats back to a subdivision.
    /// Lengths that are not one of the five known values fall back to 16ths.
    pub fn from_beats(beats: f64) -> Subdivision {
        Self::ALL
            .into_iter()
            .find(|s| (s.beats() - beats).abs() < 1e-9)
            .unwrap_or_default()
    }

    /// Parse a subdivision name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Subdivision> {
        match s.to_lowercase().as_str() {
            "32nd" | "1/32" => Some(Subdivision::ThirtySecond),
            "16th" | "1/16" => Some(Subdivision::Sixteenth),
            "8th" | "1/8" => Some(Subdivision::Eighth),
            "quarter" | "1/4" => Some(Subdivision::Quarter),
            "half" | "1/2" => Some(Subdivision::Half),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Subdivision::ThirtySecond => "32nd",
            Subdivision::Sixteenth => "16th",
            Subdivision::Eighth => "8th",
            Subdivision::Quarter => "quarter",
            Subdivision::Half => "half",
        }
    }
}

/// Tempo, step length, swing and the two view flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    pub bpm: u32,
    pub subdivision: Subdivision,
    /// Swing amount in percent (0-50)
    pub swing: u32,
    pub live_mode: bool,
    pub show_pattern: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            bpm: 120,
            subdivision: Subdivision::Sixteenth,
            swing: 0,
            live_mode: false,
            show_pattern: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivision_beats_roundtrip() {
        for sub in Subdivision::ALL {
            assert_eq!(Subdivision::from_beats(sub.beats()), sub);
        }
    }

    #[test]
    fn test_unknown_beats_default_to_sixteenth() {
        assert_eq!(Subdivision::from_beats(0.3), Subdivision::Sixteenth);
        assert_eq!(Subdivision::from_beats(f64::NAN), Subdivision::Sixteenth);
    }

    #[test]
    fn test_subdivision_names() {
        assert_eq!(Subdivision::from_name("8TH"), Some(Subdivision::Eighth));
        assert_eq!(Subdivision::from_name("1/32"), Some(Subdivision::ThirtySecond));
        assert_eq!(Subdivision::from_name("triplet"), None);
        assert_eq!(Subdivision::Quarter.name(), "quarter");
    }

    #[test]
    fn test_default_timing() {
        let t = Timing::default();
        assert_eq!(t.bpm, 120);
        assert_eq!(t.subdivision, Subdivision::Sixteenth);
        assert!(!t.live_mode && !t.show_pattern);
    }
}
