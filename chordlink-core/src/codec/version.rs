//! Schema versions and what differs between them.
//!
//! All versions share the key, mode and timing segments. They differ in
//! exactly three places:
//!
//! | tag | pattern join | effect levels | chord entries                 |
//! |-----|--------------|---------------|-------------------------------|
//! | v2  | none         | no            | 8-char name hash              |
//! | v3  | none         | no            | library index                 |
//! | v4  | `.`          | no            | library index                 |
//! | v5  | `.`          | no            | `name~notes`                  |
//! | v6  | `.`          | yes           | `name~notes`                  |
//! | v7  | `.`          | yes           | `name~notes` + `@` provenance |

use super::pattern::StepJoin;
use std::fmt;

/// A schema revision of the link format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchemaVersion {
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
}

/// How a schema refers to chord entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordFormat {
    NameHash,
    LibraryIndex,
    Text,
    TextWithProvenance,
}

/// Per-version decoding choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub step_join: StepJoin,
    pub effect_levels: bool,
    pub chords: ChordFormat,
}

impl SchemaVersion {
    /// The version every new link is written in
    pub const CURRENT: SchemaVersion = SchemaVersion::V7;

    pub const ALL: [SchemaVersion; 6] = [
        SchemaVersion::V2,
        SchemaVersion::V3,
        SchemaVersion::V4,
        SchemaVersion::V5,
        SchemaVersion::V6,
        SchemaVersion::V7,
    ];

    pub fn from_tag(tag: &str) -> Option<SchemaVersion> {
        Self::ALL.into_iter().find(|v| v.tag() == tag)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SchemaVersion::V2 => "v2",
            SchemaVersion::V3 => "v3",
            SchemaVersion::V4 => "v4",
            SchemaVersion::V5 => "v5",
            SchemaVersion::V6 => "v6",
            SchemaVersion::V7 => "v7",
        }
    }

    pub fn layout(&self) -> Layout {
        use ChordFormat::*;
        use StepJoin::*;

        let (step_join, effect_levels, chords) = match self {
            SchemaVersion::V2 => (Concatenated, false, NameHash),
            SchemaVersion::V3 => (Concatenated, false, LibraryIndex),
            SchemaVersion::V4 => (Dotted, false, LibraryIndex),
            SchemaVersion::V5 => (Dotted, false, Text),
            SchemaVersion::V6 => (Dotted, true, Text),
            SchemaVersion::V7 => (Dotted, true, TextWithProvenance),
        };

        Layout {
            step_join,
            effect_levels,
            chords,
        }
    }

    pub fn is_legacy(&self) -> bool {
        *self != Self::CURRENT
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for v in SchemaVersion::ALL {
            assert_eq!(SchemaVersion::from_tag(v.tag()), Some(v));
        }
        assert_eq!(SchemaVersion::from_tag("v1"), None);
        assert_eq!(SchemaVersion::from_tag("v8"), None);
        assert_eq!(SchemaVersion::from_tag("V7"), None);
    }

    #[test]
    fn test_layout_differences() {
        assert_eq!(SchemaVersion::V3.layout().step_join, StepJoin::Concatenated);
        assert_eq!(SchemaVersion::V4.layout().step_join, StepJoin::Dotted);
        assert!(!SchemaVersion::V5.layout().effect_levels);
        assert!(SchemaVersion::V6.layout().effect_levels);
        assert_eq!(SchemaVersion::V6.layout().chords, ChordFormat::Text);
        assert_eq!(
            SchemaVersion::V7.layout().chords,
            ChordFormat::TextWithProvenance
        );
    }

    #[test]
    fn test_current_is_v7() {
        assert_eq!(SchemaVersion::CURRENT.tag(), "v7");
        assert!(!SchemaVersion::V7.is_legacy());
        assert!(SchemaVersion::V2.is_legacy());
    }
}
