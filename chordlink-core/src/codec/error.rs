use std::fmt;

/// Why a token could not be encoded or decoded
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CodecError {
    /// The token was empty
    EmptyInput,
    /// A lookup table was empty (not loaded yet)
    TablesUnavailable(&'static str),
    /// The leading schema tag is not one this codec reads
    UnknownVersion(String),
    /// Fewer top-level segments than the grammar requires
    TooFewSegments(usize),
    /// A chord entry lacks its `~` separator
    MissingSeparator(String),
    /// A chord entry with an empty name or empty notes
    EmptyChordText(String),
    /// A legacy chord reference has no match in the chord library
    UnknownLibraryChord(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EmptyInput => write!(f, "empty state token"),
            CodecError::TablesUnavailable(table) => {
                write!(f, "lookup table '{}' is not loaded", table)
            }
            CodecError::UnknownVersion(tag) => write!(f, "unknown schema tag '{}'", tag),
            CodecError::TooFewSegments(n) => {
                write!(f, "expected at least 6 segments, found {}", n)
            }
            CodecError::MissingSeparator(entry) => {
                write!(f, "chord entry '{}' has no '~' separator", entry)
            }
            CodecError::EmptyChordText(entry) => {
                write!(f, "chord entry '{}' has an empty name or notes", entry)
            }
            CodecError::UnknownLibraryChord(entry) => {
                write!(f, "no library chord matches '{}'", entry)
            }
        }
    }
}

impl std::error::Error for CodecError {}
