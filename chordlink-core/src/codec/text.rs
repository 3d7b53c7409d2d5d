//! Free-text fields (chord names and note lists).
//!
//! The only place user text crosses the wire. Text is UTF-8 percent-encoded;
//! the bytes left unescaped are exactly ASCII letters, digits and
//! `- . ! * ' ( )`. Every delimiter of the link grammar (`_ | ~ @ : %` and
//! `+`) is therefore escaped, whatever language produced the token.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes that are escaped in a text field
pub const TEXT_FIELD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_text(text: &str) -> String {
    utf8_percent_encode(text, TEXT_FIELD).to_string()
}

/// Decode a text field. Stray `%` sequences are kept as-is and invalid UTF-8
/// is replaced, so this never fails.
pub fn decode_text(token: &str) -> String {
    percent_decode_str(token).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiters_are_escaped() {
        let encoded = encode_text("a_b|c~d@e:f+g%h i");
        for c in ['_', '|', '~', '@', ':', '+', ' '] {
            assert!(!encoded.contains(c), "{} left unescaped in {}", c, encoded);
        }
        assert_eq!(encoded, "a%5Fb%7Cc%7Ed%40e%3Af%2Bg%25h%20i");
    }

    #[test]
    fn test_slash_chord_text() {
        assert_eq!(encode_text("Cmaj7/E"), "Cmaj7%2FE");
        assert_eq!(encode_text("E3, C4"), "E3%2C%20C4");
        assert_eq!(decode_text("Cmaj7%2FE"), "Cmaj7/E");
    }

    #[test]
    fn test_unescaped_marks() {
        assert_eq!(encode_text("C(add9)!*'.-"), "C(add9)!*'.-");
    }

    #[test]
    fn test_non_ascii_roundtrip() {
        let text = "F♯m7♭5";
        assert_eq!(decode_text(&encode_text(text)), text);
    }

    #[test]
    fn test_malformed_escapes_do_not_fail() {
        assert_eq!(decode_text("100%"), "100%");
        assert_eq!(decode_text("%zz"), "%zz");
        assert_eq!(decode_text("%FF"), "\u{FFFD}");
    }
}
