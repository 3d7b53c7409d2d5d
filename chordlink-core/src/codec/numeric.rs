//! Base-36 numeric fields.
//!
//! Every numeric field of a link is clamped into its domain, shifted so the
//! domain starts at zero and written in base 36 (`0-9` then `a-z`). Reading
//! reverses the shift and clamps again, so a corrupted token can only ever
//! produce an in-domain value.

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render a non-negative integer in base 36 using as few characters as possible
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Read the longest base-36 prefix of `token` (either letter case).
/// A token with no leading base-36 digit reads as 0.
pub fn parse_base36(token: &str) -> u64 {
    token
        .chars()
        .map_while(|c| c.to_digit(36))
        .fold(0u64, |acc, d| acc.saturating_mul(36).saturating_add(d as u64))
}

/// Clamp `value` into `[min, max]` and pack it relative to `min`
pub fn pack_int(value: i64, min: i64, max: i64) -> String {
    let max = max.max(min);
    let shifted = value.clamp(min, max) - min;
    to_base36(shifted as u64)
}

/// Inverse of [`pack_int`]. A missing (absent or empty) token yields
/// `default`; anything else is parsed, shifted back and clamped.
pub fn unpack_int(token: Option<&str>, min: i64, max: i64, default: i64) -> i64 {
    let max = max.max(min);
    match token {
        None | Some("") => default.clamp(min, max),
        Some(t) => {
            let raw = parse_base36(t).min(i64::MAX as u64) as i64;
            raw.saturating_add(min).clamp(min, max)
        }
    }
}

/// Pack an index into a table of `len` entries. Indices past the end are
/// written as 0.
pub fn pack_index(index: usize, len: usize) -> String {
    if index < len {
        to_base36(index as u64)
    } else {
        "0".to_string()
    }
}

/// Read a table index. Anything the table does not cover degrades to 0.
pub fn unpack_index(token: Option<&str>, len: usize) -> usize {
    let raw = token.map(parse_base36).unwrap_or(0);
    if raw < len as u64 {
        raw as usize
    } else {
        0
    }
}

/// Affine map between a continuous control and an integer bucket:
/// `bucket = round(value * scale + offset)`, clamped to `[0, max_bucket]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    pub scale: f64,
    pub offset: f64,
    pub max_bucket: i64,
}

impl Quantizer {
    /// EQ gain in whole decibels: `[-24, 24]` -> `[0, 48]`
    pub const EQ_DB: Quantizer = Quantizer::new(1.0, 24.0, 48);
    /// Level controls: `[0, 1]` -> 36 buckets `[0, 35]`
    pub const LEVEL: Quantizer = Quantizer::new(35.0, 0.0, 35);
    /// Note duration: `[0.1, 1.0]` -> `[0, 9]`
    pub const DURATION: Quantizer = Quantizer::new(10.0, -1.0, 9);

    pub const fn new(scale: f64, offset: f64, max_bucket: i64) -> Self {
        Self {
            scale,
            offset,
            max_bucket,
        }
    }

    /// Distance between two adjacent representable values
    pub fn bucket_width(&self) -> f64 {
        1.0 / self.scale
    }

    pub fn bucket(&self, value: f64) -> i64 {
        // NaN casts to 0, infinities saturate; clamping handles both
        ((value * self.scale + self.offset).round() as i64).clamp(0, self.max_bucket)
    }

    pub fn value(&self, bucket: i64) -> f64 {
        (bucket as f64 - self.offset) / self.scale
    }

    pub fn pack(&self, value: f64) -> String {
        pack_int(self.bucket(value), 0, self.max_bucket)
    }

    pub fn unpack(&self, token: Option<&str>, default: f64) -> f64 {
        match token {
            None | Some("") => default,
            Some(_) => self.value(unpack_int(token, 0, self.max_bucket, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_rendering() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(60), "1o");
    }

    #[test]
    fn test_parse_base36_prefix_and_garbage() {
        assert_eq!(parse_base36("1o"), 60);
        assert_eq!(parse_base36("1O"), 60);
        assert_eq!(parse_base36("1o!x"), 60);
        assert_eq!(parse_base36("!"), 0);
        assert_eq!(parse_base36(""), 0);
        // Overlong tokens saturate instead of overflowing
        assert_eq!(parse_base36(&"z".repeat(40)), u64::MAX);
    }

    #[test]
    fn test_pack_clamps_into_domain() {
        assert_eq!(pack_int(120, 60, 200), "1o");
        assert_eq!(pack_int(500, 60, 200), to_base36(140));
        assert_eq!(pack_int(10, 60, 200), "0");
    }

    #[test]
    fn test_unpack_clamps_corrupted_tokens() {
        assert_eq!(unpack_int(Some("zzzz"), 60, 200, 120), 200);
        assert_eq!(unpack_int(Some("?"), 60, 200, 120), 60);
        assert_eq!(unpack_int(None, 60, 200, 120), 120);
        assert_eq!(unpack_int(Some(""), 0, 50, 0), 0);
    }

    #[test]
    fn test_degenerate_domain_does_not_panic() {
        assert_eq!(pack_int(5, 0, -1), "0");
        assert_eq!(unpack_int(Some("5"), 0, -1, 3), 0);
    }

    #[test]
    fn test_index_degrades_to_zero() {
        assert_eq!(unpack_index(Some("3"), 4), 3);
        assert_eq!(unpack_index(Some("4"), 4), 0);
        assert_eq!(unpack_index(Some("zz"), 4), 0);
        assert_eq!(unpack_index(None, 4), 0);
        assert_eq!(pack_index(9, 4), "0");
    }

    #[test]
    fn test_quantized_levels_within_one_bucket() {
        let q = Quantizer::LEVEL;
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let back = q.unpack(Some(&q.pack(v)), 0.0);
            assert!((back - v).abs() <= q.bucket_width(), "{} -> {}", v, back);
        }
        assert_eq!(q.pack(2.0), "z");
        assert_eq!(q.pack(-1.0), "0");
        assert_eq!(q.pack(f64::NAN), "0");
    }

    #[test]
    fn test_duration_and_eq_maps() {
        assert_eq!(Quantizer::DURATION.pack(0.8), "7");
        assert_eq!(Quantizer::DURATION.unpack(Some("7"), 0.5), 0.8);
        assert_eq!(Quantizer::DURATION.pack(0.0), "0");
        assert_eq!(Quantizer::EQ_DB.pack(-24.0), "0");
        assert_eq!(Quantizer::EQ_DB.pack(0.0), "o");
        assert_eq!(Quantizer::EQ_DB.unpack(Some("1c"), 0.0), 24.0);
        assert_eq!(Quantizer::EQ_DB.unpack(None, 0.0), 0.0);
    }
}
