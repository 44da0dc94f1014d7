//! # Price Check-Digit Codec
//!
//! Encodes a display price with a single self-verifying check digit so that
//! a transcribed or printed price can be cheaply re-validated.
//!
//! The check digit is the decimal digit sum of the normalized price modulo 9.
//! That gives only 9 possible check values (an ~11% false-accept rate) and
//! does not reliably detect digit transpositions: this is casual
//! tamper-evidence for human-facing display, **not** financial-grade
//! verification. Strengthening the scheme would invalidate every price
//! string already issued, so it stays as-is.
//!
//! ```rust
//! use kgems_pricing::{decode, encode, validate};
//!
//! let encoded = encode(1250.0);
//! assert_eq!(encoded.encoded, "12508");
//! assert!(validate(&encoded.encoded));
//! assert_eq!(decode(&encoded.encoded), Some(1250));
//! ```

use serde::{Deserialize, Serialize};

const CHECK_MODULUS: u64 = 9;

/// A price paired with its check digit. Transient display value, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPrice {
    /// `|price|` rounded to the nearest integer.
    pub normalized: u64,
    /// Digit sum of `normalized`, mod 9.
    pub check_digit: u8,
    /// `normalized` rendered as decimal digits with the check digit appended.
    pub encoded: String,
}

/// Encodes a price into a tamper-evident display string.
///
/// Normalization rounds the absolute value to an integer, so fractional and
/// negative inputs are accepted but collapse onto the integer grid.
#[must_use]
pub fn encode(price: f64) -> EncodedPrice {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let normalized = price.abs().round() as u64;
    let check_digit = check_digit_of(normalized);
    EncodedPrice { normalized, check_digit, encoded: format!("{normalized}{check_digit}") }
}

/// Verifies an encoded price string.
///
/// Rejects strings shorter than two characters, strings with any non-digit
/// character, and strings whose recomputed check digit differs from the last
/// digit. The digit sum runs over the raw bytes, so prefixes of any width are
/// accepted and non-ASCII input is rejected without panicking.
#[must_use]
pub fn validate(encoded: &str) -> bool {
    let bytes = encoded.as_bytes();
    if bytes.len() < 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let (prefix, claimed) = bytes.split_at(bytes.len() - 1);
    let sum = prefix.iter().fold(0_u64, |acc, b| acc + u64::from(b - b'0'));
    claimed[0] - b'0' == check_digit_from_sum(sum)
}

/// Returns the numeric prefix of a valid encoded price, or `None`.
///
/// Prices are encoded from `u64` values, so a (valid) prefix wider than
/// `u64` still yields `None`.
#[must_use]
pub fn decode(encoded: &str) -> Option<u64> {
    if !validate(encoded) {
        return None;
    }
    encoded[..encoded.len() - 1].parse().ok()
}

const fn check_digit_of(mut value: u64) -> u8 {
    let mut sum = 0;
    loop {
        sum += value % 10;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    check_digit_from_sum(sum)
}

const fn check_digit_from_sum(sum: u64) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (sum % CHECK_MODULUS) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(0.0).encoded, "00");
        assert_eq!(encode(5.0).encoded, "55");
        // 1+2+5+0 = 8
        assert_eq!(encode(1250.0).encoded, "12508");
        // 9+9 = 18, 18 mod 9 = 0
        assert_eq!(encode(99.0).encoded, "990");
    }

    #[test]
    fn encode_normalizes_sign_and_fraction() {
        assert_eq!(encode(-12.4).normalized, 12);
        assert_eq!(encode(12.5).normalized, 13);
    }

    #[test]
    fn validate_rejects_short_and_non_digit_input() {
        assert!(!validate(""));
        assert!(!validate("7"));
        assert!(!validate("12a58"));
        assert!(!validate("+1258"));
        assert!(!validate("12.58"));
    }

    #[test]
    fn validate_rejects_multibyte_input_without_panicking() {
        assert!(!validate("é"));
        assert!(!validate("1é"));
        assert!(!validate("12508é"));
        assert!(!validate("１2508"));
    }

    #[test]
    fn validate_accepts_prefixes_wider_than_u64() {
        // 23 nines: digit sum 207, 207 mod 9 = 0
        let wide = format!("{}0", "9".repeat(23));
        assert!(validate(&wide));
        // decoding stays bounded to what encode can produce
        assert_eq!(decode(&wide), None);
    }

    #[test]
    fn validate_rejects_wrong_check_digit() {
        assert!(validate("12508"));
        for wrong in ["12500", "12501", "12509"] {
            assert!(!validate(wrong), "{wrong} must fail");
        }
    }

    #[test]
    fn decode_round_trips() {
        for price in [0.0, 1.0, 42.0, 1250.0, 987_654.0] {
            let enc = encode(price);
            assert_eq!(decode(&enc.encoded), Some(enc.normalized), "price {price}");
        }
    }

    #[test]
    fn decode_refuses_invalid_input() {
        assert_eq!(decode("12500"), None);
        assert_eq!(decode("x"), None);
    }
}
