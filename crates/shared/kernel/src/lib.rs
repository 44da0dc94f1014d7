//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it carries the config loader and the helpers
//! for generating URL-safe record identifiers.
//!
//! ## ID generation
//! ```rust
//! let id = kgems_kernel::record_id();
//! assert_eq!(id.len(), 12);
//! ```

pub mod config;

pub use kgems_domain as domain;

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1) so ids can
// be read back from printed labels without transcription errors.
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const RECORD_ID_LEN: usize = 12;

/// Generates an unambiguous random record id (12 characters).
#[must_use]
pub fn record_id() -> String {
    nanoid::nanoid!(RECORD_ID_LEN, SAFE_ALPHABET)
}

/// Generates an unambiguous random record id of a custom length.
#[must_use]
pub fn record_id_sized(len: usize) -> String {
    nanoid::nanoid!(len, SAFE_ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_use_the_safe_alphabet() {
        let id = record_id();
        assert_eq!(id.len(), RECORD_ID_LEN);
        assert!(id.chars().all(|c| SAFE_ALPHABET.contains(&c)));
        for ambiguous in ['I', 'O', 'l', '0', '1'] {
            assert!(!id.contains(ambiguous));
        }
    }

    #[test]
    fn record_ids_are_unique_enough_for_tests() {
        let a = record_id();
        let b = record_id();
        assert_ne!(a, b);
    }

    #[test]
    fn sized_ids_honor_the_request() {
        assert_eq!(record_id_sized(21).len(), 21);
    }
}
