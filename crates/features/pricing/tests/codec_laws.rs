use kgems_pricing::{decode, encode, validate};
use proptest::prelude::*;

proptest! {
    #[test]
    fn round_trip_law(price in 0.0f64..1.0e12) {
        let enc = encode(price);
        prop_assert!(validate(&enc.encoded));
        prop_assert_eq!(decode(&enc.encoded), Some(enc.normalized));
    }

    #[test]
    fn negative_prices_collapse_onto_their_magnitude(price in 0.0f64..1.0e12) {
        prop_assert_eq!(encode(-price), encode(price));
    }

    #[test]
    fn check_digit_stays_in_mod9_range(price in 0.0f64..1.0e12) {
        prop_assert!(encode(price).check_digit < 9);
    }

    #[test]
    fn single_digit_corruption_in_check_position_is_caught(price in 1.0f64..1.0e9, bump in 1u8..9) {
        let enc = encode(price);
        let corrupted_digit = (enc.check_digit + bump) % 10;
        let mut corrupted = enc.encoded[..enc.encoded.len() - 1].to_owned();
        corrupted.push(char::from(b'0' + corrupted_digit));
        // only a bump that wraps back onto the same mod-9 class survives
        if corrupted_digit != enc.check_digit && u64::from(corrupted_digit) % 9 != u64::from(enc.check_digit) % 9 {
            prop_assert!(!validate(&corrupted));
        }
    }

    #[test]
    fn arbitrary_strings_never_panic(s in ".*") {
        let _ = validate(&s);
        let _ = decode(&s);
    }
}
