use crate::error::SequenceError;
use kgems_domain::{VoucherKind, WeightUnit};

/// Every SKU starts with this house prefix.
pub const SKU_PREFIX: &str = "KG";
/// Placeholder color code when a stone has no graded color.
pub const COLOR_FALLBACK: &str = "XX";

/// Largest sequence that still fits the 5-digit SKU suffix. Beyond this,
/// lexicographic ordering of issued identifiers no longer matches numeric
/// ordering, so the identifier must not be produced.
pub const SKU_SEQUENCE_MAX: u64 = 99_999;
/// Largest sequence that fits the 6-digit voucher suffix.
pub const VOUCHER_SEQUENCE_MAX: u64 = 999_999;

/// Descriptive inputs of a SKU, as captured on the purchase form.
#[derive(Debug, Clone)]
pub struct SkuParts {
    pub category_code: String,
    pub gemstone_code: String,
    /// `None` renders as [`COLOR_FALLBACK`].
    pub color_code: Option<String>,
    pub weight_value: f64,
    pub weight_unit: WeightUnit,
}

/// Renders a SKU from its descriptive parts and an allocated sequence.
///
/// Layout: `"KG" + category + gemstone + color + weight + sequence`, where
/// codes are uppercased with non-alphanumerics stripped, the weight is the
/// value at exactly two decimals with the point removed (5.25 → `525`,
/// 0.50 → `050`), and the sequence is zero-padded to 5 digits.
///
/// # Errors
/// * [`SequenceError::Validation`] for an empty category or gemstone code
///   (after sanitizing), a non-finite or negative weight, or a zero sequence.
/// * [`SequenceError::Overflow`] when the sequence exceeds
///   [`SKU_SEQUENCE_MAX`].
pub fn format_sku(parts: &SkuParts, sequence: u64) -> Result<String, SequenceError> {
    if sequence == 0 {
        return Err(SequenceError::Validation {
            message: "SKU sequence starts at 1".into(),
            context: None,
        });
    }
    if sequence > SKU_SEQUENCE_MAX {
        return Err(SequenceError::Overflow {
            message: format!("SKU sequence {sequence} exceeds the 5-digit suffix").into(),
            context: None,
        });
    }

    let category = sanitize_code(&parts.category_code);
    let gemstone = sanitize_code(&parts.gemstone_code);
    if category.is_empty() || gemstone.is_empty() {
        return Err(SequenceError::Validation {
            message: "Category and gemstone codes must contain alphanumeric characters".into(),
            context: None,
        });
    }
    let color = match &parts.color_code {
        Some(raw) => {
            let code = sanitize_code(raw);
            if code.is_empty() { COLOR_FALLBACK.to_owned() } else { code }
        }
        None => COLOR_FALLBACK.to_owned(),
    };

    let weight = weight_suffix(parts.weight_value)?;

    Ok(format!("{SKU_PREFIX}{category}{gemstone}{color}{weight}{sequence:05}"))
}

/// Renders a voucher number: `"{code}/{year}/{sequence:06}"`.
///
/// # Errors
/// * [`SequenceError::Validation`] for a zero sequence.
/// * [`SequenceError::Overflow`] when the sequence exceeds
///   [`VOUCHER_SEQUENCE_MAX`].
pub fn format_voucher_number(
    kind: VoucherKind,
    year: i32,
    sequence: u64,
) -> Result<String, SequenceError> {
    if sequence == 0 {
        return Err(SequenceError::Validation {
            message: "Voucher sequence starts at 1".into(),
            context: None,
        });
    }
    if sequence > VOUCHER_SEQUENCE_MAX {
        return Err(SequenceError::Overflow {
            message: format!("Voucher sequence {sequence} exceeds the 6-digit suffix").into(),
            context: None,
        });
    }
    Ok(format!("{}{sequence:06}", voucher_prefix(kind, year)))
}

/// The scan prefix shared by the allocator and the formatter.
#[must_use]
pub fn voucher_prefix(kind: VoucherKind, year: i32) -> String {
    format!("{}/{year}/", kind.code())
}

fn sanitize_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_uppercase()).collect()
}

fn weight_suffix(value: f64) -> Result<String, SequenceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SequenceError::Validation {
            message: format!("Weight must be a non-negative number, got {value}").into(),
            context: None,
        });
    }
    // two decimals, point removed: 5.25 -> 525, 0.50 -> 050
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (value * 100.0).round() as u64;
    Ok(format!("{scaled:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> SkuParts {
        SkuParts {
            category_code: "lg".to_owned(),
            gemstone_code: "sap".to_owned(),
            color_code: Some("red".to_owned()),
            weight_value: 5.25,
            weight_unit: WeightUnit::Carat,
        }
    }

    #[test]
    fn sku_reference_vector() {
        assert_eq!(format_sku(&parts(), 7).unwrap(), "KGLGSAPRED52500007");
    }

    #[test]
    fn sku_codes_are_sanitized() {
        let mut p = parts();
        p.category_code = "l-g!".to_owned();
        p.gemstone_code = " sa p ".to_owned();
        assert_eq!(format_sku(&p, 7).unwrap(), "KGLGSAPRED52500007");
    }

    #[test]
    fn missing_color_falls_back_to_xx() {
        let mut p = parts();
        p.color_code = None;
        assert_eq!(format_sku(&p, 7).unwrap(), "KGLGSAPXX52500007");
        p.color_code = Some("--".to_owned());
        assert_eq!(format_sku(&p, 7).unwrap(), "KGLGSAPXX52500007");
    }

    #[test]
    fn weight_keeps_two_decimals_without_the_point() {
        let mut p = parts();
        p.weight_value = 0.50;
        assert!(format_sku(&p, 1).unwrap().contains("050"));
        p.weight_value = 0.0;
        assert_eq!(format_sku(&p, 1).unwrap(), "KGLGSAPRED00000001");
        p.weight_value = 123.456;
        // rounds to 123.46
        assert!(format_sku(&p, 1).unwrap().contains("12346"));
    }

    #[test]
    fn sku_rejects_bad_input() {
        let mut p = parts();
        p.category_code = "!!!".to_owned();
        assert!(matches!(format_sku(&p, 1), Err(SequenceError::Validation { .. })));

        let mut p = parts();
        p.weight_value = -1.0;
        assert!(matches!(format_sku(&p, 1), Err(SequenceError::Validation { .. })));

        assert!(matches!(format_sku(&parts(), 0), Err(SequenceError::Validation { .. })));
    }

    #[test]
    fn sku_sequence_overflow_is_refused() {
        assert!(format_sku(&parts(), SKU_SEQUENCE_MAX).is_ok());
        assert!(matches!(
            format_sku(&parts(), SKU_SEQUENCE_MAX + 1),
            Err(SequenceError::Overflow { .. })
        ));
    }

    #[test]
    fn voucher_reference_vector() {
        assert_eq!(format_voucher_number(VoucherKind::Expense, 2024, 42).unwrap(), "EXP/2024/000042");
        assert_eq!(format_voucher_number(VoucherKind::Receipt, 2026, 1).unwrap(), "RCT/2026/000001");
    }

    #[test]
    fn voucher_sequence_overflow_is_refused() {
        assert!(format_voucher_number(VoucherKind::Payment, 2024, VOUCHER_SEQUENCE_MAX).is_ok());
        assert!(matches!(
            format_voucher_number(VoucherKind::Payment, 2024, VOUCHER_SEQUENCE_MAX + 1),
            Err(SequenceError::Overflow { .. })
        ));
    }

    #[test]
    fn zero_padding_preserves_lexicographic_order() {
        let a = format_voucher_number(VoucherKind::Expense, 2024, 9).unwrap();
        let b = format_voucher_number(VoucherKind::Expense, 2024, 10).unwrap();
        assert!(a < b, "{a} must sort before {b}");

        let a = format_sku(&parts(), 99).unwrap();
        let b = format_sku(&parts(), 100).unwrap();
        assert!(a < b, "{a} must sort before {b}");
    }
}
