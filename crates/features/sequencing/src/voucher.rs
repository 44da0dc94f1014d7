use crate::error::{SequenceError, SequenceErrorExt};
use crate::format::voucher_prefix;
use chrono::{Datelike, NaiveDate};
use kgems_database::Database;
use kgems_domain::VoucherKind;
use tracing::error;

/// Allocates the next voucher sequence for `(kind, year of date)`.
///
/// There is no persisted counter for vouchers: the allocator scans existing
/// voucher numbers under the `"{code}/{year}/"` prefix and takes the maximal
/// suffix plus one. Fixed-width zero padding makes the lexicographic maximum
/// equal the numeric maximum, so a single ordered scan suffices.
///
/// Gaps from burned numbers are preserved — a missing `000002` never causes
/// `000002` to be re-issued once `000003` exists.
///
/// Uniqueness is only guaranteed when this scan and the voucher INSERT share
/// a transaction; two racing creations can otherwise both compute the same
/// next value. The unique index on `voucher.number` is the backstop: the
/// loser of the race gets a constraint failure and must retry. This is the
/// documented tradeoff of the stateless variant versus the counter table.
///
/// # Errors
/// * [`SequenceError::Integrity`] if an existing number under the prefix has
///   a non-numeric suffix — a corrupted identifier must stop allocation
///   rather than risk colliding with a still-valid earlier number.
/// * [`SequenceError::Database`] if the scan fails.
pub async fn allocate_voucher_sequence(
    db: &Database,
    kind: VoucherKind,
    date: NaiveDate,
) -> Result<u64, SequenceError> {
    let year = date.year();
    let prefix = voucher_prefix(kind, year);

    let mut response = db
        .query(
            "SELECT VALUE number FROM voucher
                WHERE string::starts_with(number, $prefix)
                ORDER BY number DESC LIMIT 1",
        )
        .bind(("prefix", prefix.clone()))
        .await
        .context("Scanning voucher numbers")?;

    let numbers: Vec<String> = response.take(0).context("Parsing voucher scan")?;
    let Some(last) = numbers.into_iter().next() else {
        return Ok(1);
    };

    let suffix = last.strip_prefix(&prefix).unwrap_or(&last);
    match suffix.parse::<u64>() {
        Ok(parsed) => Ok(parsed + 1),
        Err(_) => {
            error!(number = %last, %prefix, "Voucher number with non-numeric suffix");
            Err(SequenceError::Integrity {
                message: format!("Voucher number '{last}' has a non-numeric suffix").into(),
                context: Some("Refusing to allocate against corrupted identifiers".into()),
            })
        }
    }
}
