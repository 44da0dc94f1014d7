//! # Sequence Allocation & Identifier Formatting
//!
//! Every business document carries a human-readable identifier built from an
//! allocated sequence number:
//!
//! - **SKUs** draw from a single persisted global counter
//!   ([`allocate_global`]): an atomic `+= 1` on one `counter` record.
//! - **Voucher numbers** are stateless per `(kind, year)`: the next value is
//!   inferred by scanning issued numbers under the `"{code}/{year}/"` prefix
//!   ([`allocate_voucher_sequence`]).
//!
//! Formatting ([`format_sku`], [`format_voucher_number`]) is pure and
//! separate from allocation; the fixed zero-padded widths are what keep the
//! prefix scan's string ordering equal to numeric ordering.
//!
//! A committed allocation is never returned to the pool: when the enclosing
//! document creation fails afterwards, the number is burned and the gap is
//! expected.

mod counter;
mod error;
mod format;
mod voucher;

pub use counter::{SKU_COUNTER, allocate_global};
pub use error::{SequenceError, SequenceErrorExt};
pub use format::{
    COLOR_FALLBACK, SKU_PREFIX, SKU_SEQUENCE_MAX, SkuParts, VOUCHER_SEQUENCE_MAX,
    format_sku, format_voucher_number, voucher_prefix,
};
pub use voucher::allocate_voucher_sequence;

use chrono::{Datelike, NaiveDate};
use kgems_database::Database;
use kgems_domain::VoucherKind;

/// Allocates the next global SKU sequence and renders the full SKU.
///
/// The sequence is consumed even if the caller's item insert fails later.
///
/// # Errors
/// Any error of [`allocate_global`] or [`format_sku`].
pub async fn allocate_and_format_sku(
    db: &Database,
    parts: &SkuParts,
) -> Result<String, SequenceError> {
    let sequence = allocate_global(db, SKU_COUNTER).await?;
    format_sku(parts, sequence)
}

/// Allocates the next `(kind, year)` voucher sequence and renders the number.
///
/// The caller should create the voucher record carrying this number in the
/// same unit of work; the unique index on `voucher.number` turns a lost race
/// into a constraint failure to be retried.
///
/// # Errors
/// Any error of [`allocate_voucher_sequence`] or [`format_voucher_number`].
pub async fn allocate_and_format_voucher_number(
    db: &Database,
    kind: VoucherKind,
    date: NaiveDate,
) -> Result<String, SequenceError> {
    let sequence = allocate_voucher_sequence(db, kind, date).await?;
    format_voucher_number(kind, date.year(), sequence)
}
