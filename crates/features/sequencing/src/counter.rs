use crate::error::{SequenceError, SequenceErrorExt};
use kgems_database::Database;
use std::time::Duration;
use surrealdb::types::SurrealValue;
use tracing::warn;

/// Counter name backing the global SKU sequence.
pub const SKU_COUNTER: &str = "sku";

/// Engine write conflicts are transient; the increment is retried this many
/// times before the allocation is given up.
const MAX_ATTEMPTS: u32 = 8;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, SurrealValue)]
struct CounterRow {
    value: i64,
}

/// Allocates the next value of a named global counter.
///
/// The increment runs as a single `UPSERT ... SET value += 1` statement — a
/// database-native atomic read-increment-write. The engine serializes
/// concurrent writers on the counter record; counters with different names
/// never block each other. A missing counter is created on first use, so the
/// first allocation yields 1.
///
/// Once this returns, the value is permanently consumed: if the caller's
/// enclosing operation fails later, the number is burned and the resulting
/// gap is expected.
///
/// # Errors
/// * [`SequenceError::Validation`] for an empty counter name.
/// * [`SequenceError::Database`] when the engine keeps reporting write
///   conflicts past the retry budget, or fails outright.
/// * [`SequenceError::Internal`] if the engine returns no row.
pub async fn allocate_global(db: &Database, counter_name: &str) -> Result<u64, SequenceError> {
    if counter_name.trim().is_empty() {
        return Err(SequenceError::Validation {
            message: "Counter name cannot be empty".into(),
            context: None,
        });
    }

    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 1;
    loop {
        match try_increment(db, counter_name).await {
            Ok(value) => return Ok(value),
            Err(SequenceError::Database { source, context }) => {
                if attempt >= MAX_ATTEMPTS || !is_write_conflict(&source) {
                    return Err(SequenceError::Database { source, context });
                }
                warn!(counter = counter_name, attempt, ?delay, "Write conflict, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_increment(db: &Database, counter_name: &str) -> Result<u64, SequenceError> {
    let mut response = db
        .query("UPSERT type::thing('counter', $name) SET value += 1 RETURN AFTER")
        .bind(("name", counter_name.to_owned()))
        .await
        .context("Incrementing counter")?
        .check()
        .map_err(surrealdb::Error::from)
        .context("Counter increment rejected")?;

    let rows: Vec<CounterRow> = match response.take(0) {
        Ok(rows) => rows,
        Err(e) => {
            // Stored counter state does not parse as an integer. The schema
            // should make this impossible; treat it as a data-integrity
            // event, then (last resort) re-seed the counter as absent.
            warn!(counter = counter_name, error = %e, "Malformed counter state, re-seeding");
            return reseed(db, counter_name).await;
        }
    };

    let value = rows.first().map(|row| row.value).ok_or_else(|| SequenceError::Internal {
        message: "Counter upsert returned no row".into(),
        context: Some(counter_name.to_owned().into()),
    })?;

    u64::try_from(value).map_err(|_| SequenceError::Integrity {
        message: format!("Counter '{counter_name}' holds a negative value ({value})").into(),
        context: None,
    })
}

async fn reseed(db: &Database, counter_name: &str) -> Result<u64, SequenceError> {
    db.query("UPSERT type::thing('counter', $name) SET value = 1")
        .bind(("name", counter_name.to_owned()))
        .await
        .context("Re-seeding counter")?
        .check()
        .map_err(surrealdb::Error::from)
        .context("Counter re-seed rejected")?;
    Ok(1)
}

fn is_write_conflict(err: &surrealdb::Error) -> bool {
    let text = err.to_string().to_lowercase();
    text.contains("conflict") || text.contains("failed to commit")
}
