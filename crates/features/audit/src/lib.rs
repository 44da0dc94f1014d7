//! # Activity Trail
//!
//! Append-only audit log for everything that touches business documents:
//! document creation, mutation, and permission denials. Entries are written
//! to the `activity` table and never updated or deleted by this core.
//!
//! The trail offers two write paths:
//! - [`ActivityTrail::record`] for callers that must know the write landed;
//! - [`ActivityTrail::record_best_effort`] for callers (like the permission
//!   gate) whose own outcome must not be masked by a failing audit write.

mod error;

pub use error::{AuditError, AuditErrorExt};

use kgems_database::Database;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Print,
    PermissionDenied,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Print => "print",
            Self::PermissionDenied => "permission_denied",
        }
    }
}

/// One audit record. `entity_id`/`user_id` may be absent (e.g. a denial for
/// an unauthenticated actor attempting a creation that never happened).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub entity_identifier: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub details: String,
}

impl ActivityEntry {
    pub fn new(entity_type: impl Into<String>, details: impl Into<String>) -> Self {
        Self { entity_type: entity_type.into(), details: details.into(), ..Self::default() }
    }
}

/// Handle to the append-only `activity` table.
#[derive(Debug, Clone)]
pub struct ActivityTrail {
    db: Database,
}

impl ActivityTrail {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Appends one entry.
    ///
    /// # Errors
    /// Returns [`AuditError::Write`] if the insert fails or is rejected.
    pub async fn record(&self, action: ActionKind, entry: ActivityEntry) -> Result<(), AuditError> {
        self.db
            .query(
                "CREATE activity SET
                    entity_type = $entity_type,
                    entity_id = $entity_id,
                    entity_identifier = $entity_identifier,
                    action = $action,
                    user_id = $user_id,
                    user_name = $user_name,
                    details = $details",
            )
            .bind(("entity_type", entry.entity_type))
            .bind(("entity_id", entry.entity_id))
            .bind(("entity_identifier", entry.entity_identifier))
            .bind(("action", action.as_str()))
            .bind(("user_id", entry.user_id))
            .bind(("user_name", entry.user_name))
            .bind(("details", entry.details))
            .await
            .context("Appending activity entry")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Activity entry rejected")?;

        Ok(())
    }

    /// Appends one entry, swallowing any failure.
    ///
    /// A failed audit write is logged and dropped; it never propagates to the
    /// caller. Used where the caller's own verdict (e.g. a permission denial)
    /// must stand regardless of audit-sink health.
    pub async fn record_best_effort(&self, action: ActionKind, entry: ActivityEntry) {
        let entity_type = entry.entity_type.clone();
        if let Err(e) = self.record(action, entry).await {
            warn!(%entity_type, action = action.as_str(), error = %e, "Activity entry dropped");
        }
    }

    /// Number of recorded entries for an action kind. Test/report helper.
    ///
    /// # Errors
    /// Returns [`AuditError::Write`] if the count query fails.
    pub async fn count(&self, action: ActionKind) -> Result<usize, AuditError> {
        let mut response = self
            .db
            .query("SELECT VALUE count() FROM activity WHERE action = $action GROUP ALL")
            .bind(("action", action.as_str()))
            .await
            .context("Counting activity entries")?;

        let counts: Vec<i64> = response.take(0).context("Parsing activity count")?;
        #[allow(clippy::cast_sign_loss)]
        Ok(counts.first().copied().unwrap_or(0).max(0) as usize)
    }
}
