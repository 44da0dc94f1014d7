//! # Permission Gate
//!
//! The authorization checkpoint in front of every mutating action. The
//! role-to-permission lookup itself is pure and cannot fail; what the gate
//! adds is the policy around it:
//!
//! - unauthenticated actors are treated as the least-privileged role;
//! - a denial always produces the same fixed message, never naming the
//!   missing permission (no probing of the permission model);
//! - every denial appends one activity entry, best-effort — a failing audit
//!   sink is logged and ignored, it neither overrides the denial nor blocks
//!   the caller.
//!
//! Callers must treat [`Decision::Denied`] as terminal for the requested
//! action.

use kgems_audit::{ActionKind, ActivityEntry, ActivityTrail};
use kgems_domain::{PermissionSet, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The one message every denied actor sees, regardless of which permission
/// was missing.
pub const DENIAL_MESSAGE: &str = "You are not allowed to perform this action.";

/// Who is asking. Role is `None` for unauthenticated sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub role: Option<Role>,
}

impl SessionContext {
    /// An unauthenticated session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session.
    pub fn authenticated(user_id: impl Into<String>, role: Role) -> Self {
        Self { user_id: Some(user_id.into()), user_name: None, role: Some(role) }
    }

    /// The role used for permission checks; unauthenticated actors get the
    /// least-privileged role.
    #[must_use]
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied { message: &'static str },
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// The gate itself. Cheap to clone; holds only the audit-trail handle.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    trail: ActivityTrail,
}

impl PermissionGate {
    #[must_use]
    pub const fn new(trail: ActivityTrail) -> Self {
        Self { trail }
    }

    /// Checks whether the session may perform the required action.
    ///
    /// `required` is normally a single permission flag; passing a union
    /// requires the role to hold every flag in it.
    ///
    /// On denial, appends one `permission_denied` activity entry
    /// (best-effort) and returns the uniform [`DENIAL_MESSAGE`].
    pub async fn check(&self, required: PermissionSet, session: &SessionContext) -> Decision {
        let role = session.effective_role();
        if role.permissions().contains(required) {
            return Decision::Allowed;
        }

        debug!(
            role = %role,
            user_id = session.user_id.as_deref().unwrap_or("<anonymous>"),
            "Permission check failed"
        );

        let entry = ActivityEntry {
            entity_type: "permission".to_owned(),
            entity_id: None,
            entity_identifier: None,
            user_id: session.user_id.clone(),
            user_name: session.user_name.clone(),
            details: format!("Denied action for role {role}"),
        };
        self.trail.record_best_effort(ActionKind::PermissionDenied, entry).await;

        Decision::Denied { message: DENIAL_MESSAGE }
    }
}
