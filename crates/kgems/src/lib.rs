//! Facade crate for KaratGems features and shared modules.
//! Re-exports domain/kernel primitives and wires the core together.
//! Keep this crate thin: it composes other crates, it does not implement
//! business logic.
//!
//! ## Usage
//! ```rust,ignore
//! use kgems::Core;
//! use kgems::domain::config::AppConfig;
//!
//! let core = Core::init(&AppConfig::default()).await?;
//! let decision = core.gate().check(required, &session).await;
//! ```

pub use kgems_domain as domain;
pub use kgems_kernel as kernel;

/// Feature slices, re-exported under one roof.
pub mod features {
    pub use kgems_audit as audit;
    pub use kgems_authz as authz;
    pub use kgems_pricing as pricing;
    pub use kgems_sequencing as sequencing;
}

pub use kgems_database::Database;
pub use kgems_logger::Logger;

use kgems_audit::ActivityTrail;
use kgems_authz::PermissionGate;
use kgems_database::DatabaseError;
use kgems_domain::config::{AppConfig, LogConfig};
use kgems_logger::{LevelFilter, LoggerError};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

/// Errors raised while wiring the core together.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Core database error: {source}")]
    Database {
        #[from]
        source: DatabaseError,
    },

    #[error("Core logging error: {source}")]
    Logger {
        #[from]
        source: LoggerError,
    },

    #[error("Core initialization error: {message}")]
    Internal { message: Cow<'static, str> },
}

/// The wired core: logging, one database session, one activity trail, one
/// gate.
#[derive(Debug, Clone)]
pub struct Core {
    db: Database,
    trail: ActivityTrail,
    gate: PermissionGate,
    logger: Option<Arc<Logger>>,
}

impl Core {
    /// Installs logging per `config.log`, connects to the configured database
    /// and wires the activity trail and permission gate on top of it.
    ///
    /// The returned [`Core`] owns the logger's worker guard; keep it alive for
    /// the lifetime of the program so buffered file logs are flushed.
    ///
    /// # Errors
    /// Returns [`CoreError::Logger`] if the logging setup is invalid and
    /// [`CoreError::Database`] if the connection, health check, or builtin
    /// migrations fail.
    pub async fn init(config: &AppConfig) -> Result<Self, CoreError> {
        let logger = init_logging(&config.log)?.map(Arc::new);

        let mut builder = Database::builder()
            .url(&config.database.url)
            .session(&config.database.namespace, &config.database.database);
        if let Some(credentials) = &config.database.credentials {
            builder = builder.auth(&credentials.username, &credentials.password);
        }
        let db = builder.init().await?;

        let trail = ActivityTrail::new(db.clone());
        let gate = PermissionGate::new(trail.clone());

        info!(url = %config.database.url, "KaratGems core initialized");
        Ok(Self { db, trail, gate, logger })
    }

    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    #[must_use]
    pub const fn trail(&self) -> &ActivityTrail {
        &self.trail
    }

    #[must_use]
    pub const fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// The installed logging handle. `None` when every output is disabled or
    /// the global subscriber was already claimed elsewhere.
    #[must_use]
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_deref()
    }
}

/// Builds the tracing setup described by `config`.
///
/// Returns `Ok(None)` when every output is disabled, and also when another
/// subscriber already owns the global default (test harnesses, embedding
/// applications): the core keeps working under the subscriber that is
/// already installed.
fn init_logging(config: &LogConfig) -> Result<Option<Logger>, CoreError> {
    if !config.console && config.directory.is_none() {
        return Ok(None);
    }

    let level = config.level.parse::<LevelFilter>().map_err(|e| CoreError::Internal {
        message: format!("Invalid log level '{}': {e}", config.level).into(),
    })?;

    let mut builder = Logger::builder()
        .name("kgems")
        .console(config.console)
        .level(level)
        .max_files(config.max_files);
    if let Some(directory) = &config.directory {
        builder = builder.path(directory);
    }

    match builder.init() {
        Ok(logger) => Ok(Some(logger)),
        Err(LoggerError::Subscriber { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
