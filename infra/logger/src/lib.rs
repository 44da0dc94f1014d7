//! # Logger
//!
//! Centralized logging setup for the workspace: console output, optional
//! rolling file output with non-blocking I/O, and environment-based
//! filtering (`RUST_LOG` overrides the programmatic default).
//!
//! ## Example
//!
//! ```rust
//! # use kgems_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("kgems")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// A builder for configuring and initializing the global tracing subscriber.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl LoggerBuilder {
    /// Sets the logger name, used as the rolling-file prefix
    /// (e.g. `kgems.2026-08-23.log`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables console output.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enables rolling-file output under `path`.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the minimum level emitted when no env filter applies.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Sets the file rotation strategy (daily by default).
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Caps the number of rotated files kept on disk.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Switches file output to JSON lines.
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Adds a programmatic env filter (e.g. `kgems=debug,surrealdb=info`).
    /// `RUST_LOG` still overrides it.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// The returned [`Logger`] owns the non-blocking worker guard; keep it
    /// alive for the lifetime of the program so buffered logs are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an empty name, a
    /// zero `max_files`, or a filter that does not parse, and
    /// [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = self.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)?;

            let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);
            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(g)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard; drop only at shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Returns the underlying worker guard, if file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn builder_defaults() {
        let builder = Logger::builder().name("test-app").env_filter("kgems=debug");
        assert!(builder.console);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert_eq!(builder.env_filter.as_deref(), Some("kgems=debug"));
        assert!(builder.path.is_none());
    }

    #[test]
    #[serial]
    fn empty_name_is_rejected() {
        let err = Logger::builder().init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn file_logging_creates_the_directory() -> Result<(), LoggerError> {
        let tmp = tempdir().map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some("Failed to create temp dir".into()),
        })?;
        let log_dir = tmp.path().join("logs");

        let logger =
            Logger::builder().name("test-app").path(&log_dir).level(LevelFilter::INFO).init()?;

        tracing::info!("hello world");
        std::thread::sleep(Duration::from_millis(20));
        drop(logger);

        assert!(log_dir.exists(), "log directory should be created by logger init");
        Ok(())
    }
}
