use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

pub trait ConfigErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError>;
}

impl<T> ConfigErrorExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Loads configuration from a file with environment overrides layered on top.
///
/// 1. **Base file**: `{path}.toml`/`.yaml`/... (defaults to `"kgems"` in the
///    working directory when no path is given).
/// 2. **Environment**: variables prefixed with `KGEMS__`, nested fields
///    separated by double underscores (`KGEMS__DATABASE__URL` maps to
///    `database.url`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, the environment
/// overrides are malformed, or deserialization into `T` fails.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("kgems"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder().add_source(File::from(effective_path.as_path())).add_source(
        Environment::with_prefix("KGEMS").separator("__").convert_case(config::Case::Snake),
    );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgems_domain::config::AppConfig;
    use std::io::Write;

    #[test]
    fn loads_layered_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kgems.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[database]\nurl = \"ws://db:8000\"\n\n[log]\nlevel = \"debug\"\nmax_files = 3"
        )
        .unwrap();

        let cfg: AppConfig = load_config(Some(path.with_extension(""))).unwrap();
        assert_eq!(cfg.database.url, "ws://db:8000");
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.max_files, 3);
        // untouched sections keep defaults
        assert_eq!(cfg.database.namespace, "kgems");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config::<AppConfig>(Some("/definitely/not/here/kgems")).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
    }
}
