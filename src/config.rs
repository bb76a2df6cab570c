//! Runtime configuration for hosting the coursework services.
//!
//! Configuration is read from a TOML document and may be overridden from the
//! environment:
//!
//! ```toml
//! log_filter = "coursework=debug"
//!
//! [database]
//! url = "postgres://coursework@localhost/coursework"
//! max_connections = 16
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding [`DatabaseSettings::url`].
pub const DATABASE_URL_ENV: &str = "COURSEWORK_DATABASE_URL";

/// Environment variable overriding [`CourseworkConfig::log_filter`].
pub const LOG_FILTER_ENV: &str = "COURSEWORK_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The configuration document is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No database URL was configured.
    #[error("database url must not be empty")]
    MissingDatabaseUrl,

    /// The connection pool size is zero.
    #[error("database max_connections must be at least 1")]
    ZeroConnections,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseworkConfig {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseSettings,
    /// `tracing-subscriber` filter directive.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for CourseworkConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl CourseworkConfig {
    /// Loads configuration from a TOML file, applies environment overrides,
    /// and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or
    /// when validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_path = path.as_ref();
        let content = std::fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
            path: file_path.display().to_string(),
            source,
        })?;
        let parsed = Self::parse(&content)?;
        parsed.with_env_overrides(|key| std::env::var(key).ok()).validated()
    }

    /// Loads configuration purely from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when
    /// `COURSEWORK_DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default()
            .with_env_overrides(|key| std::env::var(key).ok())
            .validated()
    }

    /// Parses a TOML document without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            self.log_filter = filter;
        }
        self
    }

    /// Checks that the configuration can be used to connect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] or
    /// [`ConfigError::ZeroConnections`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        Ok(self)
    }
}

const fn default_max_connections() -> u32 {
    10
}

fn default_log_filter() -> String {
    "info".to_owned()
}
