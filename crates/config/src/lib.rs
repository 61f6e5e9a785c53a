//! Configuration loading and validation for the biblioteca service.
//!
//! Configuration is layered, lowest priority first:
//! 1. Compiled defaults: loopback listener, database under the platform data
//!    directory.
//! 2. `config.toml` in the platform config directory for this application.
//! 3. `biblioteca.toml` in the working directory.
//! 4. Environment variables prefixed `BIBLIOTECA_`, with `__` separating
//!    sections (e.g. `BIBLIOTECA_HTTP__LISTEN=0.0.0.0:8080`).
//!
//! Command line flags are applied on top of the extracted [`Config`] by the
//! binary; they are not a figment layer.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "BIBLIOTECA_";
/// Configuration file picked up from the working directory.
const LOCAL_FILE: &str = "biblioteca.toml";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Socket address the server binds to.
    pub listen: SocketAddr,
}

/// Catalog database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file. Created on first run.
    pub path: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Tracing filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { listen: SocketAddr::from(([127, 0, 0, 1], 8080)) }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        // Falls back to the working directory on platforms where no home
        // directory can be determined.
        let path = ProjectDirs::from("", "", "biblioteca")
            .map(|dirs| dirs.data_dir().join("catalog.sqlite"))
            .unwrap_or_else(|| PathBuf::from("catalog.sqlite"));
        Self { path }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl Config {
    /// Load configuration from the default locations and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `file` instead of the default locations.
    ///
    /// An explicitly requested file must exist; the default locations are
    /// optional and silently skipped when absent.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::FileNotFound(path.to_path_buf()));
                }
                tracing::debug!(path = %path.display(), "reading configuration file");
                figment = figment.merge(Toml::file(path));
            },
            None => {
                if let Some(path) = Self::user_config_file() {
                    figment = figment.merge(Toml::file(path));
                }
                figment = figment.merge(Toml::file(LOCAL_FILE));
            },
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// `config.toml` inside the platform config directory, if one exists for
    /// the current user.
    fn user_config_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "biblioteca").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Semantic checks that type-level deserialization cannot express.
    fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("database path is empty"));
        }
        if self.log.filter.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("log filter is blank"));
        }
        Ok(())
    }
}
