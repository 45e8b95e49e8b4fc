//! Configuration management.

use crate::observability::LogFormat;
use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default store path.
const DEFAULT_DB_PATH: &str = "notes.db";

/// Default bind host.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
const DEFAULT_PORT: u16 = 3000;

/// Main configuration for notekeep.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// Host to bind the HTTP listener to.
    pub host: String,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub db_path: Option<String>,
    /// Bind host.
    pub host: Option<String>,
    /// Bind port.
    pub port: Option<u16>,
    /// Log format: "pretty" or "json".
    pub log_format: Option<String>,
}

impl ServiceConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Startup {
            operation: "read_config_file".to_string(),
            cause: e.to_string(),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::Startup {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::default().apply_file(file))
    }

    /// Applies environment variable overrides.
    ///
    /// Reads `NOTEKEEP_DB_PATH`, `NOTEKEEP_HOST`, `NOTEKEEP_PORT`, and
    /// `NOTEKEEP_LOG_FORMAT`.
    #[must_use]
    pub fn apply_env(mut self) -> Self {
        if let Ok(db_path) = std::env::var("NOTEKEEP_DB_PATH") {
            self.db_path = PathBuf::from(db_path);
        }
        if let Ok(host) = std::env::var("NOTEKEEP_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("NOTEKEEP_PORT")
            && let Ok(port) = port.parse()
        {
            self.port = port;
        }
        if let Ok(format) = std::env::var("NOTEKEEP_LOG_FORMAT") {
            self.log_format = LogFormat::parse(&format);
        }
        self
    }

    /// Applies values from a parsed config file.
    fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(db_path) = file.db_path {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(format) = file.log_format {
            self.log_format = LogFormat::parse(&format);
        }
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Resolves the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Startup`] when the host/port pair does not form a
    /// valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| Error::Startup {
                operation: "parse_bind_addr".to_string(),
                cause: e.to_string(),
            })
    }
}
