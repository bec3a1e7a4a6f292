//! Configuration file parsing for `repairdesk.toml`.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = ${REPAIRDESK_PORT:-8080}
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [search]
//! default_page_size = 20
//! max_page_size = 100
//! ```
//!
//! `${VAR}` and `${VAR:-default}` are expanded from the environment before
//! parsing. Unset variables without a default are left as written.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use repairdesk_query::QueryError;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "repairdesk.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["json", "pretty", "compact"];

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading a file.
    #[error("failed to read config file: {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error.
    #[error("failed to parse config: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    /// Parsed but semantically invalid.
    #[error("invalid config value for `{field}`: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for QueryError {
    fn from(err: ConfigError) -> Self {
        QueryError::invalid_configuration(err.to_string()).with_source(err)
    }
}

/// Main configuration structure for `repairdesk.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShopConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Search paging limits.
    #[serde(default)]
    pub search: SearchConfig,
}

impl ShopConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        content.parse()
    }

    /// Load from `path` if given, else from `repairdesk.toml` in the working
    /// directory if present, else use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }
        if !LOG_FORMATS.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "logging.format",
                format!("expected one of {}", LOG_FORMATS.join(", ")),
            ));
        }
        if self.search.default_page_size == 0 {
            return Err(ConfigError::invalid("search.default_page_size", "must be positive"));
        }
        if self.search.max_page_size < self.search.default_page_size {
            return Err(ConfigError::invalid(
                "search.max_page_size",
                "must be at least search.default_page_size",
            ));
        }
        Ok(())
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl FromStr for ShopConfig {
    type Err = ConfigError;

    /// Parse configuration from a TOML string, then validate it.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let expanded = expand_env_vars(content);
        let config: Self =
            toml::from_str(&expanded).map_err(|e| ConfigError::Toml { source: e })?;
        config.validate()?;
        Ok(config)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_level")]
    pub level: String,

    /// One of json, pretty, compact.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

/// Search paging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Page size used when a request does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound on requested page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        match std::env::var(&caps[1]) {
            Ok(value) => value,
            Err(_) => match caps.get(2) {
                Some(default) => default.as_str().to_string(),
                None => caps[0].to_string(),
            },
        }
    })
    .into_owned()
}
