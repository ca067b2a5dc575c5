//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! Configuration is read once at startup and handed to the components that
//! need it; nothing here is global.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub inegi: InegiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built dashboard bundle (Trunk output)
    #[serde(default = "default_dashboard_dir")]
    pub dashboard_dir: PathBuf,

    /// Allowed CORS origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_dashboard_dir() -> PathBuf {
    PathBuf::from("bie-ui/dist")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dashboard_dir: default_dashboard_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// INEGI BIE API configuration
#[derive(Clone, Deserialize)]
pub struct InegiConfig {
    /// Access token issued by INEGI
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Geographic area code (0700 = national)
    #[serde(default = "default_geography")]
    pub geography: String,

    /// Ask only for the most recent observation
    #[serde(default)]
    pub recent_only: bool,

    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://www.inegi.org.mx/app/api/indicadores/desarrolladores/jsonxml".to_string()
}

fn default_language() -> String {
    "es".to_string()
}

fn default_geography() -> String {
    "0700".to_string()
}

fn default_source() -> String {
    "BIE".to_string()
}

fn default_version() -> String {
    "2.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for InegiConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
            language: default_language(),
            geography: default_geography(),
            recent_only: false,
            source: default_source(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for InegiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InegiConfig")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("geography", &self.geography)
            .field("recent_only", &self.recent_only)
            .field("source", &self.source)
            .field("version", &self.version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values people leave in config templates instead of a real token
const PLACEHOLDER_TOKENS: [&str; 2] = ["TOKEN_AQUI", "\""];

impl InegiConfig {
    /// Validate the configured token.
    ///
    /// A missing or placeholder token is fatal: the server must not start
    /// without one.
    pub fn access_token(&self) -> Result<AccessToken, ConfigError> {
        let raw = self.token.as_deref().map(str::trim).unwrap_or_default();

        if raw.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if PLACEHOLDER_TOKENS.contains(&raw) {
            return Err(ConfigError::PlaceholderToken(raw.to_string()));
        }

        Ok(AccessToken(raw.to_string()))
    }
}

/// Validated INEGI access token.
///
/// `Debug` and `Display` are redacted so the token never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development
    #[default]
    Pretty,
    /// One JSON object per line, for production
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations, falling back to defaults plus environment
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_with_env(&path),
            None => Self::from_env(),
        }
    }

    /// First existing config file in the usual locations
    pub fn default_path() -> Option<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("bie-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];
        find_existing(candidates.into_iter().flatten())
    }

    /// Built-in defaults with environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// `BIE_API_PORT` takes precedence over the bare `PORT` variable.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(host) = lookup("BIE_API_HOST") {
            self.api.host = host;
        }
        for var in ["PORT", "BIE_API_PORT"] {
            if let Some(port) = lookup(var) {
                self.api.port = parse_env(var, &port)?;
            }
        }
        if let Some(dir) = lookup("BIE_DASHBOARD_DIR") {
            self.api.dashboard_dir = PathBuf::from(dir);
        }

        // INEGI overrides
        if let Some(token) = lookup("INEGI_TOKEN") {
            self.inegi.token = Some(token);
        }
        if let Some(url) = lookup("INEGI_BASE_URL") {
            self.inegi.base_url = url;
        }
        if let Some(timeout) = lookup("INEGI_TIMEOUT_SECS") {
            self.inegi.timeout_secs = parse_env("INEGI_TIMEOUT_SECS", &timeout)?;
        }

        // Logging overrides
        if let Some(level) = lookup("BIE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BIE_LOG_FORMAT") {
            self.logging.format = parse_env("BIE_LOG_FORMAT", &format)?;
        }

        Ok(())
    }
}

fn find_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.exists())
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    #[error("INEGI access token is missing (set INEGI_TOKEN or [inegi].token)")]
    MissingToken,

    #[error("INEGI access token is still the placeholder {0:?}")]
    PlaceholderToken(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# BIE Dashboard Configuration
#
# Environment variables override these settings:
# - BIE_API_HOST, BIE_API_PORT (or PORT), BIE_DASHBOARD_DIR
# - INEGI_TOKEN, INEGI_BASE_URL, INEGI_TIMEOUT_SECS
# - BIE_LOG_LEVEL, BIE_LOG_FORMAT

[api]
host = "0.0.0.0"
port = 8050

# Trunk output of the bie-ui crate
dashboard_dir = "bie-ui/dist"

# Allowed CORS origins (empty = permissive)
cors_origins = []

[inegi]
# Token from https://www.inegi.org.mx/app/api/indicadores/
token = "TOKEN_AQUI"

base_url = "https://www.inegi.org.mx/app/api/indicadores/desarrolladores/jsonxml"
language = "es"

# 0700 = national
geography = "0700"
recent_only = false
source = "BIE"
version = "2.0"

# Upstream request timeout in seconds
timeout_secs = 30

[logging]
# trace, debug, info, warn, error
level = "info"

# pretty (development) or json (production)
format = "pretty"
"#
    .to_string()
}
