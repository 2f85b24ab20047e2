//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `fleetdash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Where the fleet tables are read from at startup.
    pub source: SourceConfig,
    /// Request identity settings.
    pub session: SessionConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in sample fleet, frozen at its reference instant.
    #[default]
    Demo,
    /// `PostgREST`-style backend.
    Rest,
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "rest" => Ok(Self::Rest),
            other => Err(ConfigError::Validation(format!(
                "unknown source kind `{other}`"
            ))),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Base URL of the REST backend; required when `kind = "rest"`.
    pub rest_url: String,
    /// API key sent to the REST backend.
    pub rest_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Employee acting for requests without an `x-fleet-user` header.
    pub default_user: u64,
}

impl Config {
    /// Load configuration from `fleetdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("fleetdash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("FLEETDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("FLEETDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some((host, port)) = var("FLEETDASH_BIND")
            .as_deref()
            .and_then(|val| val.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("FLEETDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("FLEETDASH_SOURCE") {
            self.source.kind = val.parse()?;
        }
        if let Some(val) = var("FLEETDASH_REST_URL") {
            self.source.rest_url = val;
        }
        if let Some(val) = var("FLEETDASH_REST_KEY") {
            self.source.rest_key = val;
        }
        if let Some(val) = var("FLEETDASH_DEFAULT_USER") {
            self.session.default_user = val.parse().map_err(|_| {
                ConfigError::Validation(format!("default user must be an employee id, got `{val}`"))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.source.kind == SourceKind::Rest && self.source.rest_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source.rest_url is required for the rest source".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fleetdashd=info,fleetdash=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { default_user: 1 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.source.kind, SourceKind::Demo);
        assert_eq!(config.session.default_user, 1);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [source]
            kind = 'rest'
            rest_url = 'https://fleet.example.com'
            rest_key = 'anon'

            [session]
            default_user = 2
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.source.kind, SourceKind::Rest);
        assert_eq!(config.source.rest_url, "https://fleet.example.com");
        assert_eq!(config.session.default_user, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_require_url_for_rest_source() {
        let mut config = Config::default();
        config.source.kind = SourceKind::Rest;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("FLEETDASH_BIND", "127.0.0.1:8080"),
                ("FLEETDASH_SOURCE", "REST"),
                ("FLEETDASH_REST_URL", "https://fleet.example.com"),
                ("FLEETDASH_DEFAULT_USER", "3"),
                ("RUST_LOG", "trace"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.source.kind, SourceKind::Rest);
        assert_eq!(config.session.default_user, 3);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_let_rust_log_win_over_fleetdash_log() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[("FLEETDASH_LOG", "debug"), ("RUST_LOG", "warn")]))
            .unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_reject_unknown_source_kind() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("FLEETDASH_SOURCE", "csv")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_non_numeric_default_user() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("FLEETDASH_DEFAULT_USER", "john")]));
        assert!(result.is_err());
    }

    #[test]
    fn should_format_custom_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }
}
