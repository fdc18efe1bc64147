//! Configuration module
//!
//! `AppConfig` is read once at startup from a TOML file, patched with
//! environment overrides, validated, and then handed to the server.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `database.url` value that runs the service on in-process stores.
pub const MEMORY_STORE_URL: &str = "memory";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// No database at all; records are lost on restart.
    pub fn uses_memory_stores(&self) -> bool {
        self.url.trim() == MEMORY_STORE_URL
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./companies.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HS256 signing key. Must be set, usually through `JWT_KEY`.
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    pub issuer: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: 60,
            bcrypt_cost: 12,
            issuer: "companies-service".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `companies_service=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast buffer per subscriber
    pub capacity: usize,
    /// Log every emitted event at `info`
    pub log_events: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            log_events: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub events: EventsConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    /// Read `path` (defaults if it does not exist), then apply environment
    /// overrides. Does not validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// `SERVER_ADDRESS` (host:port), `DATABASE_URL`, `JWT_KEY`, `LOG_LEVEL`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(address) = lookup("SERVER_ADDRESS") {
            let (host, port) = address.rsplit_once(':').ok_or_else(|| {
                ConfigError::Invalid(format!("SERVER_ADDRESS '{}' is not host:port", address))
            })?;
            self.server.port = port.parse().map_err(|_| {
                ConfigError::Invalid(format!("SERVER_ADDRESS '{}' has a bad port", address))
            })?;
            if !host.is_empty() {
                self.server.host = host.to_string();
            }
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_KEY") {
            self.security.jwt_secret = secret;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "security.jwt_secret is empty (set JWT_KEY)".into(),
            ));
        }
        if self.security.token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid(
                "security.token_ttl_minutes must be positive".into(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost {} is outside 4..=31",
                self.security.bcrypt_cost
            )));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        Ok(())
    }
}

/// `~/.config/companies-service/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("companies-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> AppConfig {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "secret".into();
        config
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.security.token_ttl_minutes, 60);
        assert_eq!(config.events.capacity, 1024);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [security]
            jwt_secret = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.security.jwt_secret, "abc");
        assert_eq!(config.security.bcrypt_cost, 12);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_ADDRESS", "127.0.0.1:3000"),
            ("DATABASE_URL", "postgres://db/companies"),
            ("JWT_KEY", "from-env"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.database.url, "postgres://db/companies");
        assert_eq!(config.security.jwt_secret, "from-env");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn bad_server_address_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "SERVER_ADDRESS").then(|| "localhost".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn validate_rules() {
        assert!(valid().validate().is_ok());
        assert!(AppConfig::default().validate().is_err());

        let mut config = valid();
        config.security.token_ttl_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.security.bcrypt_cost = 3;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.database.url = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn memory_url_selects_in_process_stores() {
        let mut config = valid();
        assert!(!config.database.uses_memory_stores());
        config.database.url = "memory".into();
        assert!(config.database.uses_memory_stores());
        assert!(config.validate().is_ok());

        config.database.url = "sqlite::memory:".into();
        assert!(!config.database.uses_memory_stores());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/companies-service.toml")).unwrap();
        assert_eq!(config.events.capacity, 1024);
        assert_eq!(config.security.issuer, "companies-service");
    }
}
