//! crates/configs/src/lib.rs
//!
//! Layered application settings.
//!
//! Sources, lowest priority first: built-in defaults, `config/default.toml`,
//! `config/local.toml`, `MESSAGE_BOARD_*` environment variables (nested keys
//! separated by `__`, e.g. `MESSAGE_BOARD_DATABASE__URL`), and finally `PORT`.
//! A `.env` file is read for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub web: WebSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid("server.host", e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    /// May embed credentials, so it is kept out of `Debug` output.
    #[serde(deserialize_with = "secret")]
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `services=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSettings {
    /// Served under `/public`.
    pub public_dir: PathBuf,
    pub cors_allow_any_origin: bool,
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(feature = "db-sqlite")]
const DEFAULT_BACKEND: &str = "sqlite";
#[cfg(not(feature = "db-sqlite"))]
const DEFAULT_BACKEND: &str = "memory";

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("database.backend", DEFAULT_BACKEND)?
        .set_default("database.url", "sqlite://message_board.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "pretty")?
        .set_default("web.public_dir", "./public")?
        .set_default("web.cors_allow_any_origin", true)
}

fn environment() -> Environment {
    Environment::with_prefix("MESSAGE_BOARD")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults, then the optional files, then `env`, then `port`.
fn layered(env: Environment, port: Option<String>) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder_with_defaults()?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(env)
        .set_override_option("server.port", port)
}

impl Settings {
    /// Loads settings from every source.
    pub fn load() -> Result<Self, ConfigError> {
        // Only load from .env outside tests to keep them hermetic.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let builder = layered(environment(), std::env::var("PORT").ok())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, "configuration loaded");
        Ok(settings)
    }

    /// Built-in defaults only; no files, no environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Ok(builder_with_defaults()?.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_are_complete() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.database.url.expose_secret(), "sqlite://message_board.db");
        assert!(settings.web.cors_allow_any_origin);
        assert_eq!(
            settings.server.bind_address().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn backend_default_follows_features() {
        let settings = Settings::defaults().unwrap();
        let expected = if cfg!(feature = "db-sqlite") {
            StorageBackend::Sqlite
        } else {
            StorageBackend::Memory
        };
        assert_eq!(settings.database.backend, expected);
    }

    #[test]
    fn overrides_parse_into_typed_values() {
        let settings: Settings = builder_with_defaults()
            .unwrap()
            .set_override("database.backend", "memory")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .set_override("server.port", "8080")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.server.port, 8080);
    }

    fn from_vars(vars: &[(&str, &str)], port: Option<&str>) -> Settings {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        layered(environment().source(Some(vars)), port.map(String::from))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn prefixed_environment_overrides_nested_keys() {
        let settings = from_vars(
            &[
                ("MESSAGE_BOARD_DATABASE__BACKEND", "memory"),
                ("MESSAGE_BOARD_DATABASE__MAX_CONNECTIONS", "9"),
                ("MESSAGE_BOARD_LOGGING__FORMAT", "json"),
                ("MESSAGE_BOARD_SERVER__PORT", "4000"),
                ("UNRELATED_SERVER__PORT", "1"),
            ],
            None,
        );

        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert_eq!(settings.database.max_connections, 9);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.server.port, 4000);
    }

    #[test]
    fn port_variable_wins_over_everything() {
        let settings = from_vars(&[("MESSAGE_BOARD_SERVER__PORT", "4000")], Some("8081"));
        assert_eq!(settings.server.port, 8081);

        let settings = from_vars(&[], None);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn debug_output_hides_database_url() {
        let settings = Settings::defaults().unwrap();
        let rendered = format!("{:?}", settings.database);
        assert!(!rendered.contains("message_board.db"));
    }

    #[test]
    fn bad_host_is_reported() {
        let server = ServerSettings {
            host: "not a host".into(),
            port: 1,
        };
        assert!(matches!(server.bind_address(), Err(ConfigError::Invalid("server.host", _))));
    }
}
