//! Configuration loading for the Kolmeya tracker.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `KOLMEYA_`, producing a typed [`AppConfig`]. A handful of unprefixed names
//! (`PORT`, `DEBUG`, `WEBHOOK_BASE_URL`) are honoured as fallbacks because
//! hosting platforms set them directly.

use std::{collections::BTreeMap, env, net::SocketAddr, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const ENV_PREFIX: &str = "KOLMEYA_";

/// Unprefixed variables consulted when their `KOLMEYA_` counterpart is unset.
const LEGACY_KEYS: &[&str] = &["PORT", "DEBUG", "WEBHOOK_BASE_URL"];

/// Application configuration derived from `KOLMEYA_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
    /// Bearer key for the Kolmeya send API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the Kolmeya API; `/sms/enviar` is appended.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Public base URL under which `/clique` is reachable by SMS recipients.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Where every resolved click is redirected.
    #[serde(default = "default_click_redirect_url")]
    pub click_redirect_url: String,
    #[serde(default = "default_sms_timeout_seconds")]
    pub sms_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            host: default_host(),
            port: default_port(),
            debug: false,
            log_level: default_log_level(),
            log_format: default_log_format(),
            database_url: default_database_url(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_ms: default_db_acquire_timeout_ms(),
            api_key: None,
            api_url: default_api_url(),
            public_base_url: default_public_base_url(),
            click_redirect_url: default_click_redirect_url(),
            sms_timeout_seconds: default_sms_timeout_seconds(),
        }
    }
}

impl AppConfig {
    /// Returns the configured bind address as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Returns a redacted JSON representation (secrets are redacted).
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let mut config = self.clone();

        if config.api_key.is_some() {
            config.api_key = Some("[REDACTED]".to_string());
        }

        serde_json::to_string_pretty(&config)
    }

    /// Validates the configuration, returning an error if required settings are missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: format!("{}:{}", self.host, self.port),
                source,
            })?;

        for (field, value) in [
            ("api url", &self.api_url),
            ("public base url", &self.public_base_url),
            ("click redirect url", &self.click_redirect_url),
        ] {
            Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }

        if self.sms_timeout_seconds == 0 {
            return Err(ConfigError::InvalidSmsTimeout {
                value: self.sms_timeout_seconds,
            });
        }

        if !matches!(self.profile.as_str(), "local" | "test") && self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(())
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_database_url() -> String {
    "sqlite://kolmeya_webhook.db?mode=rwc".to_string()
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_acquire_timeout_ms() -> u64 {
    5000
}

fn default_api_url() -> String {
    "https://api.kolmeya.com.br".to_string()
}

fn default_public_base_url() -> String {
    "https://seudominio.com".to_string()
}

fn default_click_redirect_url() -> String {
    "https://sua-pagina-de-destino.com".to_string()
}

fn default_sms_timeout_seconds() -> u64 {
    30
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid port '{value}'")]
    InvalidPort { value: String },
    #[error("invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("sms timeout must be positive, got {value}")]
    InvalidSmsTimeout { value: u64 },
    #[error("Kolmeya API key is missing; set KOLMEYA_API_KEY environment variable")]
    MissingApiKey,
}

/// Loads configuration using layered `.env` files and `KOLMEYA_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layered.insert(stripped.to_string(), value);
            }
        }

        for key in LEGACY_KEYS {
            if !layered.contains_key(*key)
                && let Ok(value) = env::var(key)
            {
                layered.insert((*key).to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);

        let debug = layered
            .remove("DEBUG")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let host = take_non_empty(&mut layered, "HOST").unwrap_or_else(default_host);
        let port = match take_non_empty(&mut layered, "PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => default_port(),
        };

        let log_level = take_non_empty(&mut layered, "LOG_LEVEL").unwrap_or_else(|| {
            if debug {
                "debug".to_string()
            } else {
                default_log_level()
            }
        });

        let log_format = take_non_empty(&mut layered, "LOG_FORMAT").unwrap_or_else(|| {
            if debug {
                "pretty".to_string()
            } else {
                default_log_format()
            }
        });

        let database_url =
            take_non_empty(&mut layered, "DATABASE_URL").unwrap_or_else(default_database_url);

        let db_max_connections = layered
            .remove("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_max_connections);

        let db_acquire_timeout_ms = layered
            .remove("DB_ACQUIRE_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_db_acquire_timeout_ms);

        let api_key = take_non_empty(&mut layered, "API_KEY").map(|v| v.trim().to_string());
        let api_url = take_non_empty(&mut layered, "API_URL").unwrap_or_else(default_api_url);
        let public_base_url = take_non_empty(&mut layered, "WEBHOOK_BASE_URL")
            .unwrap_or_else(default_public_base_url);
        let click_redirect_url = take_non_empty(&mut layered, "CLICK_REDIRECT_URL")
            .unwrap_or_else(default_click_redirect_url);

        let sms_timeout_seconds = layered
            .remove("SMS_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_sms_timeout_seconds);

        let config = AppConfig {
            profile,
            host,
            port,
            debug,
            log_level,
            log_format,
            database_url,
            db_max_connections,
            db_acquire_timeout_ms,
            api_key,
            api_url,
            public_base_url,
            click_redirect_url,
            sms_timeout_seconds,
        };

        config.validate()?;

        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var("KOLMEYA_PROFILE")
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                        values.insert(stripped.to_string(), value);
                    } else if LEGACY_KEYS.contains(&key.as_str()) {
                        values.entry(key).or_insert(value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn take_non_empty(values: &mut BTreeMap<String, String>, key: &str) -> Option<String> {
    values.remove(key).filter(|v| !v.trim().is_empty())
}
