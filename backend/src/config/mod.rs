//! Central module for application-wide configuration settings.
//!
//! This module loads the listen address, database URL, model artifact path,
//! CORS origin and request body cap from the environment (optionally seeded
//! from `.env`).

use std::env;

const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";
const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_MODEL_PATH: &str = "MODEL_PATH";
const ENV_CORS_ALLOW_ORIGIN: &str = "CORS_ALLOW_ORIGIN";
const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
const DEFAULT_MODEL_PATH: &str = "model/model.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub model_path: String,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    /// `None` accepts request bodies of any size.
    pub max_body_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            cors_allow_origin: None,
            max_body_bytes: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port,
            database_url: lookup(ENV_DATABASE_URL).unwrap_or(defaults.database_url),
            model_path: lookup(ENV_MODEL_PATH).unwrap_or(defaults.model_path),
            cors_allow_origin: lookup(ENV_CORS_ALLOW_ORIGIN)
                .filter(|origin| !origin.is_empty() && origin != "*"),
            max_body_bytes: lookup(ENV_MAX_BODY_BYTES).and_then(|raw| parse_body_cap(&raw)),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `0` or an empty value means no cap. Garbage is logged and ignored.
fn parse_body_cap(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(0) => None,
        Ok(bytes) => Some(bytes),
        Err(_) => {
            tracing::warn!(value = %raw, "Invalid MAX_BODY_BYTES, accepting any body size");
            None
        }
    }
}
