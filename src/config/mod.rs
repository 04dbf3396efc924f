//! Configuration management for database and application settings.

/// Database connection and table creation
pub mod database;

use crate::errors::{Error, Result};

/// Runtime settings resolved from the environment.
///
/// All values have defaults suitable for local development; `.env` files are
/// honored when present (loaded by the binaries before settings are read).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Database connection string
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Whether error responses include trace detail
    pub debug: bool,
}

impl Settings {
    /// Reads settings from the process environment, applying defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. `APP_DEBUG` must be
    /// `true`, `false`, `1`, or `0` when present.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "sqlite://data/store.sqlite?mode=rwc".to_string());
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let debug = match get("APP_DEBUG").as_deref() {
            Some("true" | "1") => true,
            Some("false" | "0") | None => false,
            Some(other) => {
                return Err(Error::Config {
                    message: format!("APP_DEBUG must be true or false, got `{other}`"),
                });
            }
        };

        Ok(Self {
            database_url,
            bind_addr,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.database_url, "sqlite://data/store.sqlite?mode=rwc");
        assert_eq!(settings.bind_addr, "0.0.0.0:8000");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_overrides() {
        let settings = Settings::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "BIND_ADDR" => Some("127.0.0.1:9000".to_string()),
            "APP_DEBUG" => Some("1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert!(settings.debug);
    }

    #[test]
    fn test_settings_rejects_bad_debug_flag() {
        let result = Settings::from_lookup(|key| {
            (key == "APP_DEBUG").then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
