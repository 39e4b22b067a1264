//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading: required variables must be present and valid or the
//! application exits with a clear error message.

use healthflow_api_fhir::ProxyMode;
use std::env;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

/// Runtime configuration for the FHIR proxy service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Postgres connection string.
    pub database_url: String,
    /// Base URL of the upstream FHIR registry.
    pub fhir_server_url: String,
    /// Whether the proxy persists locally or forwards to the registry.
    pub proxy_mode: ProxyMode,
    /// Whether the scheduled sync worker runs.
    pub sync_enabled: bool,
    /// Seconds between scheduled sync cycles.
    pub sync_interval_secs: u64,
    /// Outbound request timeout toward the registry, in seconds.
    pub upstream_timeout_secs: u64,
    /// Log filter directive.
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_or("PORT", 8090)?,
            database_url: required("DATABASE_URL")?,
            fhir_server_url: required("FHIR_SERVER_URL")?,
            proxy_mode: match env::var("PROXY_MODE") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|message| ConfigError::InvalidValue {
                        var: "PROXY_MODE",
                        message,
                    })?,
                Err(_) => ProxyMode::default(),
            },
            sync_enabled: parsed_or("SYNC_ENABLED", true)?,
            sync_interval_secs: parsed_or("SYNC_INTERVAL_SECS", 900)?,
            upstream_timeout_secs: parsed_or("UPSTREAM_TIMEOUT_SECS", 30)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn parsed_or<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_display() {
        let err = ConfigError::MissingVar("DATABASE_URL");
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: DATABASE_URL"
        );
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            var: "PORT",
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for PORT: invalid digit found in string"
        );
    }
}
