//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FESTIFY_HOST` - Bind address (default: 127.0.0.1)
//! - `FESTIFY_PORT` - Listen port (default: 3000)
//! - `FESTIFY_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `FESTIFY_CATALOG_PATH` - JSON product catalog (default: bundled catalog)
//! - `FESTIFY_SESSION_TTL_SECS` - Idle time before a session and its cart expire (default: 7 days)
//! - `FESTIFY_SESSION_PURGE_SECS` - How often expired sessions are deleted (default: 60)
//! - `FESTIFY_SUGGESTION_LIMIT` - Products suggested on the cart page (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use festify_core::cart::DEFAULT_SUGGESTION_LIMIT;
use thiserror::Error;

/// Default session expiry time in seconds (7 days).
const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Default interval between expired-session sweeps, in seconds.
const DEFAULT_SESSION_PURGE_SECONDS: u64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog file; `None` uses the bundled catalog
    pub catalog_path: Option<PathBuf>,
    /// Session inactivity expiry in seconds
    pub session_ttl_seconds: i64,
    /// Seconds between sweeps that delete expired sessions
    pub session_purge_seconds: u64,
    /// Maximum number of suggested products on the cart page
    pub suggestion_limit: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: None,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_purge_seconds: DEFAULT_SESSION_PURGE_SECONDS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// the session TTL is not positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env_or("FESTIFY_HOST", defaults.host)?;
        let port = parse_env_or("FESTIFY_PORT", defaults.port)?;
        let base_url = get_env_or_default("FESTIFY_BASE_URL", &defaults.base_url);
        let catalog_path = get_optional_env("FESTIFY_CATALOG_PATH").map(PathBuf::from);
        let session_ttl_seconds =
            parse_env_or("FESTIFY_SESSION_TTL_SECS", defaults.session_ttl_seconds)?;
        validate_session_ttl(session_ttl_seconds, "FESTIFY_SESSION_TTL_SECS")?;
        let session_purge_seconds =
            parse_env_or("FESTIFY_SESSION_PURGE_SECS", defaults.session_purge_seconds)?;
        if session_purge_seconds == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FESTIFY_SESSION_PURGE_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }
        let suggestion_limit = parse_env_or("FESTIFY_SUGGESTION_LIMIT", defaults.suggestion_limit)?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            session_ttl_seconds,
            session_purge_seconds,
            suggestion_limit,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Interval between expired-session sweeps (never zero).
    #[must_use]
    pub const fn session_purge_interval(&self) -> Duration {
        Duration::from_secs(if self.session_purge_seconds == 0 {
            DEFAULT_SESSION_PURGE_SECONDS
        } else {
            self.session_purge_seconds
        })
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Reject session lifetimes that would expire carts immediately.
fn validate_session_ttl(seconds: i64, var_name: &str) -> Result<(), ConfigError> {
    if seconds <= 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be a positive number of seconds (got {seconds})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_ttl_seconds, 604_800);
        assert_eq!(config.session_purge_interval(), Duration::from_secs(60));
        assert_eq!(config.suggestion_limit, 4);
        assert!(config.catalog_path.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_is_secure() {
        let config = StorefrontConfig {
            base_url: "https://festify.example".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_zero_purge_interval_falls_back_to_default() {
        let config = StorefrontConfig {
            session_purge_seconds: 0,
            ..StorefrontConfig::default()
        };
        assert_eq!(config.session_purge_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_parse_value_invalid() {
        let err = parse_value::<u16>("FESTIFY_PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "FESTIFY_PORT"));
    }

    #[test]
    fn test_parse_value_trims() {
        assert_eq!(parse_value::<usize>("FESTIFY_SUGGESTION_LIMIT", " 6 ").unwrap(), 6);
    }

    #[test]
    fn test_validate_session_ttl() {
        assert!(validate_session_ttl(0, "TTL").is_err());
        assert!(validate_session_ttl(-5, "TTL").is_err());
        assert!(validate_session_ttl(60, "TTL").is_ok());
    }
}
