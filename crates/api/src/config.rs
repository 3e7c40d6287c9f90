use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Default access token lifetime in minutes.
const DEFAULT_JWT_EXPIRY_MINS: i64 = 60;

/// Longest accepted token lifetime in minutes (one year).
const MAX_JWT_EXPIRY_MINS: i64 = 60 * 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

/// Credentials of an admin account ensured at startup.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. Without it documents live in process memory.
    pub database_url: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `5001`                   |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `DATABASE_URL`             | unset (in-memory store)  |
    /// | `JWT_SECRET`               | **required**             |
    /// | `JWT_EXPIRY_MINS`          | `60` (1 ..= 525600)      |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | unset                    |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | unset                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 5001u16)?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let jwt = JwtConfig {
            secret: var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            expiry_mins: parse_or(
                "JWT_EXPIRY_MINS",
                var("JWT_EXPIRY_MINS"),
                DEFAULT_JWT_EXPIRY_MINS,
            )?,
        };
        if !(1..=MAX_JWT_EXPIRY_MINS).contains(&jwt.expiry_mins) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_MINS",
                value: jwt.expiry_mins.to_string(),
            });
        }

        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_USERNAME"),
            var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Incomplete(
                    "BOOTSTRAP_ADMIN_USERNAME",
                    "BOOTSTRAP_ADMIN_PASSWORD",
                ))
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL"),
            jwt,
            bootstrap_admin,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5001);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cors_origins.len(), 1);
        assert_eq!(config.jwt.expiry_mins, 60);
        assert!(config.database_url.is_none());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn secret_is_required() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("JWT_SECRET")));
        assert_matches!(
            load(&[("JWT_SECRET", "  ")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn invalid_port_is_reported() {
        let result = load(&[("JWT_SECRET", "s"), ("PORT", "eighty")]);
        assert_matches!(result, Err(ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("JWT_SECRET", "s"),
            ("CORS_ORIGINS", "http://a.test, http://b.test ,"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://b.test");
    }

    #[test]
    fn bootstrap_admin_needs_both_values() {
        let result = load(&[("JWT_SECRET", "s"), ("BOOTSTRAP_ADMIN_USERNAME", "root")]);
        assert_matches!(result, Err(ConfigError::Incomplete(..)));

        let config = load(&[
            ("JWT_SECRET", "s"),
            ("BOOTSTRAP_ADMIN_USERNAME", "root"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "changeme123"),
        ])
        .unwrap();
        assert_eq!(config.bootstrap_admin.unwrap().username, "root");
    }

    #[test]
    fn non_positive_expiry_is_rejected() {
        let result = load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY_MINS", "0")]);
        assert_matches!(result, Err(ConfigError::Invalid { key: "JWT_EXPIRY_MINS", .. }));
    }

    #[test]
    fn oversized_expiry_is_rejected() {
        let max = i64::MAX.to_string();
        for value in ["525601", max.as_str()] {
            let result = load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY_MINS", value)]);
            assert_matches!(result, Err(ConfigError::Invalid { key: "JWT_EXPIRY_MINS", .. }));
        }

        let config = load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY_MINS", "525600")]).unwrap();
        assert_eq!(config.jwt.expires_in_secs(), 525_600 * 60);
    }
}
