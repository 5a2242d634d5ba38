//! Runtime configuration loaded from the environment.

use std::str::FromStr;

use thiserror::Error;

/// Upper bound for `RECENT_REVIEW_DAYS`, about a century.
pub const MAX_RECENT_REVIEW_DAYS: i64 = 36_500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration, passed explicitly into the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Hour (0-23) at which a new study day begins.
    pub daily_reset_hour: u32,
    /// Window for the recent reviews in the stats response.
    pub recent_review_days: i64,
}

impl Config {
    /// Load configuration from process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let config = Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            daily_reset_hour: parse_or(&lookup, "DAILY_RESET_HOUR", 0)?,
            recent_review_days: parse_or(&lookup, "RECENT_REVIEW_DAYS", 30)?,
        };

        if config.daily_reset_hour > 23 {
            return Err(ConfigError::Invalid {
                name: "DAILY_RESET_HOUR",
                value: config.daily_reset_hour.to_string(),
            });
        }
        if !(1..=MAX_RECENT_REVIEW_DAYS).contains(&config.recent_review_days) {
            return Err(ConfigError::Invalid {
                name: "RECENT_REVIEW_DAYS",
                value: config.recent_review_days.to_string(),
            });
        }

        Ok(config)
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/study")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.daily_reset_hour, 0);
        assert_eq!(config.recent_review_days, 30);
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/study"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DAILY_RESET_HOUR", "4"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.daily_reset_hour, 4);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "x"), ("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_reset_hour_out_of_range() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "x"), ("DAILY_RESET_HOUR", "24")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DAILY_RESET_HOUR", .. }));
    }

    #[test]
    fn test_recent_review_days_bounds() {
        for value in ["0", "36501", "100000000"] {
            let err = Config::from_lookup(lookup(&[("DATABASE_URL", "x"), ("RECENT_REVIEW_DAYS", value)]))
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "RECENT_REVIEW_DAYS",
                    value: value.to_string()
                }
            );
        }

        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "x"), ("RECENT_REVIEW_DAYS", "36500")])).unwrap();
        assert_eq!(config.recent_review_days, MAX_RECENT_REVIEW_DAYS);
    }
}
