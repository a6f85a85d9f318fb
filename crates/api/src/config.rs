use std::str::FromStr;

use cleanpro_core::payment::DEFAULT_PROCESSING_DELAY_MS;

use crate::checkout_store::{DEFAULT_CHECKOUT_CAPACITY, DEFAULT_CHECKOUT_TTL_SECS};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(
        "PAYMENT_DELAY_MS ({payment_delay_ms}) must be shorter than \
         REQUEST_TIMEOUT_SECS ({request_timeout_secs}s)"
    )]
    PaymentDelayExceedsTimeout {
        payment_delay_ms: u64,
        request_timeout_secs: u64,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Simulated payment processing latency in milliseconds (default: `2000`).
    pub payment_delay_ms: u64,
    /// sqlite connection string (default: `sqlite://data/cleanpro.db`).
    pub database_url: String,
    /// Most checkouts held in memory at once (default: `10000`).
    pub checkout_capacity: usize,
    /// Idle checkouts older than this may be evicted (default: `86400`).
    pub checkout_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `PAYMENT_DELAY_MS`     | `2000`                      |
    /// | `DATABASE_URL`         | `sqlite://data/cleanpro.db` |
    /// | `CHECKOUT_CAPACITY`    | `10000`                     |
    /// | `CHECKOUT_TTL_SECS`    | `86400`                     |
    ///
    /// The payment delay must fit inside the request timeout, otherwise
    /// every payment request would time out before it is confirmed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 3000, "a valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30, "a valid u64")?;
        let payment_delay_ms = parse_var(
            &lookup,
            "PAYMENT_DELAY_MS",
            DEFAULT_PROCESSING_DELAY_MS,
            "a valid u64",
        )?;
        if payment_delay_ms >= request_timeout_secs.saturating_mul(1000) {
            return Err(ConfigError::PaymentDelayExceedsTimeout {
                payment_delay_ms,
                request_timeout_secs,
            });
        }

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://data/cleanpro.db".into());

        let checkout_capacity = parse_var(
            &lookup,
            "CHECKOUT_CAPACITY",
            DEFAULT_CHECKOUT_CAPACITY,
            "a positive integer",
        )?;
        if checkout_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "CHECKOUT_CAPACITY",
                value: "0".into(),
                expected: "a positive integer",
            });
        }
        let checkout_ttl_secs = parse_var(
            &lookup,
            "CHECKOUT_TTL_SECS",
            DEFAULT_CHECKOUT_TTL_SECS,
            "a valid u64",
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            payment_delay_ms,
            database_url,
            checkout_capacity,
            checkout_ttl_secs,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value,
            expected,
        }),
    }
}
