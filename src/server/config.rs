//! Environment configuration.

use std::time::Duration;

use crate::server::error::config::ConfigError;

static DEFAULT_LIVE_API_URL: &str = "https://api.infiniteflight.com/public/v2";
static DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com";
static DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const MAX_HTTP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_FLIGHT_PLAN_CONCURRENCY: usize = 8;
const DEFAULT_LOGBOOK_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared cache; the in-memory cache is used when unset
    pub valkey_url: Option<String>,
    pub live_api_url: String,
    pub live_api_key: String,
    pub airtable_api_url: String,
    pub http_timeout_secs: u64,
    pub listen_addr: String,
    /// Maximum concurrent flight plan requests when enriching a live roster
    pub flight_plan_concurrency: usize,
    pub logbook_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: optional("VALKEY_URL"),
            live_api_url: optional("LIVE_API_URL")
                .unwrap_or_else(|| DEFAULT_LIVE_API_URL.to_string()),
            live_api_key: required("LIVE_API_KEY")?,
            airtable_api_url: optional("AIRTABLE_API_URL")
                .unwrap_or_else(|| DEFAULT_AIRTABLE_API_URL.to_string()),
            http_timeout_secs: parse_bounded(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
                1,
                MAX_HTTP_TIMEOUT_SECS,
            )?,
            listen_addr: optional("LISTEN_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            flight_plan_concurrency: parse_bounded(
                "FLIGHT_PLAN_CONCURRENCY",
                DEFAULT_FLIGHT_PLAN_CONCURRENCY,
                1,
                64,
            )?,
            logbook_queue_capacity: parse_bounded(
                "LOGBOOK_QUEUE_CAPACITY",
                DEFAULT_LOGBOOK_QUEUE_CAPACITY,
                1,
                100_000,
            )?,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bounded<T>(var: &str, default: T, min: T, max: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let Some(raw) = optional(var) else {
        return Ok(default);
    };

    let value = raw.parse::<T>().map_err(|_| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        reason: format!("'{}' is not a valid number", raw),
    })?;

    if value < min || value > max {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }

    Ok(value)
}
