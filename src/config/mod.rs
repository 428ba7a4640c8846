use std::env;
use std::fmt;
use std::time::Duration;

use crate::reputation::LoaderSettings;

/// Distinguishes runtime behavior for different stages of the host service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("REPUTATION_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level =
            env::var("REPUTATION_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = ScoringConfig {
            feedback_enabled: parse_flag("REPUTATION_FEEDBACK_ENABLED", true)?,
            responsiveness_batch_ceiling: parse_number(
                "REPUTATION_RESPONSIVENESS_BATCH_CEILING",
                50,
            )?,
            per_supplier_quote_cap: parse_number("REPUTATION_PER_SUPPLIER_QUOTE_CAP", 25)?,
            loader_timeout_ms: parse_number("REPUTATION_LOADER_TIMEOUT_MS", 5_000)?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Operational overrides for the signal loaders; anything not set in the
/// environment keeps the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub feedback_enabled: bool,
    pub responsiveness_batch_ceiling: usize,
    pub per_supplier_quote_cap: usize,
    pub loader_timeout_ms: u64,
}

impl ScoringConfig {
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            feedback_enabled: self.feedback_enabled,
            responsiveness_batch_ceiling: self.responsiveness_batch_ceiling,
            per_supplier_quote_cap: self.per_supplier_quote_cap,
            loader_timeout: Duration::from_millis(self.loader_timeout_ms),
            ..LoaderSettings::default()
        }
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { key }),
        },
    }
}

fn parse_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { key: &'static str },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { key } => {
                write!(f, "{key} must be a boolean flag (true/false)")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
