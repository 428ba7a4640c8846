//! Composite reliability scoring for marketplace suppliers.
//!
//! The engine combines several independently-sourced behavioral signals into a
//! deterministic 0-100 score with a coarse label, degrading gracefully when any
//! signal's backing data is unavailable. It is a library-level computation: the
//! host portal owns routing, sessions, and presentation.

pub mod config;
pub mod error;
pub mod reputation;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
pub use reputation::{
    ReputationError, ReputationScore, ReputationService, ScoreLabel, SignalBundle, SignalSources,
    SupplierId,
};

/// Load configuration from the environment and install telemetry, returning
/// the config so the host can build a [`ReputationService`] from it.
pub fn init_from_env() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}
