//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use permit_core::config::LoggingConfig;
use permit_core::error::AppError;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Calling this again once a
/// subscriber is installed does nothing.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            AppError::configuration(format!("Invalid log level '{}': {e}", config.level))
        })?,
    };

    let installed = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .try_init(),
        "pretty" => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown log format '{other}', expected 'json' or 'pretty'"
            )));
        }
    };

    if installed.is_err() {
        tracing::debug!("Subscriber already installed");
    }
    Ok(())
}
