use tracing_subscriber::EnvFilter;

use crate::utils::errors::ApiError;

/// Installs the global subscriber. `log` records from actix-web and the
/// clinic code are forwarded through the `tracing-log` bridge.
pub fn init_logging(default_filter: &str) -> Result<(), ApiError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ApiError::InternalServerError(format!("failed to initialize logging: {}", error)))
}
