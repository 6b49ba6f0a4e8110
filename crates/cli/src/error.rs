//! CLI errors

use coupon_engine::fixtures::FixtureError;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Catalog or request could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Response could not be encoded.
    #[error("failed to encode response: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
