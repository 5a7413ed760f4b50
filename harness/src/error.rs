//! Top-level errors that abort a harness run before scenarios execute.

use fixture_data::GenerationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal setup failures. Scenario failures are reported, not raised.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Fixture generation could not produce valid data.
    #[error("fixture generation failed: {0}")]
    Fixture(#[from] GenerationError),
    /// A fixture could not be serialised as a request payload.
    #[error("fixture payload could not be serialised: {0}")]
    Payload(#[from] serde_json::Error),
}
