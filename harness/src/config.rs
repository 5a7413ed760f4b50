//! Harness configuration loaded via OrthoConfig.
//!
//! Values layer from defaults, configuration files, `API_SCENARIOS_*`
//! environment variables, and command-line flags, in increasing precedence.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Configuration problems that stop the run before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Settings could not be loaded from their sources.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// No base URL was configured.
    #[error("base URL is required (set API_SCENARIOS_BASE_URL or --base-url)")]
    MissingBaseUrl,
    /// The base URL was not an absolute http(s) URL.
    #[error("invalid base URL '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Why it was rejected.
        message: String,
    },
    /// A zero timeout would fail every request.
    #[error("request timeout must be greater than zero seconds")]
    ZeroTimeout,
    /// The scenario filter matched no scenario.
    #[error("scenario filter '{filter}' matches no scenario")]
    UnmatchedFilter {
        /// Configured filter.
        filter: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Client builder diagnostic.
        message: String,
    },
}

/// Settings controlling one harness run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API_SCENARIOS")]
pub struct HarnessSettings {
    /// Base URL of the API under test, e.g. `http://localhost:3000`.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Seed for fixture generation; random when absent.
    pub fixture_seed: Option<u64>,
    /// Case-insensitive substring selecting scenarios by name.
    pub scenario_filter: Option<String>,
}

impl HarnessSettings {
    /// Parse and validate the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] when unset and
    /// [`ConfigError::InvalidBaseUrl`] when it is not an http(s) URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let invalid = |message: String| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            message,
        };
        let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// The per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when configured as zero.
    pub const fn request_timeout(&self) -> Result<Duration, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.request_timeout_secs))
    }

    /// The scenario filter, ignoring blank values.
    pub fn scenario_filter(&self) -> Option<&str> {
        self.scenario_filter
            .as_deref()
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
    }
}

/// Load settings from `args` (program name first) and the environment.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when any source fails to parse.
pub fn load_settings<I>(args: I) -> Result<HarnessSettings, ConfigError>
where
    I: IntoIterator<Item = OsString>,
{
    HarnessSettings::load_from_iter(args).map_err(|err| ConfigError::Load {
        message: err.to_string(),
    })
}
