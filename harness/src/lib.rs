//! End-to-end CRUD scenario harness for a users/posts REST API.
//!
//! Scenarios are ordered HTTP steps with response predicates and captures.
//! A [`Suite`] runs registration first to establish a [`domain::Session`],
//! then every other scenario through a [`ScenarioRunner`] backed by an
//! [`domain::ports::HttpTransport`].

pub mod app;
pub mod catalogue;
pub mod config;
pub mod domain;
pub mod error;
pub mod outbound;
pub mod runner;
pub mod suite;
pub mod telemetry;

pub use config::{ConfigError, HarnessSettings, load_settings};
pub use error::HarnessError;
pub use runner::{ScenarioRun, ScenarioRunner};
pub use suite::Suite;
