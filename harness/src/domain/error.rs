//! Failure taxonomy for scenario runs.

use std::fmt;

use thiserror::Error;

use super::ports::TransportError;
use super::predicate::PredicateFailure;
use super::template::TemplateError;

/// Broad category of a scenario failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A response did not meet its predicates.
    Assertion,
    /// No response was obtained.
    Transport,
    /// The scenario could not be prepared (template or session problem).
    Setup,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Assertion => "assertion",
            Self::Transport => "transport",
            Self::Setup => "setup",
        })
    }
}

/// Why a scenario failed. The first failing step ends the scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// One or more predicates did not hold.
    #[error("step '{step}' failed {} check(s): {}", .failures.len(), join(.failures))]
    Assertion {
        /// Failing step name.
        step: String,
        /// Every predicate that failed.
        failures: Vec<PredicateFailure>,
    },
    /// The request could not be completed.
    #[error("step '{step}' could not reach the API: {source}")]
    Transport {
        /// Failing step name.
        step: String,
        /// Transport failure.
        #[source]
        source: TransportError,
    },
    /// The step referenced a value the context does not hold.
    #[error("step '{step}' could not be rendered: {source}")]
    Template {
        /// Failing step name.
        step: String,
        /// Rendering failure.
        #[source]
        source: TemplateError,
    },
    /// A session-dependent scenario ran without a session.
    #[error("session unavailable: {reason}")]
    SessionUnavailable {
        /// Why no session exists.
        reason: String,
    },
}

impl ScenarioError {
    /// Category of this failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Assertion { .. } => FailureKind::Assertion,
            Self::Transport { .. } => FailureKind::Transport,
            Self::Template { .. } | Self::SessionUnavailable { .. } => FailureKind::Setup,
        }
    }

    /// Predicate failures, when this is an assertion failure.
    pub fn failures(&self) -> &[PredicateFailure] {
        match self {
            Self::Assertion { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn join(failures: &[PredicateFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
