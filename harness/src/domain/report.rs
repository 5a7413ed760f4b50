//! Results of scenario and suite runs.

use std::time::Duration;

use super::error::ScenarioError;
use super::ports::HttpMethod;

/// A request that received a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Step name.
    pub step: String,
    /// Request method.
    pub method: HttpMethod,
    /// Rendered request path.
    pub path: String,
    /// Response status.
    pub status: u16,
    /// Time from dispatch to response body read.
    pub elapsed: Duration,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Scenario name.
    pub scenario: String,
    /// Every step that received a response, including a failing last step.
    pub steps: Vec<StepRecord>,
    /// `Ok` when every step passed.
    pub outcome: Result<(), ScenarioError>,
}

impl ScenarioReport {
    /// Report for a scenario that failed before sending anything.
    pub fn failed(scenario: impl Into<String>, error: ScenarioError) -> Self {
        Self {
            scenario: scenario.into(),
            steps: Vec::new(),
            outcome: Err(error),
        }
    }

    /// Whether the scenario passed.
    pub const fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&ScenarioError> {
        self.outcome.as_ref().err()
    }
}

/// Outcome of a suite run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuiteReport {
    /// Scenario reports in the order the scenarios ran.
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Number of passing scenarios.
    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|r| r.passed()).count()
    }

    /// Number of failing scenarios.
    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    /// Whether at least one scenario ran and every scenario passed.
    pub fn is_success(&self) -> bool {
        !self.scenarios.is_empty() && self.scenarios.iter().all(ScenarioReport::passed)
    }

    /// Looks up a report by exact scenario name.
    pub fn find(&self, scenario: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|r| r.scenario == scenario)
    }

    /// Failing reports in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|r| !r.passed())
    }
}
