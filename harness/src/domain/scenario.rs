//! Named, ordered sequences of steps.

use serde_json::Value;

use super::context::ScenarioContext;
use super::step::Step;

/// Shared state a scenario needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// Runs without any shared state.
    #[default]
    None,
    /// Needs the session established by registration.
    Session,
}

/// One independent test case: seeded values plus ordered steps.
///
/// # Examples
///
/// ```
/// use api_scenarios::domain::{Requirement, Scenario, Step};
///
/// let scenario = Scenario::new("Get all posts")
///     .step(Step::get("List posts", "/posts").expect_status(200));
///
/// assert_eq!(scenario.requirement(), Requirement::None);
/// assert!(scenario.matches("all posts"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    requirement: Requirement,
    seeded: ScenarioContext,
    steps: Vec<Step>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: Requirement::None,
            seeded: ScenarioContext::new(),
            steps: Vec::new(),
        }
    }

    /// Declares a dependency on the registration session.
    #[must_use]
    pub fn requires_session(mut self) -> Self {
        self.requirement = Requirement::Session;
        self
    }

    /// Seeds a context value available to every step.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.seeded.insert(name, value);
        self
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared requirement.
    pub const fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Values seeded before the first step.
    pub const fn seeded(&self) -> &ScenarioContext {
        &self.seeded
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Case-insensitive substring match against the name.
    pub fn matches(&self, filter: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&filter.trim().to_lowercase())
    }
}
