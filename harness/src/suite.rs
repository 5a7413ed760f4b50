//! Ordered scenario collection with an explicit session dependency.
//!
//! Registration is held apart from the other scenarios. It runs once, before
//! anything else, whenever it is selected or any selected scenario requires a
//! session. Its captures become the [`Session`] seeded into every dependent
//! scenario's context.

use tracing::{info, warn};

use crate::domain::ports::HttpTransport;
use crate::domain::{
    Requirement, Scenario, ScenarioContext, ScenarioError, ScenarioReport, Session, SuiteReport,
};
use crate::runner::ScenarioRunner;

/// The registration scenario plus every other scenario in run order.
#[derive(Debug, Clone)]
pub struct Suite {
    registration: Scenario,
    scenarios: Vec<Scenario>,
}

impl Suite {
    /// Creates a suite whose session comes from `registration`.
    ///
    /// `registration` must capture [`keys::ACCESS_TOKEN`] and
    /// [`keys::USER_ID`].
    ///
    /// [`keys::ACCESS_TOKEN`]: crate::domain::keys::ACCESS_TOKEN
    /// [`keys::USER_ID`]: crate::domain::keys::USER_ID
    pub const fn new(registration: Scenario) -> Self {
        Self {
            registration,
            scenarios: Vec::new(),
        }
    }

    /// Appends a scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// The session-producing scenario.
    pub const fn registration(&self) -> &Scenario {
        &self.registration
    }

    /// Non-registration scenarios in run order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Whether `filter` selects at least one scenario, registration included.
    pub fn selects_any(&self, filter: Option<&str>) -> bool {
        let (selected, run_registration) = self.select(filter);
        run_registration || !selected.is_empty()
    }

    /// Scenarios matching `filter` and whether registration must run first.
    fn select(&self, filter: Option<&str>) -> (Vec<&Scenario>, bool) {
        let selected: Vec<&Scenario> = self
            .scenarios
            .iter()
            .filter(|scenario| filter.is_none_or(|f| scenario.matches(f)))
            .collect();
        let needs_session = selected
            .iter()
            .any(|scenario| scenario.requirement() == Requirement::Session);
        let run_registration =
            needs_session || filter.is_none_or(|f| self.registration.matches(f));
        (selected, run_registration)
    }

    /// Runs the scenarios selected by `filter`, or all of them.
    ///
    /// A failing scenario never stops the others. Scenarios that require a
    /// session are reported as failed without sending anything when
    /// registration did not produce one. A filter that selects nothing yields
    /// an empty report, which does not count as a success.
    pub async fn run<T: HttpTransport>(
        &self,
        runner: &ScenarioRunner<T>,
        filter: Option<&str>,
    ) -> SuiteReport {
        let (selected, run_registration) = self.select(filter);
        info!(
            selected = selected.len() + usize::from(run_registration),
            filter = filter.unwrap_or(""),
            "starting suite"
        );

        let mut report = SuiteReport::default();
        let mut session = Err("registration did not run".to_owned());
        if run_registration {
            let run = runner.run(&self.registration, ScenarioContext::new()).await;
            session = establish_session(&run.report, &run.context);
            report.scenarios.push(run.report);
        }

        for scenario in selected {
            let context = match (scenario.requirement(), &session) {
                (Requirement::None, _) => ScenarioContext::new(),
                (Requirement::Session, Ok(session)) => session.context(),
                (Requirement::Session, Err(reason)) => {
                    warn!(scenario = scenario.name(), %reason, "skipping without session");
                    report.scenarios.push(ScenarioReport::failed(
                        scenario.name(),
                        ScenarioError::SessionUnavailable {
                            reason: reason.clone(),
                        },
                    ));
                    continue;
                }
            };
            let run = runner.run(scenario, context).await;
            report.scenarios.push(run.report);
        }

        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "suite finished"
        );
        report
    }
}

fn establish_session(
    report: &ScenarioReport,
    context: &ScenarioContext,
) -> Result<Session, String> {
    if let Some(err) = report.error() {
        return Err(format!("registration failed: {err}"));
    }
    let session = Session::from_context(context).map_err(|err| err.to_string())?;
    info!(user_id = session.user_id(), "session established");
    Ok(session)
}
