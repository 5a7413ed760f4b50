//! Wires settings, fixtures, transport, and the catalogue into one run.

use fixture_data::FixtureGenerator;
use tracing::{error, info};

use crate::catalogue::build_suite;
use crate::config::{ConfigError, HarnessSettings};
use crate::domain::SuiteReport;
use crate::error::HarnessError;
use crate::outbound::http::ReqwestTransport;
use crate::runner::ScenarioRunner;

/// Run the catalogue against the configured API.
///
/// The fixture seed is logged so a failing run can be replayed with
/// `API_SCENARIOS_FIXTURE_SEED`.
///
/// # Errors
///
/// Returns [`HarnessError`] when configuration, fixture generation, or client
/// construction fails, or when the scenario filter selects nothing. Scenario failures are recorded in the report instead.
pub async fn run(settings: &HarnessSettings) -> Result<SuiteReport, HarnessError> {
    let base_url = settings.base_url()?;
    let timeout = settings.request_timeout()?;
    let transport = ReqwestTransport::new(base_url.clone(), timeout).map_err(|err| {
        ConfigError::Client {
            message: err.to_string(),
        }
    })?;

    let mut generator = settings
        .fixture_seed
        .map_or_else(FixtureGenerator::from_entropy, FixtureGenerator::from_seed);
    info!(
        seed = generator.seed(),
        base_url = %base_url,
        timeout_secs = timeout.as_secs(),
        "generating fixtures"
    );
    let user = generator.generate_user()?;
    let post = generator.generate_post()?;
    let suite = build_suite(&user, &post)?;
    let filter = settings.scenario_filter();
    if !suite.selects_any(filter) {
        return Err(ConfigError::UnmatchedFilter {
            filter: filter.unwrap_or_default().to_owned(),
        }
        .into());
    }

    let runner = ScenarioRunner::new(transport);
    Ok(suite.run(&runner, filter).await)
}

/// Log one line per scenario plus a summary.
pub fn log_report(report: &SuiteReport) {
    for scenario in &report.scenarios {
        match scenario.error() {
            None => info!(
                scenario = %scenario.scenario,
                steps = scenario.steps.len(),
                "passed"
            ),
            Some(err) => error!(
                scenario = %scenario.scenario,
                kind = %err.kind(),
                error = %err,
                "failed"
            ),
        }
    }
    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        "summary"
    );
}
