//! Executes one scenario's steps in order against an [`HttpTransport`].
//!
//! For each step the runner renders templates from the scenario context,
//! dispatches the request, applies the fail-on-status rule, evaluates every
//! predicate, and stores declared captures. The first failing step ends the
//! scenario; later steps are never sent.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::ports::HttpTransport;
use crate::domain::{
    PredicateFailure, Scenario, ScenarioContext, ScenarioError, ScenarioReport, Step, StepRecord,
    body_field, evaluate_all,
};

/// Result of running a scenario: its report and the final context.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    /// Pass/fail report.
    pub report: ScenarioReport,
    /// Context after the last executed step, including captures.
    pub context: ScenarioContext,
}

/// Sequential scenario executor.
pub struct ScenarioRunner<T> {
    transport: T,
}

impl<T: HttpTransport> ScenarioRunner<T> {
    /// Wraps a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs `scenario` with `context` layered under its seeded values.
    pub async fn run(&self, scenario: &Scenario, mut context: ScenarioContext) -> ScenarioRun {
        context.merge(scenario.seeded());
        let mut steps = Vec::with_capacity(scenario.steps().len());

        let mut outcome = Ok(());
        for step in scenario.steps() {
            if let Err(err) = self
                .run_step(scenario.name(), step, &mut context, &mut steps)
                .await
            {
                outcome = Err(err);
                break;
            }
        }

        match &outcome {
            Ok(()) => info!(scenario = scenario.name(), "scenario passed"),
            Err(err) => warn!(
                scenario = scenario.name(),
                kind = %err.kind(),
                error = %err,
                "scenario failed"
            ),
        }

        ScenarioRun {
            report: ScenarioReport {
                scenario: scenario.name().to_owned(),
                steps,
                outcome,
            },
            context,
        }
    }

    async fn run_step(
        &self,
        scenario: &str,
        step: &Step,
        context: &mut ScenarioContext,
        records: &mut Vec<StepRecord>,
    ) -> Result<(), ScenarioError> {
        let request = step
            .render(context)
            .map_err(|source| ScenarioError::Template {
                step: step.name().to_owned(),
                source,
            })?;
        debug!(
            scenario,
            step = step.name(),
            method = %request.method,
            path = %request.path,
            "sending request"
        );

        let started = Instant::now();
        let response = self
            .transport
            .send(&request)
            .await
            .map_err(|source| ScenarioError::Transport {
                step: step.name().to_owned(),
                source,
            })?;
        let elapsed = started.elapsed();
        info!(
            scenario,
            step = step.name(),
            method = %request.method,
            path = %request.path,
            status = response.status,
            elapsed_ms = elapsed.as_millis(),
            "step completed"
        );
        records.push(StepRecord {
            step: step.name().to_owned(),
            method: request.method,
            path: request.path,
            status: response.status,
            elapsed,
        });

        let mut failures = Vec::new();
        if step.fails_on_status() && !response.is_success() {
            failures.push(PredicateFailure::new(
                "status is 2xx",
                format!("observed {}", response.status),
            ));
        }
        failures.extend(evaluate_all(step.predicates(), &response, context));

        if failures.is_empty() {
            let body = response.json();
            for capture in step.captures() {
                match body_field(body.as_ref(), &capture.pointer) {
                    Ok(value) => context.insert(capture.name.as_str(), value.clone()),
                    Err(detail) => failures.push(PredicateFailure::new(
                        format!("capture {} from body{}", capture.name, capture.pointer),
                        detail,
                    )),
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ScenarioError::Assertion {
                step: step.name().to_owned(),
                failures,
            })
        }
    }
}
