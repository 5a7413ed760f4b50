//! Scenario model: context, templates, steps, predicates, and reports.
//!
//! Everything here is transport-agnostic; requests leave through the
//! [`ports::HttpTransport`] port.

pub mod context;
mod error;
pub mod ports;
mod predicate;
mod report;
mod scenario;
mod session;
mod step;
mod template;

pub use context::{ScenarioContext, keys};
pub use error::{FailureKind, ScenarioError};
pub use predicate::{Expected, JsonKind, Predicate, PredicateFailure, evaluate_all};
pub(crate) use predicate::body_field;
pub use report::{ScenarioReport, StepRecord, SuiteReport};
pub use scenario::{Requirement, Scenario};
pub use session::{Session, SessionError};
pub use step::{Capture, Step};
pub use template::{Template, TemplateError, render_json};
