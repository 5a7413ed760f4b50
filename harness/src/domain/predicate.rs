//! Response predicates and the evaluator that checks them.
//!
//! Every predicate of a step is evaluated, and all failures are returned
//! together so one run shows everything that went wrong with a response.

use std::fmt;

use serde_json::Value;

use super::context::ScenarioContext;
use super::ports::HttpResponse;

/// Expected value for a body field.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// A fixed JSON value.
    Literal(Value),
    /// The value stored in the scenario context under this name.
    Context(String),
}

impl Expected {
    /// Expect a fixed JSON value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Expect whatever the context holds under `name`.
    pub fn context(name: impl Into<String>) -> Self {
        Self::Context(name.into())
    }

    fn resolve<'a>(&'a self, ctx: &'a ScenarioContext) -> Result<&'a Value, String> {
        match self {
            Self::Literal(value) => Ok(value),
            Self::Context(name) => ctx
                .get(name)
                .ok_or_else(|| format!("context has no value named '{name}'")),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Context(name) => write!(f, "context.{name}"),
        }
    }
}

/// Shape a body field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// A string with at least one non-whitespace character.
    NonEmptyString,
    /// An integral JSON number.
    Integer,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::NonEmptyString => value.as_str().is_some_and(|text| !text.trim().is_empty()),
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NonEmptyString => "a non-empty string",
            Self::Integer => "an integer",
        })
    }
}

/// A single pass/fail check against a response.
///
/// Body paths are JSON pointers (`/title`, `/0/id`, `""` for the root).
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Status code equals the given value.
    Status(u16),
    /// Header (case-insensitive name) equals the given value.
    Header {
        /// Header name.
        name: String,
        /// Exact expected value.
        expected: String,
    },
    /// Body field equals the expected value.
    Field {
        /// JSON pointer into the body.
        pointer: String,
        /// Expected value.
        expected: Expected,
    },
    /// Body array has exactly this many items.
    Length {
        /// JSON pointer to the array.
        pointer: String,
        /// Expected item count.
        expected: usize,
    },
    /// Body field has the given shape.
    Kind {
        /// JSON pointer into the body.
        pointer: String,
        /// Required shape.
        kind: JsonKind,
    },
    /// Body is empty: no bytes, or JSON `{}`, `[]`, or `null`.
    EmptyBody,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "status == {status}"),
            Self::Header { name, expected } => write!(f, "header {name} == {expected:?}"),
            Self::Field { pointer, expected } => write!(f, "body{pointer} == {expected}"),
            Self::Length { pointer, expected } => write!(f, "len(body{pointer}) == {expected}"),
            Self::Kind { pointer, kind } => write!(f, "body{pointer} is {kind}"),
            Self::EmptyBody => f.write_str("body is empty"),
        }
    }
}

/// A predicate that did not hold, with what was observed instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateFailure {
    /// Description of the check.
    pub predicate: String,
    /// What the response actually contained.
    pub detail: String,
}

impl PredicateFailure {
    /// Creates a failure record.
    pub fn new(predicate: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PredicateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.predicate, self.detail)
    }
}

impl Predicate {
    /// Checks this predicate against a response.
    ///
    /// `body` is the response parsed as JSON, if it parsed.
    ///
    /// # Errors
    ///
    /// Returns a [`PredicateFailure`] describing the mismatch.
    pub fn evaluate(
        &self,
        response: &HttpResponse,
        body: Option<&Value>,
        ctx: &ScenarioContext,
    ) -> Result<(), PredicateFailure> {
        let fail = |detail: String| Err(PredicateFailure::new(self.to_string(), detail));

        match self {
            Self::Status(expected) => {
                if response.status == *expected {
                    Ok(())
                } else {
                    fail(format!("observed {}", response.status))
                }
            }
            Self::Header { name, expected } => match response.header(name) {
                Some(observed) if observed == expected => Ok(()),
                Some(observed) => fail(format!("observed {observed:?}")),
                None => fail("header missing".to_owned()),
            },
            Self::Field { pointer, expected } => {
                let wanted = match expected.resolve(ctx) {
                    Ok(value) => value,
                    Err(detail) => return fail(detail),
                };
                match body_field(body, pointer) {
                    Ok(observed) if observed == wanted => Ok(()),
                    Ok(observed) => fail(format!("observed {observed}")),
                    Err(detail) => fail(detail),
                }
            }
            Self::Length { pointer, expected } => match body_field(body, pointer) {
                Ok(Value::Array(items)) if items.len() == *expected => Ok(()),
                Ok(Value::Array(items)) => fail(format!("observed {} items", items.len())),
                Ok(other) => fail(format!("observed non-array {other}")),
                Err(detail) => fail(detail),
            },
            Self::Kind { pointer, kind } => match body_field(body, pointer) {
                Ok(observed) if kind.matches(observed) => Ok(()),
                Ok(observed) => fail(format!("observed {observed}")),
                Err(detail) => fail(detail),
            },
            Self::EmptyBody => {
                if is_empty_body(response, body) {
                    Ok(())
                } else {
                    fail(format!("observed {:?}", response.body))
                }
            }
        }
    }
}

/// Evaluates every predicate and returns all failures.
pub fn evaluate_all(
    predicates: &[Predicate],
    response: &HttpResponse,
    ctx: &ScenarioContext,
) -> Vec<PredicateFailure> {
    let body = response.json();
    predicates
        .iter()
        .filter_map(|predicate| predicate.evaluate(response, body.as_ref(), ctx).err())
        .collect()
}

/// Resolves a JSON pointer against the parsed body.
pub(crate) fn body_field<'a>(body: Option<&'a Value>, pointer: &str) -> Result<&'a Value, String> {
    let body = body.ok_or_else(|| "body is not JSON".to_owned())?;
    body.pointer(pointer)
        .ok_or_else(|| format!("body has no field at '{pointer}'"))
}

fn is_empty_body(response: &HttpResponse, body: Option<&Value>) -> bool {
    if response.body.trim().is_empty() {
        return true;
    }
    match body {
        Some(Value::Object(fields)) => fields.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Null) => true,
        _ => false,
    }
}
