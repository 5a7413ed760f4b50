//! One HTTP call within a scenario, with its checks and captures.

use serde_json::Value;

use super::context::ScenarioContext;
use super::ports::{HttpMethod, HttpRequest};
use super::predicate::{Expected, JsonKind, Predicate};
use super::template::{Template, TemplateError, render_json};

/// Copies a body field into the scenario context after a step succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Context name to store the value under.
    pub name: String,
    /// JSON pointer into the response body.
    pub pointer: String,
}

/// Request body: rendered against the context, or sent as given.
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Template(Value),
    Literal(Value),
}

/// A templated request plus the predicates its response must satisfy.
///
/// By default any non-2xx response fails the step. Declaring a non-2xx
/// status with [`Step::expect_status`] switches that off so the step can
/// assert the specific failure status instead.
///
/// # Examples
///
/// ```
/// use api_scenarios::domain::{Expected, Step};
///
/// let step = Step::get("Verify post", "/posts/{postId}")
///     .expect_status(200)
///     .expect_field("/title", Expected::context("title"));
///
/// assert!(step.fails_on_status());
/// assert_eq!(step.predicates().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    name: String,
    method: HttpMethod,
    path: Template,
    headers: Vec<(String, Template)>,
    body: Option<Body>,
    fail_on_status: bool,
    predicates: Vec<Predicate>,
    captures: Vec<Capture>,
}

impl Step {
    /// Creates a step with no body, headers, or checks.
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: Template::new(path),
            headers: Vec::new(),
            body: None,
            fail_on_status: true,
            predicates: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Shorthand for a `GET` step.
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Shorthand for a `POST` step.
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Shorthand for a `PUT` step.
    pub fn put(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Put, path)
    }

    /// Shorthand for a `DELETE` step.
    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, path)
    }

    /// Adds a request header whose value is a template.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Template::new(value)));
        self
    }

    /// Sets the JSON body template.
    #[must_use]
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(Body::Template(body));
        self
    }

    /// Sets a JSON body that is sent verbatim, braces included.
    #[must_use]
    pub fn literal_json_body(mut self, body: Value) -> Self {
        self.body = Some(Body::Literal(body));
        self
    }

    /// Expects the given status; non-2xx values also suppress fail-on-status.
    #[must_use]
    pub fn expect_status(mut self, status: u16) -> Self {
        if !(200..300).contains(&status) {
            self.fail_on_status = false;
        }
        self.predicates.push(Predicate::Status(status));
        self
    }

    /// Expects a header to equal `value` exactly.
    #[must_use]
    pub fn expect_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Header {
            name: name.into(),
            expected: value.into(),
        });
        self
    }

    /// Expects the body field at `pointer` to equal `expected`.
    #[must_use]
    pub fn expect_field(mut self, pointer: impl Into<String>, expected: Expected) -> Self {
        self.predicates.push(Predicate::Field {
            pointer: pointer.into(),
            expected,
        });
        self
    }

    /// Expects the array at `pointer` to hold `count` items.
    #[must_use]
    pub fn expect_len(mut self, pointer: impl Into<String>, count: usize) -> Self {
        self.predicates.push(Predicate::Length {
            pointer: pointer.into(),
            expected: count,
        });
        self
    }

    /// Expects the body field at `pointer` to have the given shape.
    #[must_use]
    pub fn expect_kind(mut self, pointer: impl Into<String>, kind: JsonKind) -> Self {
        self.predicates.push(Predicate::Kind {
            pointer: pointer.into(),
            kind,
        });
        self
    }

    /// Expects an empty body.
    #[must_use]
    pub fn expect_empty_body(mut self) -> Self {
        self.predicates.push(Predicate::EmptyBody);
        self
    }

    /// Stores the body field at `pointer` under `name` once the step passes.
    #[must_use]
    pub fn capture(mut self, name: impl Into<String>, pointer: impl Into<String>) -> Self {
        self.captures.push(Capture {
            name: name.into(),
            pointer: pointer.into(),
        });
        self
    }

    /// Step name used in logs and reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a non-2xx response fails the step before predicates run.
    pub const fn fails_on_status(&self) -> bool {
        self.fail_on_status
    }

    /// Declared predicates in order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Declared captures in order.
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Resolves every template against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the path, a header, or the body
    /// references an unknown value.
    pub fn render(&self, ctx: &ScenarioContext) -> Result<HttpRequest, TemplateError> {
        let path = self.path.render(ctx)?;
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| value.render(ctx).map(|rendered| (name.clone(), rendered)))
            .collect::<Result<Vec<_>, _>>()?;
        let body = match &self.body {
            Some(Body::Template(body)) => Some(render_json(body, ctx)?),
            Some(Body::Literal(body)) => Some(body.clone()),
            None => None,
        };

        Ok(HttpRequest {
            method: self.method,
            path,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::context::keys;

    #[rstest]
    #[case(200, true)]
    #[case(201, true)]
    #[case(401, false)]
    #[case(404, false)]
    fn declaring_a_failure_status_suppresses_fail_on_status(
        #[case] status: u16,
        #[case] fails_on_status: bool,
    ) {
        let step = Step::get("probe", "/posts").expect_status(status);
        assert_eq!(step.fails_on_status(), fails_on_status);
        assert_eq!(step.predicates(), &[Predicate::Status(status)]);
    }

    #[test]
    fn render_substitutes_path_headers_and_body() {
        let ctx = ScenarioContext::new()
            .with(keys::ACCESS_TOKEN, "tok")
            .with(keys::USER_ID, 4)
            .with(keys::POST_ID, 9)
            .with(keys::TITLE, "Hi");
        let step = Step::put("Update", "/posts/{postId}")
            .header("Authorization", "Bearer {accessToken}")
            .json_body(json!({ "userId": "{userId}", "title": "{title}" }));

        let request = step.render(&ctx).expect("rendered");

        assert_eq!(
            request,
            HttpRequest {
                method: HttpMethod::Put,
                path: "/posts/9".to_owned(),
                headers: vec![("Authorization".to_owned(), "Bearer tok".to_owned())],
                body: Some(json!({ "userId": 4, "title": "Hi" })),
            }
        );
    }

    #[test]
    fn render_fails_when_a_capture_is_missing() {
        let step = Step::get("Verify", "/posts/{postId}");
        assert_eq!(
            step.render(&ScenarioContext::new()),
            Err(TemplateError::MissingValue {
                name: keys::POST_ID.to_owned()
            })
        );
    }

    #[test]
    fn literal_bodies_skip_placeholder_rendering() {
        let body = json!({ "password": "a{b}c{", "title": "{title}" });
        let step = Step::post("Register", "/register").literal_json_body(body.clone());

        let request = step.render(&ScenarioContext::new()).expect("rendered");

        assert_eq!(request.body, Some(body));
    }

    #[test]
    fn captures_keep_declaration_order() {
        let step = Step::post("Register", "/register")
            .capture(keys::ACCESS_TOKEN, "/accessToken")
            .capture(keys::USER_ID, "/user/id");

        let names: Vec<_> = step.captures().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![keys::ACCESS_TOKEN, keys::USER_ID]);
    }
}
