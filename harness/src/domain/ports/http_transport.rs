//! Driven port for dispatching HTTP requests to the API under test.
//!
//! The runner owns the request and response shapes so scenario logic stays
//! independent of the HTTP client. Non-2xx statuses are ordinary responses
//! here; deciding whether a status is a failure belongs to the runner.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// HTTP methods the scenarios issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the canonical upper-case method name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully rendered request ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Path relative to the API base URL, including any query string.
    pub path: String,
    /// Header name/value pairs in declaration order.
    pub headers: Vec<(String, String)>,
    /// Optional JSON payload.
    pub body: Option<Value>,
}

/// A response captured from the API under test.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Response headers keyed by lower-case name.
    pub headers: BTreeMap<String, String>,
    /// Raw response body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header, normalising the name to lower case.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Replaces the body with raw text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Replaces the body with serialised JSON.
    #[must_use]
    pub fn with_json(self, body: &Value) -> Self {
        self.with_body(body.to_string())
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parses the body as JSON, returning `None` for empty or non-JSON bodies.
    pub fn json(&self) -> Option<Value> {
        if self.body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

define_port_error! {
    /// Errors surfaced while talking to the API under test.
    ///
    /// None of these are retried; a transport failure ends the scenario.
    pub enum TransportError {
        /// The connection could not be established.
        Connect => "connection failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout => "request timed out: {message}",
        /// The transport failed after the connection was established.
        Transport => "transport failed: {message}",
        /// The request could not be built (bad URL or header).
        InvalidRequest => "request invalid: {message}",
        /// The response body could not be read.
        Decode => "response body unreadable: {message}",
    }
}

/// Port for sending one request and capturing its response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Dispatch `request` and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
