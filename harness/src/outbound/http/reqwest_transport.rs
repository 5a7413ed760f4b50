//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: URL joining, header and JSON
//! body serialisation, the request timeout, and client error mapping. Every
//! status, including 4xx and 5xx, is returned as a normal response.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};

use crate::domain::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Transport that sends every request relative to one base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.text().await.map_err(map_body_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Appends `path` (with any query string) to the base URL's own path.
fn join_url(base: &Url, path: &str) -> Result<Url, TransportError> {
    if !path.starts_with('/') {
        return Err(TransportError::invalid_request(format!(
            "request path must start with '/': {path}"
        )));
    }
    let joined = format!("{}{path}", base.as_str().trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|error| TransportError::invalid_request(format!("invalid URL {joined}: {error}")))
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(text) = value.to_str() else {
            continue;
        };
        collected
            .entry(name.as_str().to_owned())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(text);
            })
            .or_insert_with(|| text.to_owned());
    }
    collected
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::connect(error.to_string())
    } else if error.is_builder() {
        TransportError::invalid_request(error.to_string())
    } else {
        TransportError::transport(error.to_string())
    }
}

fn map_body_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::decode(error.to_string())
    }
}
