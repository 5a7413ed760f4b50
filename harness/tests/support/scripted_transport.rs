//! Transport double replaying queued responses and recording requests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use api_scenarios::domain::ports::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;

/// Replays queued outcomes in order; an empty queue yields a transport error.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    outcomes: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    /// Queue a response.
    pub(crate) fn respond(&self, response: HttpResponse) {
        self.push(Ok(response));
    }

    /// Queue a transport failure.
    pub(crate) fn fail(&self, error: TransportError) {
        self.push(Err(error));
    }

    /// Requests sent so far, in order.
    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .push_back(outcome);
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::transport("no scripted response left")))
    }
}
