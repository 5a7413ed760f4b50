//! Driven ports used by the scenario runner.

mod http_transport;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
