//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest-backed transport for the API under test
//!
//! Adapters translate between domain request/response shapes and client
//! library types. They contain no scenario logic.

pub mod http;
