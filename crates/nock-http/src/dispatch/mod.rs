//! Interception of outgoing requests.
//!
//! ## Module Structure
//!
//! - `types`: request/response descriptors and `InterceptError`
//! - `dispatcher`: resolution against the registry
//! - `transport`: async `Transport` seam for client code
//! - `service`: `tower::Service` adapter over `http::Request`

mod dispatcher;
mod service;
mod transport;
mod types;

pub use dispatcher::Dispatcher;
pub use service::InterceptService;
pub use transport::Transport;
pub use types::{InterceptError, InterceptedRequest, StubbedResponse};
