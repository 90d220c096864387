//! Pluggable interception point for HTTP clients.
//!
//! A client under test sends through a `dyn Transport` instead of the
//! network. In production the same seam is filled by a real client; in tests
//! it is filled by a [`Dispatcher`].

use super::dispatcher::Dispatcher;
use super::types::{InterceptError, InterceptedRequest, StubbedResponse};
use async_trait::async_trait;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: InterceptedRequest) -> Result<StubbedResponse, InterceptError>;
}

#[async_trait]
impl Transport for Dispatcher {
    /// Completes without suspending
    async fn send(&self, request: InterceptedRequest) -> Result<StubbedResponse, InterceptError> {
        self.intercept(&request)
    }
}
