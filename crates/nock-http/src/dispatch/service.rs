//! `tower::Service` adapter so a dispatcher can stand in for a client's
//! connector or inner service.

use super::dispatcher::Dispatcher;
use super::types::{InterceptError, InterceptedRequest};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};
use std::future::{ready, Ready};
use std::task::{Context, Poll};
use tower::Service;

/// Answers every `http::Request` from the registry; the request body is
/// ignored.
#[derive(Debug, Clone)]
pub struct InterceptService {
    dispatcher: Dispatcher,
}

impl InterceptService {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl From<Dispatcher> for InterceptService {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}

/// Requests must carry an absolute URI
fn intercepted_request<B>(req: &Request<B>) -> Result<InterceptedRequest, InterceptError> {
    InterceptedRequest::parse(req.method().as_str(), &req.uri().to_string())
}

impl<B> Service<Request<B>> for InterceptService {
    type Response = Response<Full<Bytes>>;
    type Error = InterceptError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        ready(intercepted_request(&req).and_then(|request| self.dispatcher.intercept_http(&request)))
    }
}
