//! In-process HTTP call interception for tests.
//!
//! Tests register expectations (base path, method, path, reply) in a
//! [`Registry`], hand a [`Dispatcher`] to the code under test in place of a
//! real transport, and every outgoing request is answered from the registry.
//! Unmatched and ambiguous requests fail loudly instead of touching the
//! network.

pub mod config;
pub mod dispatch;
pub mod expectation;
pub mod fault;
pub mod response;

pub use config::{ConfigError, DispatchConfig};
pub use dispatch::{
    Dispatcher, InterceptError, InterceptService, InterceptedRequest, StubbedResponse, Transport,
};
pub use expectation::{
    Expectation, ExpectationBuilder, Method, Outcome, PendingExpectation, Registry, ReplyBody,
};
pub use fault::TransportFault;
