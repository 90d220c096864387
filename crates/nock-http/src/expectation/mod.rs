//! Stubbed HTTP expectations and the registry that holds them.
//!
//! This module provides:
//! - `ExpectationBuilder` / `PendingExpectation`: fluent construction
//! - `Expectation`: an immutable (method, url, outcome) record
//! - `Registry`: the in-memory collection queried on every interception
//!
//! ## Module Structure
//!
//! - `types`: methods, reply payloads, outcomes and signatures
//! - `builder`: the fluent chain and path normalization
//! - `registry`: storage and signature lookup
//! - `analysis`: duplicate and path warnings

mod analysis;
mod builder;
mod registry;
mod types;


pub use analysis::{analyze_expectations, AnalysisReport, ExpectationWarning, WarningType};
pub use builder::{ExpectationBuilder, PendingExpectation};
pub use registry::Registry;
pub use types::{
    Expectation, Method, Outcome, ReplyBody, Signature, SyntheticError, UnsupportedMethod,
};
