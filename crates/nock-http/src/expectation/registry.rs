//! Registry - in-memory store of active expectations.
//!
//! A registry is owned by the test harness and shared with the dispatcher
//! through an `Arc`. The internal lock makes single operations atomic but does
//! not isolate tests from each other: tests running in parallel must each use
//! their own registry.

use super::analysis::{analyze_expectations, AnalysisReport};
use super::types::{Expectation, Signature};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Ordered, append-only collection of expectations
#[derive(Debug, Default)]
pub struct Registry {
    expectations: RwLock<Vec<Expectation>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expectation.
    ///
    /// Duplicate signatures are accepted here and rejected when a request
    /// resolves against them.
    pub fn register(&self, expectation: Expectation) {
        debug!(
            "Registered expectation {} {}",
            expectation.method(),
            expectation.url()
        );
        self.expectations.write().push(expectation);
    }

    /// All expectations whose signature equals `signature`
    pub fn find_all(&self, signature: &Signature) -> Vec<Expectation> {
        self.expectations
            .read()
            .iter()
            .filter(|e| e.matches(signature))
            .cloned()
            .collect()
    }

    /// Remove every expectation, returning how many were dropped
    pub fn clear(&self) -> usize {
        let removed = {
            let mut expectations = self.expectations.write();
            let count = expectations.len();
            expectations.clear();
            count
        };
        if removed > 0 {
            info!("Cleared {} expectations", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.expectations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.read().is_empty()
    }

    /// Copy of the current expectations in registration order
    pub fn snapshot(&self) -> Vec<Expectation> {
        self.expectations.read().clone()
    }

    /// Report duplicate signatures and suspicious paths without touching dispatch
    pub fn analyze(&self) -> AnalysisReport {
        analyze_expectations(&self.expectations.read())
    }
}
