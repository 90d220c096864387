//! Expectation analysis for detecting conflicts and likely authoring mistakes.
//!
//! Dispatch stays lazy: a duplicate signature only fails once a request hits
//! it. This analysis lets a test inspect the registry up front.
//!
//! - Duplicate signature detection
//! - Repeated path separator warnings

use super::types::Expectation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Warning for a single expectation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationWarning {
    pub warning_type: WarningType,
    /// Human-readable message
    pub message: String,
    /// Registration index of the affected expectation
    pub index: usize,
    /// Index of the first expectation with the same signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// Same method and url as an earlier expectation; matching requests fail as ambiguous
    DuplicateSignature,
    /// Path contains `//`, which is matched verbatim
    RepeatedSeparator,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub warnings: Vec<ExpectationWarning>,
}

impl AnalysisReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn of_type(&self, warning_type: WarningType) -> impl Iterator<Item = &ExpectationWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.warning_type == warning_type)
    }
}

pub fn analyze_expectations(expectations: &[Expectation]) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    let mut first_seen: HashMap<_, usize> = HashMap::new();

    for (index, expectation) in expectations.iter().enumerate() {
        let signature = expectation.signature();

        if let Some(&earlier) = first_seen.get(signature) {
            report.warnings.push(ExpectationWarning {
                warning_type: WarningType::DuplicateSignature,
                message: format!(
                    "Expectation at index {index} ({} {}) has the same signature as expectation at index {earlier}",
                    expectation.method(),
                    expectation.url()
                ),
                index,
                duplicate_of: Some(earlier),
            });
        } else {
            first_seen.insert(signature, index);
        }

        if expectation.path().contains("//") {
            report.warnings.push(ExpectationWarning {
                warning_type: WarningType::RepeatedSeparator,
                message: format!(
                    "Expectation at index {index} has path '{}' with a repeated separator",
                    expectation.path()
                ),
                index,
                duplicate_of: None,
            });
        }
    }

    report
}
