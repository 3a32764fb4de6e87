//! The validation rule capability and the wrapper isolating rule failures.

use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use super::issues::ValidationIssue;
use crate::model::SemanticManifest;

/// An internal failure of a validation rule (not a finding about the manifest).
#[derive(Debug, Clone, Error)]
pub enum RuleError {
    #[error("{0}")]
    Internal(String),

    #[error("rule panicked: {0}")]
    Panicked(String),
}

/// A check over a whole manifest.
///
/// Rules are stateless; findings are returned as issues, never as errors.
/// `Err` is reserved for the rule itself failing.
pub trait SemanticManifestValidationRule: Send + Sync {
    /// Stable name used to enable or disable the rule.
    fn name(&self) -> &'static str;

    /// What the rule is doing, used in the message of a fatal issue.
    fn description(&self) -> &'static str;

    fn validate_manifest(
        &self,
        semantic_manifest: &SemanticManifest,
    ) -> Result<Vec<ValidationIssue>, RuleError>;
}

/// Run a check, turning an internal failure or a panic into one fatal issue.
///
/// One rule crashing must not stop the remaining rules from reporting.
pub fn validate_safely<F>(whats_being_done: &str, check: F) -> Vec<ValidationIssue>
where
    F: FnOnce() -> Result<Vec<ValidationIssue>, RuleError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(check)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(RuleError::Panicked(message))
    });

    match outcome {
        Ok(issues) => issues,
        Err(err) => {
            tracing::error!(whats_being_done, error = %err, "validation rule failed");
            vec![ValidationIssue::fatal(
                None,
                format!("An error occurred while {} - {}", whats_being_done, err),
            )]
        }
    }
}
