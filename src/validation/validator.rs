//! Runs a set of validation rules over a manifest and aggregates the findings.

use thiserror::Error;

use super::dimension_pairs::PrimaryEntityDimensionPairs;
use super::issues::ValidationResults;
use super::rule::{validate_safely, SemanticManifestValidationRule};
use super::unique_names::UniqueAndValidNameRule;
use crate::config::ValidationSettings;
use crate::model::SemanticManifest;

/// Raised by [`SemanticManifestValidator::checked_validations`] when blocking issues exist.
#[derive(Debug, Error)]
#[error("Found {} blocking issue(s) in the semantic manifest:\n{}", .results.errors.len(), render_errors(.results))]
pub struct SemanticManifestValidationException {
    pub results: ValidationResults,
}

fn render_errors(results: &ValidationResults) -> String {
    results
        .errors
        .iter()
        .map(|issue| format!("  - {}", issue.as_readable()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The built-in naming rules.
pub fn default_rules() -> Vec<Box<dyn SemanticManifestValidationRule>> {
    vec![
        Box::new(UniqueAndValidNameRule),
        Box::new(PrimaryEntityDimensionPairs),
    ]
}

pub struct SemanticManifestValidator {
    rules: Vec<Box<dyn SemanticManifestValidationRule>>,
    fail_on_warnings: bool,
}

impl Default for SemanticManifestValidator {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl SemanticManifestValidator {
    pub fn new(rules: Vec<Box<dyn SemanticManifestValidationRule>>) -> Self {
        Self {
            rules,
            fail_on_warnings: false,
        }
    }

    /// Default rules minus the ones disabled in settings.
    pub fn from_settings(settings: &ValidationSettings) -> Self {
        let rules = default_rules()
            .into_iter()
            .filter(|rule| !settings.disabled_rules.iter().any(|name| name == rule.name()))
            .collect();
        Self {
            rules,
            fail_on_warnings: settings.fail_on_warnings,
        }
    }

    /// Treat warnings as blocking in [`Self::checked_validations`].
    pub fn with_fail_on_warnings(mut self, fail_on_warnings: bool) -> Self {
        self.fail_on_warnings = fail_on_warnings;
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule; a rule failing internally yields a fatal issue and the
    /// remaining rules still run.
    pub fn validate_semantic_manifest(&self, semantic_manifest: &SemanticManifest) -> ValidationResults {
        let results = self.rules.iter().map(|rule| {
            let issues = validate_safely(rule.description(), || {
                rule.validate_manifest(semantic_manifest)
            });
            tracing::debug!(rule = rule.name(), issues = issues.len(), "validation rule finished");
            ValidationResults::from_issues(issues)
        });
        let merged = ValidationResults::merge(results.collect::<Vec<_>>());

        tracing::info!(
            semantic_models = semantic_manifest.semantic_models.len(),
            metrics = semantic_manifest.metrics.len(),
            "validated semantic manifest: {}",
            merged.summary()
        );
        merged
    }

    /// Validate, failing when blocking issues (or warnings, if configured) are found.
    pub fn checked_validations(
        &self,
        semantic_manifest: &SemanticManifest,
    ) -> Result<ValidationResults, SemanticManifestValidationException> {
        let mut results = self.validate_semantic_manifest(semantic_manifest);
        if self.fail_on_warnings && !results.warnings.is_empty() {
            let warnings = std::mem::take(&mut results.warnings);
            results.errors.extend(warnings);
        }
        if results.has_blocking_issues() {
            return Err(SemanticManifestValidationException { results });
        }
        Ok(results)
    }
}
