//! Validation of semantic manifests.
//!
//! Rules inspect a manifest and return [`ValidationIssue`]s. Findings are
//! never raised as errors: a run collects every issue from every rule so a
//! single pass reports all problems. A rule that fails internally is reported
//! as a single `Fatal` issue by [`validate_safely`].
//!
//! Built-in rules:
//! - [`UniqueAndValidNameRule`]: names are valid and unique per namespace
//! - [`PrimaryEntityDimensionPairs`]: dimension + primary entity pairs are unique

pub mod dimension_pairs;
pub mod issues;
pub mod names;
pub mod namespace;
pub mod rule;
pub mod unique_names;
pub mod validator;

pub use dimension_pairs::{KnownPairings, PrimaryEntityDimensionPairs};
pub use issues::{
    FileContext, SemanticModelElementType, ValidationContext, ValidationIssue,
    ValidationIssueLevel, ValidationResults,
};
pub use names::{check_valid_name, is_valid_name_syntax, ReservedKeyword};
pub use rule::{validate_safely, RuleError, SemanticManifestValidationRule};
pub use unique_names::UniqueAndValidNameRule;
pub use validator::{default_rules, SemanticManifestValidationException, SemanticManifestValidator};

use crate::model::SemanticManifest;

/// Validate a manifest with the default rules.
pub fn validate(semantic_manifest: &SemanticManifest) -> ValidationResults {
    SemanticManifestValidator::default().validate_semantic_manifest(semantic_manifest)
}
