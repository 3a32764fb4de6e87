//! Names are unique within their namespace and individually valid.
//!
//! - Elements of a semantic model (measures, entities, dimensions) share one
//!   namespace per model.
//! - Semantic model names are unique among semantic models.
//! - Metric names are unique among metrics.

use std::collections::{HashMap, HashSet};

use super::issues::ValidationIssue;
use super::names::check_valid_name;
use super::namespace::{
    collect_metrics, collect_semantic_model_elements, collect_semantic_models, NamespaceKind,
};
use super::rule::{RuleError, SemanticManifestValidationRule};
use crate::model::{ElementReference, SemanticManifest, SemanticModel};

#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueAndValidNameRule;

impl UniqueAndValidNameRule {
    /// Check that the elements of one semantic model have distinct, valid names.
    ///
    /// The first declaration of a name wins; later ones are reported against
    /// it. Every name is also checked for validity, duplicates included.
    pub fn validate_semantic_model_elements(semantic_model: &SemanticModel) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let elements = collect_semantic_model_elements(semantic_model);
        let mut name_to_kind: HashMap<&ElementReference, NamespaceKind> = HashMap::new();

        for element in &elements {
            match name_to_kind.get(&element.reference) {
                Some(existing) => issues.push(ValidationIssue::error(
                    Some(element.context.clone()),
                    format!(
                        "In semantic model `{}`, can't use name `{}` for a {} when it was already used for a {}",
                        semantic_model.name,
                        element.name(),
                        element.kind,
                        existing
                    ),
                )),
                None => {
                    name_to_kind.insert(&element.reference, element.kind);
                }
            }
        }

        for element in &elements {
            issues.extend(check_valid_name(element.name(), Some(&element.context)));
        }

        issues
    }

    /// Check the names of objects that are not nested in a semantic model.
    pub fn validate_top_level_objects(semantic_manifest: &SemanticManifest) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let semantic_models = collect_semantic_models(semantic_manifest);
        for entry in &semantic_models {
            issues.extend(check_valid_name(entry.name(), Some(&entry.context)));
        }

        let mut name_to_kind: HashMap<&str, NamespaceKind> = HashMap::new();
        for entry in &semantic_models {
            match name_to_kind.get(entry.name()) {
                Some(existing) => issues.push(ValidationIssue::error(
                    Some(entry.context.clone()),
                    format!(
                        "Can't use name `{}` for a {} when it was already used for a {}",
                        entry.name(),
                        entry.kind,
                        existing
                    ),
                )),
                None => {
                    name_to_kind.insert(entry.name(), entry.kind);
                }
            }
        }

        let metrics = collect_metrics(semantic_manifest);
        let mut metric_names: HashSet<&str> = HashSet::new();
        for entry in &metrics {
            issues.extend(check_valid_name(entry.name(), Some(&entry.context)));
            if !metric_names.insert(entry.name()) {
                issues.push(ValidationIssue::error(
                    Some(entry.context.clone()),
                    format!(
                        "Can't use name `{}` for a metric when it was already used for a metric",
                        entry.name()
                    ),
                ));
            }
        }

        issues
    }
}

impl SemanticManifestValidationRule for UniqueAndValidNameRule {
    fn name(&self) -> &'static str {
        "unique_and_valid_name"
    }

    fn description(&self) -> &'static str {
        "checking that names are unique and valid"
    }

    fn validate_manifest(
        &self,
        semantic_manifest: &SemanticManifest,
    ) -> Result<Vec<ValidationIssue>, RuleError> {
        let mut issues = Self::validate_top_level_objects(semantic_manifest);
        for semantic_model in &semantic_manifest.semantic_models {
            issues.extend(Self::validate_semantic_model_elements(semantic_model));
        }
        Ok(issues)
    }
}
