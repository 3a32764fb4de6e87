//! Dimension + primary entity pairs are unique across the manifest.
//!
//! A dimension is addressed in queries as `<primary entity>__<dimension>`, so
//! two semantic models sharing a primary entity cannot both declare a
//! dimension with the same name.

use std::collections::HashMap;

use super::issues::{SemanticModelElementType, ValidationIssue};
use super::namespace::element_context;
use super::rule::{RuleError, SemanticManifestValidationRule};
use crate::model::{SemanticManifest, SemanticModel};

/// primary entity name -> (dimension name -> owning semantic model name)
pub type KnownPairings = HashMap<String, HashMap<String, String>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryEntityDimensionPairs;

impl PrimaryEntityDimensionPairs {
    /// Register the pairings of one semantic model, reporting those already claimed.
    ///
    /// Models without a resolvable primary entity are skipped; reporting the
    /// missing primary entity is left to a dedicated rule.
    pub fn check_semantic_model(
        semantic_model: &SemanticModel,
        known_pairings: &mut KnownPairings,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let Some(primary_entity) = semantic_model.resolved_primary_entity() else {
            return issues;
        };

        // A freshly created map is empty, so nothing in it can collide.
        let safe = !known_pairings.contains_key(primary_entity);
        let pairings = known_pairings
            .entry(primary_entity.to_string())
            .or_default();

        for dimension in &semantic_model.dimensions {
            let claimed_by = if safe {
                None
            } else {
                pairings.get(&dimension.name)
            };

            match claimed_by {
                Some(owner) => issues.push(ValidationIssue::error(
                    Some(element_context(
                        semantic_model,
                        &dimension.name,
                        SemanticModelElementType::Dimension,
                    )),
                    format!(
                        "Duplicate dimension + primary entity pairing detected, dimension + primary entity \
                         pairings must be unique. Semantic model `{}` has a primary entity of `{}` and \
                         dimension `{}`, but this pairing is already in use on semantic model `{}`.",
                        semantic_model.name, primary_entity, dimension.name, owner
                    ),
                )),
                None => {
                    pairings.insert(dimension.name.clone(), semantic_model.name.clone());
                }
            }
        }

        issues
    }
}

impl SemanticManifestValidationRule for PrimaryEntityDimensionPairs {
    fn name(&self) -> &'static str {
        "primary_entity_dimension_pairs"
    }

    fn description(&self) -> &'static str {
        "validating there are no duplicate dimension primary entity pairs"
    }

    fn validate_manifest(
        &self,
        semantic_manifest: &SemanticManifest,
    ) -> Result<Vec<ValidationIssue>, RuleError> {
        let mut known_pairings = KnownPairings::new();
        let mut issues = Vec::new();
        for semantic_model in &semantic_manifest.semantic_models {
            issues.extend(Self::check_semantic_model(
                semantic_model,
                &mut known_pairings,
            ));
        }
        Ok(issues)
    }
}
