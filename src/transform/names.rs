//! Lowercase the names of semantic models and their elements.

use super::{SemanticManifestTransformRule, TransformResult};
use crate::model::SemanticManifest;

#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCaseNamesRule;

fn lowercase_in_place(name: &mut String) {
    if name.chars().any(|c| c.is_uppercase()) {
        *name = name.to_lowercase();
    }
}

impl SemanticManifestTransformRule for LowerCaseNamesRule {
    fn name(&self) -> &'static str {
        "lower_case_names"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut semantic_manifest.semantic_models {
            lowercase_in_place(&mut semantic_model.name);
            if let Some(primary_entity) = &mut semantic_model.primary_entity {
                lowercase_in_place(primary_entity);
            }
            if let Some(agg_time_dimension) = semantic_model
                .defaults
                .as_mut()
                .and_then(|d| d.agg_time_dimension.as_mut())
            {
                lowercase_in_place(agg_time_dimension);
            }
            for measure in &mut semantic_model.measures {
                lowercase_in_place(&mut measure.name);
                if let Some(agg_time_dimension) = &mut measure.agg_time_dimension {
                    lowercase_in_place(agg_time_dimension);
                }
            }
            for entity in &mut semantic_model.entities {
                lowercase_in_place(&mut entity.name);
            }
            for dimension in &mut semantic_model.dimensions {
                lowercase_in_place(&mut dimension.name);
            }
        }
        Ok(semantic_manifest)
    }
}
