//! Collection of the names that share a namespace.
//!
//! Two scopes exist: the elements of one semantic model (measures, entities
//! and dimensions share a namespace) and the top-level objects of a manifest
//! (semantic models and metrics each form their own namespace).

use std::fmt;

use super::issues::{FileContext, SemanticModelElementType, ValidationContext};
use crate::model::{
    ElementReference, MetricReference, SemanticManifest, SemanticModel,
    SemanticModelElementReference, SemanticModelReference,
};

/// Kind of a named object, as reported in duplicate-name messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    Element(SemanticModelElementType),
    SemanticModel,
    Metric,
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceKind::Element(element_type) => write!(f, "{}", element_type),
            NamespaceKind::SemanticModel => write!(f, "semantic model"),
            NamespaceKind::Metric => write!(f, "metric"),
        }
    }
}

/// A named object together with where it was declared.
#[derive(Debug, Clone)]
pub struct NamespaceEntry {
    pub reference: ElementReference,
    pub kind: NamespaceKind,
    pub context: ValidationContext,
}

impl NamespaceEntry {
    pub fn name(&self) -> &str {
        &self.reference.element_name
    }
}

/// Elements of a semantic model: measures, then entities, then dimensions,
/// each in declaration order.
pub fn collect_semantic_model_elements(semantic_model: &SemanticModel) -> Vec<NamespaceEntry> {
    let measures = semantic_model
        .measures
        .iter()
        .map(|m| (m.name.as_str(), SemanticModelElementType::Measure));
    let entities = semantic_model
        .entities
        .iter()
        .map(|e| (e.name.as_str(), SemanticModelElementType::Entity));
    let dimensions = semantic_model
        .dimensions
        .iter()
        .map(|d| (d.name.as_str(), SemanticModelElementType::Dimension));

    measures
        .chain(entities)
        .chain(dimensions)
        .map(|(name, element_type)| NamespaceEntry {
            reference: ElementReference::new(name),
            kind: NamespaceKind::Element(element_type),
            context: element_context(semantic_model, name, element_type),
        })
        .collect()
}

/// Semantic models of a manifest, in manifest order.
pub fn collect_semantic_models(semantic_manifest: &SemanticManifest) -> Vec<NamespaceEntry> {
    semantic_manifest
        .semantic_models
        .iter()
        .map(|semantic_model| NamespaceEntry {
            reference: ElementReference::new(semantic_model.name.clone()),
            kind: NamespaceKind::SemanticModel,
            context: ValidationContext::SemanticModel {
                file_context: FileContext::from_metadata(semantic_model.metadata.as_ref()),
                semantic_model: SemanticModelReference::new(semantic_model.name.clone()),
            },
        })
        .collect()
}

/// Metrics of a manifest, in manifest order.
pub fn collect_metrics(semantic_manifest: &SemanticManifest) -> Vec<NamespaceEntry> {
    semantic_manifest
        .metrics
        .iter()
        .map(|metric| NamespaceEntry {
            reference: ElementReference::new(metric.name.clone()),
            kind: NamespaceKind::Metric,
            context: ValidationContext::Metric {
                file_context: FileContext::from_metadata(metric.metadata.as_ref()),
                metric: MetricReference::new(metric.name.clone()),
            },
        })
        .collect()
}

/// Context for an element of a semantic model.
pub fn element_context(
    semantic_model: &SemanticModel,
    element_name: &str,
    element_type: SemanticModelElementType,
) -> ValidationContext {
    ValidationContext::SemanticModelElement {
        file_context: FileContext::from_metadata(semantic_model.metadata.as_ref()),
        semantic_model_element: SemanticModelElementReference::new(
            semantic_model.name.clone(),
            element_name,
        ),
        element_type,
    }
}
