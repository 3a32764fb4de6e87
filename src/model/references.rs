//! Lightweight identities for manifest objects.
//!
//! References compare and hash by name only, so they can be used as map keys
//! without dragging the referenced object along.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an element (measure, entity or dimension) of a semantic model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementReference {
    pub element_name: String,
}

impl ElementReference {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
        }
    }
}

impl fmt::Display for ElementReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_name)
    }
}

/// Reference to a measure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeasureReference {
    pub element_name: String,
}

impl MeasureReference {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
        }
    }
}

impl From<MeasureReference> for ElementReference {
    fn from(reference: MeasureReference) -> Self {
        ElementReference::new(reference.element_name)
    }
}

/// Reference to an entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    pub element_name: String,
}

impl EntityReference {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
        }
    }
}

impl From<EntityReference> for ElementReference {
    fn from(reference: EntityReference) -> Self {
        ElementReference::new(reference.element_name)
    }
}

/// Reference to a dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DimensionReference {
    pub element_name: String,
}

impl DimensionReference {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
        }
    }
}

impl From<DimensionReference> for ElementReference {
    fn from(reference: DimensionReference) -> Self {
        ElementReference::new(reference.element_name)
    }
}

/// Reference to a semantic model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticModelReference {
    pub semantic_model_name: String,
}

impl SemanticModelReference {
    pub fn new(semantic_model_name: impl Into<String>) -> Self {
        Self {
            semantic_model_name: semantic_model_name.into(),
        }
    }
}

/// Reference to an element scoped by the semantic model that declares it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticModelElementReference {
    pub semantic_model_name: String,
    pub element_name: String,
}

impl SemanticModelElementReference {
    pub fn new(semantic_model_name: impl Into<String>, element_name: impl Into<String>) -> Self {
        Self {
            semantic_model_name: semantic_model_name.into(),
            element_name: element_name.into(),
        }
    }

    pub fn semantic_model_reference(&self) -> SemanticModelReference {
        SemanticModelReference::new(self.semantic_model_name.clone())
    }
}

/// Reference to a metric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricReference {
    pub metric_name: String,
}

impl MetricReference {
    pub fn new(metric_name: impl Into<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
        }
    }
}

impl fmt::Display for MetricReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metric_name)
    }
}
