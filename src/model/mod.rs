//! Semantic manifest types.
//!
//! A manifest is the fully assembled set of semantic models and metrics for a
//! project. Parsing the authored configuration is done elsewhere; this module
//! only describes the resulting object graph.

pub mod dimension;
pub mod entity;
pub mod loader;
pub mod measure;
pub mod metadata;
pub mod metric;
pub mod references;
pub mod semantic_model;
pub mod types;

pub use dimension::{Dimension, DimensionTypeParams};
pub use entity::Entity;
pub use measure::{Measure, MeasureAggregationParameters};
pub use metadata::{FileSlice, Metadata};
pub use metric::{ConversionTypeParams, Metric, MetricInput, MetricInputMeasure, MetricTypeParams};
pub use references::{
    DimensionReference, ElementReference, EntityReference, MeasureReference, MetricReference,
    SemanticModelElementReference, SemanticModelReference,
};
pub use semantic_model::{NodeRelation, SemanticModel, SemanticModelDefaults};
pub use types::{AggregationType, DatePart, DimensionType, EntityType, MetricType, TimeGranularity};

use serde::{Deserialize, Serialize};

/// The root document: every semantic model and metric of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticManifest {
    #[serde(default)]
    pub semantic_models: Vec<SemanticModel>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub project_configuration: ProjectConfiguration,
}

/// Project-level settings carried alongside the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectConfiguration {
    #[serde(default)]
    pub time_spine_table_configurations: Vec<TimeSpineTableConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpineTableConfiguration {
    pub location: String,
    pub column_name: String,
    pub grain: TimeGranularity,
}

impl SemanticManifest {
    pub fn new(semantic_models: Vec<SemanticModel>, metrics: Vec<Metric>) -> Self {
        Self {
            semantic_models,
            metrics,
            project_configuration: ProjectConfiguration::default(),
        }
    }

    pub fn get_semantic_model(&self, name: &str) -> Option<&SemanticModel> {
        self.semantic_models.iter().find(|m| m.name == name)
    }

    pub fn get_metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Find the semantic model declaring a measure, together with the measure.
    pub fn find_measure(&self, name: &str) -> Option<(&SemanticModel, &Measure)> {
        self.semantic_models
            .iter()
            .find_map(|model| model.get_measure(name).map(|measure| (model, measure)))
    }
}
