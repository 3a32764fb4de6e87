// src/model/semantic_model.rs
use crate::model::dimension::Dimension;
use crate::model::entity::Entity;
use crate::model::measure::Measure;
use crate::model::metadata::Metadata;
use crate::model::references::SemanticModelReference;
use serde::{Deserialize, Serialize};

/// A semantic model: measures, entities and dimensions over one relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticModel {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub node_relation: Option<NodeRelation>,
    #[serde(default)]
    pub defaults: Option<SemanticModelDefaults>,
    /// Explicit primary entity (otherwise taken from a primary-typed entity)
    #[serde(default)]
    pub primary_entity: Option<String>,
    #[serde(default)]
    pub measures: Vec<Measure>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// The warehouse relation a semantic model reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRelation {
    pub alias: String,
    pub schema_name: String,
    #[serde(default)]
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SemanticModelDefaults {
    #[serde(default)]
    pub agg_time_dimension: Option<String>,
}

impl SemanticModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            node_relation: None,
            defaults: None,
            primary_entity: None,
            measures: Vec::new(),
            entities: Vec::new(),
            dimensions: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_primary_entity(mut self, primary_entity: impl Into<String>) -> Self {
        self.primary_entity = Some(primary_entity.into());
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_agg_time_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.defaults = Some(SemanticModelDefaults {
            agg_time_dimension: Some(dimension.into()),
        });
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn reference(&self) -> SemanticModelReference {
        SemanticModelReference::new(self.name.clone())
    }

    /// The primary entity of this model.
    ///
    /// The declared `primary_entity` wins; otherwise the first entity typed
    /// `primary` is used.
    pub fn resolved_primary_entity(&self) -> Option<&str> {
        self.primary_entity.as_deref().or_else(|| {
            self.entities
                .iter()
                .find(|e| e.is_primary())
                .map(|e| e.name.as_str())
        })
    }

    pub fn default_agg_time_dimension(&self) -> Option<&str> {
        self.defaults
            .as_ref()
            .and_then(|d| d.agg_time_dimension.as_deref())
    }

    pub fn get_measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// The time dimension a measure aggregates over, if it can be resolved.
    pub fn agg_time_dimension_for(&self, measure: &Measure) -> Option<&Dimension> {
        let name = measure
            .agg_time_dimension
            .as_deref()
            .or_else(|| self.default_agg_time_dimension())?;
        self.get_dimension(name)
    }
}
