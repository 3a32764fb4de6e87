// src/model/entity.rs
use crate::model::references::EntityReference;
use crate::model::types::EntityType;
use serde::{Deserialize, Serialize};

/// An entity: a join key of a semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expr: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
            description: None,
            expr: None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.entity_type == EntityType::Primary
    }

    pub fn reference(&self) -> EntityReference {
        EntityReference::new(self.name.clone())
    }
}
