// src/model/dimension.rs
use crate::model::references::DimensionReference;
use crate::model::types::{DimensionType, TimeGranularity};
use serde::{Deserialize, Serialize};

/// A dimension: an attribute that metrics can be grouped or filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    #[serde(rename = "type")]
    pub dimension_type: DimensionType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_partition: bool,
    #[serde(default)]
    pub expr: Option<String>,
    /// Required for time dimensions
    #[serde(default)]
    pub type_params: Option<DimensionTypeParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTypeParams {
    pub time_granularity: TimeGranularity,
}

impl Dimension {
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension_type: DimensionType::Categorical,
            description: None,
            is_partition: false,
            expr: None,
            type_params: None,
        }
    }

    pub fn time(name: impl Into<String>, time_granularity: TimeGranularity) -> Self {
        Self {
            name: name.into(),
            dimension_type: DimensionType::Time,
            description: None,
            is_partition: false,
            expr: None,
            type_params: Some(DimensionTypeParams { time_granularity }),
        }
    }

    /// Granularity of a time dimension; `None` for categorical dimensions.
    pub fn time_granularity(&self) -> Option<TimeGranularity> {
        match self.dimension_type {
            DimensionType::Time => self.type_params.as_ref().map(|p| p.time_granularity),
            DimensionType::Categorical => None,
        }
    }

    pub fn reference(&self) -> DimensionReference {
        DimensionReference::new(self.name.clone())
    }
}
