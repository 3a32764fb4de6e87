// src/model/measure.rs
use crate::model::references::MeasureReference;
use crate::model::types::AggregationType;
use serde::{Deserialize, Serialize};

/// A measure: an aggregation over a column or expression of a semantic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub agg: AggregationType,
    #[serde(default)]
    pub description: Option<String>,
    /// Create a simple metric with the same name
    #[serde(default)]
    pub create_metric: bool,
    /// SQL expression (defaults to the measure name)
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default)]
    pub agg_params: Option<MeasureAggregationParameters>,
    /// Time dimension used when aggregating over metric_time
    #[serde(default)]
    pub agg_time_dimension: Option<String>,
}

/// Extra parameters for percentile aggregations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasureAggregationParameters {
    #[serde(default)]
    pub percentile: Option<f64>,
    #[serde(default)]
    pub use_discrete_percentile: bool,
    #[serde(default)]
    pub use_approximate_percentile: bool,
}

impl Measure {
    pub fn new(name: impl Into<String>, agg: AggregationType) -> Self {
        Self {
            name: name.into(),
            agg,
            description: None,
            create_metric: false,
            expr: None,
            agg_params: None,
            agg_time_dimension: None,
        }
    }

    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }

    pub fn with_agg_time_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.agg_time_dimension = Some(dimension.into());
        self
    }

    pub fn with_create_metric(mut self, create_metric: bool) -> Self {
        self.create_metric = create_metric;
        self
    }

    pub fn reference(&self) -> MeasureReference {
        MeasureReference::new(self.name.clone())
    }
}
