// src/model/metric.rs
use crate::model::metadata::Metadata;
use crate::model::references::{MeasureReference, MetricReference};
use crate::model::types::{MetricType, TimeGranularity};
use serde::{Deserialize, Serialize};

/// A metric: a named, queryable computation over measures or other metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub type_params: MetricTypeParams,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Default granularity when querying by metric_time
    #[serde(default)]
    pub time_granularity: Option<TimeGranularity>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTypeParams {
    /// Simple and cumulative metrics
    #[serde(default)]
    pub measure: Option<MetricInputMeasure>,
    /// Ratio metrics
    #[serde(default)]
    pub numerator: Option<MetricInput>,
    #[serde(default)]
    pub denominator: Option<MetricInput>,
    /// Derived metrics
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default)]
    pub metrics: Option<Vec<MetricInput>>,
    /// Cumulative metrics
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub grain_to_date: Option<TimeGranularity>,
    /// Conversion metrics
    #[serde(default)]
    pub conversion_type_params: Option<ConversionTypeParams>,
    /// Filled by the transform pipeline
    #[serde(default)]
    pub input_measures: Vec<MetricInputMeasure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricInputMeasure {
    pub name: String,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

impl MetricInputMeasure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
            alias: None,
        }
    }

    pub fn measure_reference(&self) -> MeasureReference {
        MeasureReference::new(self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricInput {
    pub name: String,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub offset_window: Option<String>,
    #[serde(default)]
    pub offset_to_grain: Option<TimeGranularity>,
}

impl MetricInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
            alias: None,
            offset_window: None,
            offset_to_grain: None,
        }
    }

    pub fn metric_reference(&self) -> MetricReference {
        MetricReference::new(self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTypeParams {
    pub base_measure: MetricInputMeasure,
    pub conversion_measure: MetricInputMeasure,
    pub entity: String,
    #[serde(default)]
    pub window: Option<String>,
}

impl Metric {
    /// A simple metric over one measure.
    pub fn simple(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self::with_params(
            name,
            MetricType::Simple,
            MetricTypeParams {
                measure: Some(MetricInputMeasure::new(measure)),
                ..Default::default()
            },
        )
    }

    /// A derived metric computed from other metrics.
    pub fn derived<I, S>(name: impl Into<String>, expr: impl Into<String>, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_params(
            name,
            MetricType::Derived,
            MetricTypeParams {
                expr: Some(expr.into()),
                metrics: Some(inputs.into_iter().map(MetricInput::new).collect()),
                ..Default::default()
            },
        )
    }

    /// A ratio of two metrics.
    pub fn ratio(
        name: impl Into<String>,
        numerator: impl Into<String>,
        denominator: impl Into<String>,
    ) -> Self {
        Self::with_params(
            name,
            MetricType::Ratio,
            MetricTypeParams {
                numerator: Some(MetricInput::new(numerator)),
                denominator: Some(MetricInput::new(denominator)),
                ..Default::default()
            },
        )
    }

    pub fn with_params(
        name: impl Into<String>,
        metric_type: MetricType,
        type_params: MetricTypeParams,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            metric_type,
            type_params,
            filter: None,
            label: None,
            time_granularity: None,
            metadata: None,
        }
    }

    pub fn with_time_granularity(mut self, time_granularity: TimeGranularity) -> Self {
        self.time_granularity = Some(time_granularity);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn reference(&self) -> MetricReference {
        MetricReference::new(self.name.clone())
    }

    /// Measures this metric reads directly (not through other metrics).
    pub fn direct_measure_inputs(&self) -> Vec<&MetricInputMeasure> {
        let params = &self.type_params;
        let mut inputs: Vec<&MetricInputMeasure> = params.measure.iter().collect();
        if let Some(conversion) = &params.conversion_type_params {
            inputs.push(&conversion.base_measure);
            inputs.push(&conversion.conversion_measure);
        }
        inputs
    }

    /// Metrics this metric is computed from.
    pub fn metric_inputs(&self) -> Vec<&MetricInput> {
        let params = &self.type_params;
        match self.metric_type {
            MetricType::Ratio => params
                .numerator
                .iter()
                .chain(params.denominator.iter())
                .collect(),
            MetricType::Derived => params.metrics.iter().flatten().collect(),
            MetricType::Simple | MetricType::Cumulative | MetricType::Conversion => Vec::new(),
        }
    }
}
