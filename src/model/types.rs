//! Enumerations shared across the manifest model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time granularity, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeGranularity {
    /// Every granularity, finest first.
    pub const ALL: [TimeGranularity; 11] = [
        TimeGranularity::Nanosecond,
        TimeGranularity::Microsecond,
        TimeGranularity::Millisecond,
        TimeGranularity::Second,
        TimeGranularity::Minute,
        TimeGranularity::Hour,
        TimeGranularity::Day,
        TimeGranularity::Week,
        TimeGranularity::Month,
        TimeGranularity::Quarter,
        TimeGranularity::Year,
    ];

    /// The keyword name of this granularity (uppercase).
    pub fn name(&self) -> &'static str {
        match self {
            TimeGranularity::Nanosecond => "NANOSECOND",
            TimeGranularity::Microsecond => "MICROSECOND",
            TimeGranularity::Millisecond => "MILLISECOND",
            TimeGranularity::Second => "SECOND",
            TimeGranularity::Minute => "MINUTE",
            TimeGranularity::Hour => "HOUR",
            TimeGranularity::Day => "DAY",
            TimeGranularity::Week => "WEEK",
            TimeGranularity::Month => "MONTH",
            TimeGranularity::Quarter => "QUARTER",
            TimeGranularity::Year => "YEAR",
        }
    }

    /// The lowercase value used in manifests and query text.
    pub fn value(&self) -> &'static str {
        match self {
            TimeGranularity::Nanosecond => "nanosecond",
            TimeGranularity::Microsecond => "microsecond",
            TimeGranularity::Millisecond => "millisecond",
            TimeGranularity::Second => "second",
            TimeGranularity::Minute => "minute",
            TimeGranularity::Hour => "hour",
            TimeGranularity::Day => "day",
            TimeGranularity::Week => "week",
            TimeGranularity::Month => "month",
            TimeGranularity::Quarter => "quarter",
            TimeGranularity::Year => "year",
        }
    }

    /// Keyword names of all granularities.
    pub fn list_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|g| g.name()).collect()
    }

    /// Parse a granularity from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.value().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for TimeGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Date parts that can be extracted from a time dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Dow,
    Doy,
}

impl DatePart {
    /// Parse a date part from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "year" => Some(DatePart::Year),
            "quarter" => Some(DatePart::Quarter),
            "month" => Some(DatePart::Month),
            "week" => Some(DatePart::Week),
            "day" => Some(DatePart::Day),
            "dow" => Some(DatePart::Dow),
            "doy" => Some(DatePart::Doy),
            _ => None,
        }
    }
}

/// Role of an entity within a semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Primary,
    Unique,
    Foreign,
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionType {
    Categorical,
    Time,
}

/// Aggregation applied to a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    Sum,
    Min,
    Max,
    CountDistinct,
    SumBoolean,
    Count,
    Average,
    Percentile,
    Median,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Simple,
    Ratio,
    Cumulative,
    Derived,
    Conversion,
}

impl MetricType {
    /// Whether metrics of this type are built from other metrics rather than measures.
    pub fn is_metric_composite(&self) -> bool {
        matches!(self, MetricType::Ratio | MetricType::Derived)
    }
}
