//! Transformation of semantic manifests into canonical form.
//!
//! A transform rule takes a manifest and returns it with defaults filled in
//! or fields normalized. Rules are grouped into phases; the
//! [`SemanticManifestTransformer`] runs phases in order and the rules of a
//! phase in order, feeding each rule the output of the previous one. Phases
//! let caller-supplied rules run between the built-in ones, e.g. a custom
//! rule can set metric granularities before the defaulting rule fills in the
//! rest.
//!
//! ```text
//! manifest ──▶ [phase 1: r1 ─▶ r2 ─▶ …] ──▶ [phase 2: …] ──▶ manifest'
//! ```
//!
//! A failing rule aborts the whole call; there is no partial application.

pub mod granularity;
pub mod input_measures;
pub mod measures;
pub mod names;
pub mod proxy_measure;
pub mod rule_set;

pub use granularity::SetMetricTimeGranularityRule;
pub use input_measures::AddInputMetricMeasuresRule;
pub use measures::{
    BooleanMeasureAggregationRule, ConvertCountToSumRule, ConvertMedianToPercentileRule,
    SetMeasureAggregationTimeDimensionRule,
};
pub use names::LowerCaseNamesRule;
pub use proxy_measure::ProxyMeasureRule;
pub use rule_set::DefaultTransformRuleSet;

use thiserror::Error;

use crate::model::SemanticManifest;

/// Error raised by a transform rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Metric `{metric}` references unknown metric `{input}`")]
    UnknownMetric { metric: String, input: String },

    #[error("Metric inputs form a cycle: {}", .cycle.join(" -> "))]
    MetricCycle { cycle: Vec<String> },

    #[error("Measure `{measure}` in semantic model `{semantic_model}`: {message}")]
    InvalidMeasure {
        semantic_model: String,
        measure: String,
        message: String,
    },

    #[error("Cannot have metric with the same name as a measure (`{name}`) that is not a proxy for that measure")]
    ProxyMetricConflict { name: String },

    #[error("Transform rule `{rule}` failed: {message}")]
    RuleFailed { rule: String, message: String },
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// A transformation applied to a whole manifest.
///
/// Rules are stateless. Built-in rules are idempotent: applying one to its
/// own output changes nothing.
pub trait SemanticManifestTransformRule: Send + Sync {
    /// Stable name used to skip the rule from configuration.
    fn name(&self) -> &'static str;

    fn transform_model(&self, semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest>;
}

/// An ordered list of rules run as one phase.
pub type RuleSequence = Vec<Box<dyn SemanticManifestTransformRule>>;

/// Runs phases of transform rules over a manifest.
pub struct SemanticManifestTransformer;

impl SemanticManifestTransformer {
    /// Apply every phase in order, and every rule of a phase in order.
    pub fn transform(
        semantic_manifest: SemanticManifest,
        ordered_rule_sequences: &[RuleSequence],
    ) -> TransformResult<SemanticManifest> {
        let mut manifest = semantic_manifest;
        for (phase, rules) in ordered_rule_sequences.iter().enumerate() {
            for rule in rules {
                tracing::debug!(phase, rule = rule.name(), "applying transform rule");
                manifest = rule.transform_model(manifest).inspect_err(|err| {
                    tracing::error!(phase, rule = rule.name(), error = %err, "transform rule failed");
                })?;
            }
        }
        tracing::info!(
            phases = ordered_rule_sequences.len(),
            semantic_models = manifest.semantic_models.len(),
            metrics = manifest.metrics.len(),
            "transformed semantic manifest"
        );
        Ok(manifest)
    }
}

/// Apply the default rule set.
pub fn transform_with_defaults(semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
    SemanticManifestTransformer::transform(semantic_manifest, &DefaultTransformRuleSet::all_rules())
}
