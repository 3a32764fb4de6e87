//! Rules normalizing measure aggregations and defaults.
//!
//! - `sum_boolean` and `count` are rewritten as `sum` over a CASE expression
//! - `median` becomes the 0.5 `percentile`
//! - measures without an aggregation time dimension inherit the model default

use super::{SemanticManifestTransformRule, TransformError, TransformResult};
use crate::model::{AggregationType, MeasureAggregationParameters, SemanticManifest};

/// Measures without `agg_time_dimension` take the semantic model default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetMeasureAggregationTimeDimensionRule;

impl SemanticManifestTransformRule for SetMeasureAggregationTimeDimensionRule {
    fn name(&self) -> &'static str {
        "set_measure_agg_time_dimension"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut semantic_manifest.semantic_models {
            let Some(default) = semantic_model.default_agg_time_dimension().map(str::to_string) else {
                continue;
            };
            for measure in &mut semantic_model.measures {
                if measure.agg_time_dimension.is_none() {
                    measure.agg_time_dimension = Some(default.clone());
                }
            }
        }
        Ok(semantic_manifest)
    }
}

/// `sum_boolean` measures become `sum` over `CASE WHEN expr THEN 1 ELSE 0 END`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanMeasureAggregationRule;

impl SemanticManifestTransformRule for BooleanMeasureAggregationRule {
    fn name(&self) -> &'static str {
        "boolean_measure_aggregation"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut semantic_manifest.semantic_models {
            for measure in &mut semantic_model.measures {
                if measure.agg != AggregationType::SumBoolean {
                    continue;
                }
                let expr = measure.expr.as_deref().unwrap_or(&measure.name);
                measure.expr = Some(format!("CASE WHEN {} THEN 1 ELSE 0 END", expr));
                measure.agg = AggregationType::Sum;
            }
        }
        Ok(semantic_manifest)
    }
}

/// `count` measures become `sum` over `CASE WHEN expr IS NOT NULL THEN 1 ELSE 0 END`.
///
/// An expression of `1` counts rows and is summed as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertCountToSumRule;

impl SemanticManifestTransformRule for ConvertCountToSumRule {
    fn name(&self) -> &'static str {
        "convert_count_to_sum"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut semantic_manifest.semantic_models {
            for measure in &mut semantic_model.measures {
                if measure.agg != AggregationType::Count {
                    continue;
                }
                let expr = measure.expr.as_deref().unwrap_or(&measure.name);
                if expr != "1" {
                    measure.expr = Some(format!("CASE WHEN {} IS NOT NULL THEN 1 ELSE 0 END", expr));
                }
                measure.agg = AggregationType::Sum;
            }
        }
        Ok(semantic_manifest)
    }
}

/// `median` measures become a continuous 0.5 `percentile`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertMedianToPercentileRule;

const MEDIAN_PERCENTILE: f64 = 0.5;

impl SemanticManifestTransformRule for ConvertMedianToPercentileRule {
    fn name(&self) -> &'static str {
        "convert_median_to_percentile"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut semantic_manifest.semantic_models {
            for measure in &mut semantic_model.measures {
                if measure.agg != AggregationType::Median {
                    continue;
                }

                let params = measure
                    .agg_params
                    .get_or_insert_with(MeasureAggregationParameters::default);
                let invalid = |message: String| TransformError::InvalidMeasure {
                    semantic_model: semantic_model.name.clone(),
                    measure: measure.name.clone(),
                    message,
                };

                if let Some(percentile) = params.percentile {
                    if percentile != MEDIAN_PERCENTILE {
                        return Err(invalid(format!(
                            "uses a median aggregation while percentile is set to {}, a conflicting value. \
                             Remove the parameter or set it to 0.5.",
                            percentile
                        )));
                    }
                }
                if params.use_discrete_percentile {
                    return Err(invalid(
                        "uses a median aggregation while use_discrete_percentile is set to true. \
                         Remove the parameter or set it to false."
                            .to_string(),
                    ));
                }

                params.percentile = Some(MEDIAN_PERCENTILE);
                measure.agg = AggregationType::Percentile;
            }
        }
        Ok(semantic_manifest)
    }
}
