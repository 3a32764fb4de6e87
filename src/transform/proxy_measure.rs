//! Create simple metrics for measures flagged with `create_metric`.

use super::{SemanticManifestTransformRule, TransformError, TransformResult};
use crate::model::{Metric, MetricType, SemanticManifest};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyMeasureRule;

impl SemanticManifestTransformRule for ProxyMeasureRule {
    fn name(&self) -> &'static str {
        "proxy_measure"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        let mut proxies = Vec::new();

        for semantic_model in &semantic_manifest.semantic_models {
            for measure in semantic_model.measures.iter().filter(|m| m.create_metric) {
                let existing = semantic_manifest
                    .metrics
                    .iter()
                    .chain(proxies.iter())
                    .find(|metric| metric.name == measure.name);

                match existing {
                    Some(metric) => {
                        let proxies_measure = metric.metric_type == MetricType::Simple
                            && metric
                                .type_params
                                .measure
                                .as_ref()
                                .is_some_and(|input| input.name == measure.name);
                        if !proxies_measure {
                            return Err(TransformError::ProxyMetricConflict {
                                name: measure.name.clone(),
                            });
                        }
                    }
                    None => {
                        let mut metric = Metric::simple(measure.name.clone(), measure.name.clone());
                        metric.description = measure.description.clone();
                        metric.metadata = semantic_model.metadata.clone();
                        proxies.push(metric);
                    }
                }
            }
        }

        if !proxies.is_empty() {
            tracing::debug!(count = proxies.len(), "created proxy metrics for measures");
        }
        semantic_manifest.metrics.extend(proxies);
        Ok(semantic_manifest)
    }
}
