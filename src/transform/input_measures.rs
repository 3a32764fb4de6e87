//! Fill `type_params.input_measures` for every metric.
//!
//! Simple, cumulative and conversion metrics read their measures directly;
//! ratio and derived metrics collect the measures of their input metrics,
//! recursively.

use std::collections::HashMap;

use super::{SemanticManifestTransformRule, TransformError, TransformResult};
use crate::model::{Metric, MetricInputMeasure, SemanticManifest};

#[derive(Debug, Clone, Copy, Default)]
pub struct AddInputMetricMeasuresRule;

struct InputMeasureResolver<'a> {
    metrics: HashMap<&'a str, &'a Metric>,
    /// Metrics currently being expanded
    stack: Vec<&'a str>,
    /// Fully expanded metrics, so shared inputs are only walked once
    resolved: HashMap<&'a str, Vec<MetricInputMeasure>>,
}

impl<'a> InputMeasureResolver<'a> {
    fn new(semantic_manifest: &'a SemanticManifest) -> Self {
        let mut metrics = HashMap::new();
        for metric in &semantic_manifest.metrics {
            metrics.entry(metric.name.as_str()).or_insert(metric);
        }
        Self {
            metrics,
            stack: Vec::new(),
            resolved: HashMap::new(),
        }
    }

    fn input_measures(&mut self, metric: &'a Metric) -> TransformResult<Vec<MetricInputMeasure>> {
        if let Some(start) = self.stack.iter().position(|name| *name == metric.name) {
            let mut cycle: Vec<String> = self.stack[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(metric.name.clone());
            return Err(TransformError::MetricCycle { cycle });
        }

        if !metric.metric_type.is_metric_composite() {
            return Ok(metric.direct_measure_inputs().into_iter().cloned().collect());
        }

        // Only the first metric with a given name is reachable as an input.
        let cacheable = self
            .metrics
            .get(metric.name.as_str())
            .is_some_and(|known| std::ptr::eq(*known, metric));
        if cacheable {
            if let Some(measures) = self.resolved.get(metric.name.as_str()) {
                return Ok(measures.clone());
            }
        }

        self.stack.push(&metric.name);
        let mut measures: Vec<MetricInputMeasure> = Vec::new();
        for input in metric.metric_inputs() {
            let input_metric = self.metrics.get(input.name.as_str()).copied().ok_or_else(|| {
                TransformError::UnknownMetric {
                    metric: metric.name.clone(),
                    input: input.name.clone(),
                }
            })?;
            for measure in self.input_measures(input_metric)? {
                if !measures.contains(&measure) {
                    measures.push(measure);
                }
            }
        }
        self.stack.pop();
        if cacheable {
            self.resolved.insert(&metric.name, measures.clone());
        }
        Ok(measures)
    }
}

impl SemanticManifestTransformRule for AddInputMetricMeasuresRule {
    fn name(&self) -> &'static str {
        "add_input_metric_measures"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        let resolved = {
            let mut resolver = InputMeasureResolver::new(&semantic_manifest);
            semantic_manifest
                .metrics
                .iter()
                .map(|metric| resolver.input_measures(metric))
                .collect::<TransformResult<Vec<_>>>()?
        };

        for (metric, input_measures) in semantic_manifest.metrics.iter_mut().zip(resolved) {
            metric.type_params.input_measures = input_measures;
        }
        Ok(semantic_manifest)
    }
}
