//! Default `time_granularity` for metrics that do not configure one.
//!
//! Metrics reading measures default to the coarsest granularity of their
//! measures' agg time dimensions, never finer than a day. Ratio and derived
//! metrics default to the coarsest granularity of their input metrics, so
//! inputs are resolved first by walking the metric dependency graph in
//! topological order.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use super::{SemanticManifestTransformRule, TransformError, TransformResult};
use crate::model::{Metric, SemanticManifest, TimeGranularity};

const DEFAULT_GRANULARITY: TimeGranularity = TimeGranularity::Day;

#[derive(Debug, Clone, Copy, Default)]
pub struct SetMetricTimeGranularityRule;

/// Metric dependency graph. Node weights index into `SemanticManifest::metrics`;
/// edges point from an input metric to the metric that uses it.
struct MetricGraph {
    graph: DiGraph<usize, ()>,
    by_name: HashMap<String, usize>,
}

impl MetricGraph {
    fn build(metrics: &[Metric]) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..metrics.len()).map(|i| graph.add_node(i)).collect();

        let mut by_name = HashMap::new();
        for (i, metric) in metrics.iter().enumerate() {
            by_name.entry(metric.name.clone()).or_insert(i);
        }

        for (i, metric) in metrics.iter().enumerate() {
            for input in metric.metric_inputs() {
                // Unknown inputs are reported by validation, not here
                if let Some(&j) = by_name.get(&input.name) {
                    graph.add_edge(nodes[j], nodes[i], ());
                }
            }
        }

        Self { graph, by_name }
    }

    fn ordered(&self, metrics: &[Metric]) -> TransformResult<Vec<usize>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(|node| self.graph[node]).collect()),
            Err(cycle) => {
                let start = cycle.node_id();
                let members = tarjan_scc(&self.graph)
                    .into_iter()
                    .find(|scc| scc.contains(&start))
                    .unwrap_or_else(|| vec![start]);
                Err(TransformError::MetricCycle {
                    cycle: members
                        .into_iter()
                        .map(|node| metrics[self.graph[node]].name.clone())
                        .collect(),
                })
            }
        }
    }

    fn input_indices<'m>(&'m self, metric: &'m Metric) -> impl Iterator<Item = usize> + 'm {
        metric
            .metric_inputs()
            .into_iter()
            .filter_map(|input| self.by_name.get(&input.name).copied())
    }
}

fn measure_granularity(semantic_manifest: &SemanticManifest, metric: &Metric) -> TimeGranularity {
    metric
        .direct_measure_inputs()
        .into_iter()
        .filter_map(|input| semantic_manifest.find_measure(&input.name))
        .filter_map(|(model, measure)| model.agg_time_dimension_for(measure))
        .filter_map(|dimension| dimension.time_granularity())
        .fold(DEFAULT_GRANULARITY, TimeGranularity::max)
}

impl SemanticManifestTransformRule for SetMetricTimeGranularityRule {
    fn name(&self) -> &'static str {
        "set_metric_time_granularity"
    }

    fn transform_model(&self, mut semantic_manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        let resolved = {
            let metrics = &semantic_manifest.metrics;
            let graph = MetricGraph::build(metrics);
            let mut resolved: Vec<Option<TimeGranularity>> = vec![None; metrics.len()];

            for i in graph.ordered(metrics)? {
                let metric = &metrics[i];
                let granularity = match metric.time_granularity {
                    Some(configured) => configured,
                    None if metric.metric_type.is_metric_composite() => graph
                        .input_indices(metric)
                        .filter_map(|j| resolved[j])
                        .max()
                        .unwrap_or(DEFAULT_GRANULARITY),
                    None => measure_granularity(&semantic_manifest, metric),
                };
                resolved[i] = Some(granularity);
            }
            resolved
        };

        for (metric, granularity) in semantic_manifest.metrics.iter_mut().zip(resolved) {
            if metric.time_granularity.is_none() {
                metric.time_granularity = granularity;
            }
        }
        Ok(semantic_manifest)
    }
}
