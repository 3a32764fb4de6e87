use std::path::Path;

use semantic_manifest::model::loader::load_manifest;
use semantic_manifest::model::{
    AggregationType, Dimension, Measure, Metric, SemanticManifest, SemanticModel, TimeGranularity,
};
use semantic_manifest::transform::{
    SemanticManifestTransformRule, SetMetricTimeGranularityRule, TransformError,
};

fn simple_manifest() -> SemanticManifest {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/simple_manifest.json");
    load_manifest(&path).expect("fixture should load")
}

fn granularity(manifest: &SemanticManifest, metric: &str) -> Option<TimeGranularity> {
    manifest.get_metric(metric).and_then(|m| m.time_granularity)
}

#[test]
fn test_simple_manifest_granularities() {
    let transformed = SetMetricTimeGranularityRule.transform_model(simple_manifest()).unwrap();

    assert_eq!(granularity(&transformed, "bookings"), Some(TimeGranularity::Day));
    assert_eq!(granularity(&transformed, "booking_value"), Some(TimeGranularity::Week));
    // Measure aggregates over a monthly time dimension
    assert_eq!(granularity(&transformed, "booking_payments"), Some(TimeGranularity::Month));
    assert_eq!(
        granularity(&transformed, "monthly_times_yearly_bookings"),
        Some(TimeGranularity::Year)
    );
    assert_eq!(granularity(&transformed, "bookings_per_listing"), Some(TimeGranularity::Day));
    assert_eq!(granularity(&transformed, "new_users"), Some(TimeGranularity::Day));
}

#[test]
fn test_running_twice_changes_nothing() {
    let once = SetMetricTimeGranularityRule.transform_model(simple_manifest()).unwrap();
    let twice = SetMetricTimeGranularityRule.transform_model(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_granularity_is_never_finer_than_day() {
    let model = SemanticModel::new("events")
        .with_agg_time_dimension("occurred_at")
        .with_dimension(Dimension::time("occurred_at", TimeGranularity::Hour))
        .with_measure(Measure::new("events", AggregationType::Sum));
    let manifest = SemanticManifest::new(vec![model], vec![Metric::simple("events", "events")]);

    let transformed = SetMetricTimeGranularityRule.transform_model(manifest).unwrap();
    assert_eq!(granularity(&transformed, "events"), Some(TimeGranularity::Day));
}

#[test]
fn test_metric_with_unknown_measure_defaults_to_day() {
    let manifest = SemanticManifest::new(vec![], vec![Metric::simple("orphan", "missing")]);

    let transformed = SetMetricTimeGranularityRule.transform_model(manifest).unwrap();
    assert_eq!(granularity(&transformed, "orphan"), Some(TimeGranularity::Day));
}

#[test]
fn test_nested_derived_metrics() {
    let manifest = SemanticManifest::new(
        vec![],
        vec![
            Metric::derived("outer", "inner * 2", ["inner"]),
            Metric::derived("inner", "q + d", ["quarterly", "daily"]),
            Metric::simple("quarterly", "x").with_time_granularity(TimeGranularity::Quarter),
            Metric::simple("daily", "x"),
        ],
    );

    let transformed = SetMetricTimeGranularityRule.transform_model(manifest).unwrap();
    assert_eq!(granularity(&transformed, "inner"), Some(TimeGranularity::Quarter));
    assert_eq!(granularity(&transformed, "outer"), Some(TimeGranularity::Quarter));
}

#[test]
fn test_self_referencing_metric_is_a_cycle() {
    let manifest = SemanticManifest::new(vec![], vec![Metric::derived("loop", "loop + 1", ["loop"])]);

    let err = SetMetricTimeGranularityRule.transform_model(manifest).unwrap_err();
    assert_eq!(
        err,
        TransformError::MetricCycle {
            cycle: vec!["loop".to_string()]
        }
    );
}
