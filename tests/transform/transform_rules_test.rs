use std::path::Path;

use semantic_manifest::model::loader::load_manifest;
use semantic_manifest::model::{AggregationType, MetricType, SemanticManifest};
use semantic_manifest::transform::{
    transform_with_defaults, DefaultTransformRuleSet, RuleSequence, SemanticManifestTransformRule,
    SemanticManifestTransformer, SetMetricTimeGranularityRule, TransformError, TransformResult,
};
use semantic_manifest::validation::validate;

fn simple_manifest() -> SemanticManifest {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/simple_manifest.json");
    load_manifest(&path).expect("fixture should load")
}

/// Truncates semantic model names to three characters.
struct SliceNamesRule;

impl SemanticManifestTransformRule for SliceNamesRule {
    fn name(&self) -> &'static str {
        "slice_names"
    }

    fn transform_model(&self, mut manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for semantic_model in &mut manifest.semantic_models {
            semantic_model.name = semantic_model.name.chars().take(3).collect();
        }
        Ok(manifest)
    }
}

/// Records the order rules ran in through metric descriptions.
struct AppendToDescription(&'static str);

impl SemanticManifestTransformRule for AppendToDescription {
    fn name(&self) -> &'static str {
        self.0
    }

    fn transform_model(&self, mut manifest: SemanticManifest) -> TransformResult<SemanticManifest> {
        for metric in &mut manifest.metrics {
            let description = metric.description.get_or_insert_with(String::new);
            description.push_str(self.0);
        }
        Ok(manifest)
    }
}

struct FailingRule;

impl SemanticManifestTransformRule for FailingRule {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn transform_model(&self, _: SemanticManifest) -> TransformResult<SemanticManifest> {
        Err(TransformError::RuleFailed {
            rule: "failing".to_string(),
            message: "nope".to_string(),
        })
    }
}

#[test]
fn test_custom_rule_then_granularity_phase() {
    let manifest = simple_manifest();
    assert!(!manifest.semantic_models.iter().all(|m| m.name.len() == 3));
    let configured: Vec<_> = manifest
        .metrics
        .iter()
        .filter_map(|m| m.time_granularity.map(|g| (m.name.clone(), g)))
        .collect();
    assert!(!configured.is_empty());

    let phases: Vec<RuleSequence> = vec![
        vec![Box::new(SliceNamesRule)],
        vec![Box::new(SetMetricTimeGranularityRule)],
    ];
    let transformed = SemanticManifestTransformer::transform(manifest, &phases).unwrap();

    assert!(transformed.semantic_models.iter().all(|m| m.name.len() == 3));
    assert!(transformed.metrics.iter().all(|m| m.time_granularity.is_some()));
    for (name, granularity) in configured {
        assert_eq!(
            transformed.get_metric(&name).unwrap().time_granularity,
            Some(granularity)
        );
    }
}

#[test]
fn test_phases_and_rules_run_in_order() {
    let manifest = SemanticManifest::new(
        vec![],
        vec![semantic_manifest::model::Metric::simple("bookings", "bookings")],
    );
    let phases: Vec<RuleSequence> = vec![
        vec![Box::new(AppendToDescription("a")), Box::new(AppendToDescription("b"))],
        vec![],
        vec![Box::new(AppendToDescription("c"))],
    ];

    let transformed = SemanticManifestTransformer::transform(manifest, &phases).unwrap();
    assert_eq!(transformed.metrics[0].description.as_deref(), Some("abc"));
}

#[test]
fn test_failing_rule_aborts_transform() {
    let phases: Vec<RuleSequence> = vec![
        vec![Box::new(FailingRule)],
        vec![Box::new(AppendToDescription("never"))],
    ];

    let err = SemanticManifestTransformer::transform(simple_manifest(), &phases).unwrap_err();
    assert_eq!(err.to_string(), "Transform rule `failing` failed: nope");
}

#[test]
fn test_empty_phases_return_manifest_unchanged() {
    let manifest = simple_manifest();
    let transformed = SemanticManifestTransformer::transform(manifest.clone(), &[]).unwrap();
    assert_eq!(transformed, manifest);
}

#[test]
fn test_default_rules_on_simple_manifest() {
    let transformed = transform_with_defaults(simple_manifest()).unwrap();

    let bookings_source = transformed.get_semantic_model("bookings_source").unwrap();
    let instant = bookings_source.get_measure("instant_bookings").unwrap();
    assert_eq!(instant.agg, AggregationType::Sum);
    assert_eq!(instant.expr.as_deref(), Some("CASE WHEN is_instant THEN 1 ELSE 0 END"));
    assert_eq!(instant.agg_time_dimension.as_deref(), Some("ds"));

    let median = bookings_source.get_measure("median_booking_value").unwrap();
    assert_eq!(median.agg, AggregationType::Percentile);
    assert_eq!(median.agg_params.as_ref().and_then(|p| p.percentile), Some(0.5));

    let listings = transformed
        .get_semantic_model("listings_latest")
        .and_then(|m| m.get_measure("listings"))
        .unwrap();
    assert_eq!(listings.agg, AggregationType::Sum);
    assert_eq!(
        listings.expr.as_deref(),
        Some("CASE WHEN listing_id IS NOT NULL THEN 1 ELSE 0 END")
    );

    // `bookings` already has a proxy metric, so no metric is added
    assert_eq!(transformed.metrics.len(), simple_manifest().metrics.len());

    let ratio = transformed.get_metric("bookings_per_listing").unwrap();
    assert_eq!(ratio.metric_type, MetricType::Ratio);
    let input_measures: Vec<_> = ratio
        .type_params
        .input_measures
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(input_measures, vec!["bookings", "listings"]);

    assert!(transformed.metrics.iter().all(|m| m.time_granularity.is_some()));
    assert!(validate(&transformed).is_empty());
}

#[test]
fn test_default_rules_are_idempotent() {
    let once = transform_with_defaults(simple_manifest()).unwrap();
    let twice = transform_with_defaults(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_lower_case_names_before_validation() {
    let mut manifest = simple_manifest();
    manifest.semantic_models[0].name = "Bookings_Source".to_string();
    assert!(!validate(&manifest).is_empty());

    let transformed =
        SemanticManifestTransformer::transform(manifest, &DefaultTransformRuleSet::all_rules()).unwrap();
    assert_eq!(transformed.semantic_models[0].name, "bookings_source");
    assert!(validate(&transformed).is_empty());
}
