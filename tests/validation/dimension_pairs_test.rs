use semantic_manifest::model::{
    AggregationType, Dimension, Entity, EntityType, Measure, SemanticManifest, SemanticModel,
    TimeGranularity,
};
use semantic_manifest::validation::{
    KnownPairings, PrimaryEntityDimensionPairs, SemanticManifestValidationRule, ValidationContext,
};

fn model(name: &str, primary_entity: &str) -> SemanticModel {
    SemanticModel::new(name)
        .with_primary_entity(primary_entity)
        .with_measure(Measure::new(format!("{}_count", name), AggregationType::Count))
        .with_dimension(Dimension::time("created_at", TimeGranularity::Day))
}

#[test]
fn test_shared_primary_entity_and_dimension_is_an_error() {
    let manifest = SemanticManifest::new(
        vec![model("listings_a", "host"), model("listings_b", "host")],
        vec![],
    );

    let issues = PrimaryEntityDimensionPairs.validate_manifest(&manifest).unwrap();

    assert_eq!(issues.len(), 1);
    insta::assert_snapshot!(&issues[0].message, @"Duplicate dimension + primary entity pairing detected, dimension + primary entity pairings must be unique. Semantic model `listings_b` has a primary entity of `host` and dimension `created_at`, but this pairing is already in use on semantic model `listings_a`.");
    match &issues[0].context {
        Some(ValidationContext::SemanticModelElement {
            semantic_model_element,
            ..
        }) => assert_eq!(semantic_model_element.semantic_model_name, "listings_b"),
        other => panic!("unexpected context: {:?}", other),
    }
}

#[test]
fn test_different_primary_entities_do_not_conflict() {
    let manifest = SemanticManifest::new(
        vec![model("listings", "listing"), model("hosts", "host")],
        vec![],
    );

    let issues = PrimaryEntityDimensionPairs.validate_manifest(&manifest).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_primary_entity_from_entity_type() {
    let first = SemanticModel::new("bookings_source")
        .with_entity(Entity::new("booking", EntityType::Primary))
        .with_dimension(Dimension::categorical("is_instant"));
    let second = SemanticModel::new("bookings_archive")
        .with_entity(Entity::new("listing", EntityType::Foreign))
        .with_entity(Entity::new("booking", EntityType::Primary))
        .with_dimension(Dimension::categorical("is_instant"));

    let manifest = SemanticManifest::new(vec![first, second], vec![]);
    let issues = PrimaryEntityDimensionPairs.validate_manifest(&manifest).unwrap();

    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("primary entity of `booking`"));
}

#[test]
fn test_models_without_primary_entity_are_skipped() {
    let first = SemanticModel::new("events").with_dimension(Dimension::categorical("kind"));
    let second = SemanticModel::new("events_v2").with_dimension(Dimension::categorical("kind"));

    let manifest = SemanticManifest::new(vec![first, second], vec![]);
    let issues = PrimaryEntityDimensionPairs.validate_manifest(&manifest).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_each_repeat_is_reported_against_first_owner() {
    let manifest = SemanticManifest::new(
        vec![
            model("listings_a", "host"),
            model("listings_b", "host"),
            model("listings_c", "host"),
        ],
        vec![],
    );

    let issues = PrimaryEntityDimensionPairs.validate_manifest(&manifest).unwrap();

    assert_eq!(issues.len(), 2);
    assert!(issues
        .iter()
        .all(|issue| issue.message.ends_with("already in use on semantic model `listings_a`.")));
}

#[test]
fn test_known_pairings_are_recorded() {
    let mut known = KnownPairings::new();
    let issues = PrimaryEntityDimensionPairs::check_semantic_model(&model("listings", "host"), &mut known);

    assert!(issues.is_empty());
    assert_eq!(
        known.get("host").and_then(|dims| dims.get("created_at")).map(String::as_str),
        Some("listings")
    );
}
