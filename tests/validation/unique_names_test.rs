use semantic_manifest::model::{
    AggregationType, Dimension, Entity, EntityType, Measure, Metadata, Metric, SemanticManifest,
    SemanticModel,
};
use semantic_manifest::validation::{
    SemanticManifestValidationRule, SemanticModelElementType, UniqueAndValidNameRule,
    ValidationContext,
};

fn bookings_model(name: &str) -> SemanticModel {
    SemanticModel::new(name)
        .with_measure(Measure::new("bookings", AggregationType::Sum))
        .with_entity(Entity::new("booking", EntityType::Primary))
        .with_dimension(Dimension::categorical("is_instant"))
}

#[test]
fn test_measure_and_dimension_share_a_namespace() {
    let model = SemanticModel::new("bookings_source")
        .with_measure(Measure::new("x", AggregationType::Sum))
        .with_dimension(Dimension::categorical("x"));

    let issues = UniqueAndValidNameRule::validate_semantic_model_elements(&model);

    // A single character is also too short, so each element fails the syntax check
    let duplicates = issues
        .iter()
        .filter(|issue| issue.message.contains("can't use name"))
        .count();
    assert_eq!(duplicates, 1);
    assert_eq!(issues.len(), 3);
    insta::assert_snapshot!(&issues[0].message, @"In semantic model `bookings_source`, can't use name `x` for a dimension when it was already used for a measure");
    match &issues[0].context {
        Some(ValidationContext::SemanticModelElement {
            semantic_model_element,
            element_type,
            ..
        }) => {
            assert_eq!(*element_type, SemanticModelElementType::Dimension);
            assert_eq!(semantic_model_element.element_name, "x");
            assert_eq!(semantic_model_element.semantic_model_name, "bookings_source");
        }
        other => panic!("unexpected context: {:?}", other),
    }
}

#[test]
fn test_entity_reported_against_earlier_measure() {
    let model = SemanticModel::new("listings")
        .with_measure(Measure::new("listing", AggregationType::Count))
        .with_entity(Entity::new("listing", EntityType::Primary));

    let issues = UniqueAndValidNameRule::validate_semantic_model_elements(&model);

    assert_eq!(issues.len(), 1);
    assert!(issues[0]
        .message
        .contains("for a entity when it was already used for a measure"));
}

#[test]
fn test_same_element_name_in_different_models_is_allowed() {
    let manifest = SemanticManifest::new(
        vec![bookings_model("bookings_source"), bookings_model("bookings_archive")],
        vec![],
    );

    let issues = UniqueAndValidNameRule.validate_manifest(&manifest).unwrap();
    assert!(issues.is_empty(), "{:?}", issues);
}

#[test]
fn test_invalid_element_names_are_reported() {
    let model = SemanticModel::new("bookings_source")
        .with_measure(Measure::new("Bookings", AggregationType::Sum))
        .with_dimension(Dimension::categorical("metric_time"));

    let issues = UniqueAndValidNameRule::validate_semantic_model_elements(&model);

    assert_eq!(issues.len(), 2);
    assert!(issues[0].message.starts_with("Invalid name `Bookings`"));
    assert!(issues[1].message.contains("reserved by the query layer"));
}

#[test]
fn test_duplicated_invalid_name_is_checked_for_each_element() {
    let model = SemanticModel::new("bookings_source")
        .with_measure(Measure::new("Bad__x", AggregationType::Sum))
        .with_dimension(Dimension::categorical("Bad__x"));

    let issues = UniqueAndValidNameRule::validate_semantic_model_elements(&model);

    assert_eq!(issues.len(), 3);
    insta::assert_snapshot!(&issues[0].message, @"In semantic model `bookings_source`, can't use name `Bad__x` for a dimension when it was already used for a measure");
    let element_types: Vec<_> = issues[1..]
        .iter()
        .map(|issue| {
            assert!(issue.message.starts_with("Invalid name `Bad__x`"), "{}", issue.message);
            match &issue.context {
                Some(ValidationContext::SemanticModelElement { element_type, .. }) => *element_type,
                other => panic!("unexpected context: {:?}", other),
            }
        })
        .collect();
    assert_eq!(
        element_types,
        vec![SemanticModelElementType::Measure, SemanticModelElementType::Dimension]
    );
}

#[test]
fn test_top_level_issues_come_before_element_issues() {
    let model = SemanticModel::new("Orders")
        .with_measure(Measure::new("order_total", AggregationType::Sum))
        .with_dimension(Dimension::categorical("order_total"));
    let manifest = SemanticManifest::new(vec![model], vec![Metric::simple("Revenue", "order_total")]);

    let issues = UniqueAndValidNameRule.validate_manifest(&manifest).unwrap();

    assert_eq!(issues.len(), 3, "{:?}", issues);
    assert!(issues[0].message.starts_with("Invalid name `Orders`"));
    assert!(matches!(
        issues[0].context,
        Some(ValidationContext::SemanticModel { .. })
    ));
    assert!(issues[1].message.starts_with("Invalid name `Revenue`"));
    assert!(matches!(issues[1].context, Some(ValidationContext::Metric { .. })));
    assert!(issues[2].message.contains("can't use name `order_total` for a dimension"));
    assert!(matches!(
        issues[2].context,
        Some(ValidationContext::SemanticModelElement { .. })
    ));
}

#[test]
fn test_duplicate_semantic_model_reported_on_second() {
    let manifest = SemanticManifest::new(
        vec![
            bookings_model("orders").with_metadata(Metadata::new("models/orders.yml", 1)),
            bookings_model("orders").with_metadata(Metadata::new("models/orders_v2.yml", 7)),
        ],
        vec![],
    );

    let issues = UniqueAndValidNameRule::validate_top_level_objects(&manifest);

    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "Can't use name `orders` for a semantic model when it was already used for a semantic model"
    );
    let file_context = issues[0].context.as_ref().unwrap().file_context();
    assert_eq!(file_context.file_name.as_deref(), Some("models/orders_v2.yml"));
    assert_eq!(file_context.line_number, Some(7));
}

#[test]
fn test_duplicate_metric_names() {
    let manifest = SemanticManifest::new(
        vec![],
        vec![
            Metric::simple("bookings", "bookings"),
            Metric::simple("revenue", "revenue"),
            Metric::simple("bookings", "booking_value"),
        ],
    );

    let issues = UniqueAndValidNameRule::validate_top_level_objects(&manifest);

    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].message,
        "Can't use name `bookings` for a metric when it was already used for a metric"
    );
}

#[test]
fn test_metric_may_share_a_semantic_model_name() {
    let manifest = SemanticManifest::new(
        vec![bookings_model("bookings")],
        vec![Metric::simple("bookings", "bookings")],
    );

    let issues = UniqueAndValidNameRule.validate_manifest(&manifest).unwrap();
    assert!(issues.is_empty(), "{:?}", issues);
}

#[test]
fn test_invalid_top_level_names() {
    let manifest = SemanticManifest::new(
        vec![bookings_model("Bookings_Source")],
        vec![Metric::simple("month", "bookings")],
    );

    let issues = UniqueAndValidNameRule::validate_top_level_objects(&manifest);

    assert_eq!(issues.len(), 2);
    assert!(matches!(
        issues[0].context,
        Some(ValidationContext::SemanticModel { .. })
    ));
    assert!(matches!(issues[1].context, Some(ValidationContext::Metric { .. })));
    assert!(issues[1].message.contains("reserved time granularity keywords"));
}
