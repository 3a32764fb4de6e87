use semantic_manifest::model::{DatePart, TimeGranularity};
use semantic_manifest::query_syntax::{
    parse_object_builder_item, ObjectBuilderTextProcessor, QueryItemType, ValidMethodMapping,
};

#[test]
fn test_valid_object_builder_items() {
    let processor = ObjectBuilderTextProcessor;
    let valid_items = [
        "Dimension('listing__created_at', entity_path=['host'])",
        "Dimension('listing__created_at', entity_path=['host']).grain('day').date_part('day')",
        "TimeDimension('listing__created_at', time_granularity_name='day', entity_path=['host'], date_part_name='day')",
        "Entity('listing__created_at', entity_path=['host'])",
        "Metric('bookings', group_by=['listing__created_at'])",
    ];

    for item in valid_items {
        if let Err(err) = processor.get_description(item, &ValidMethodMapping::default()) {
            panic!("`{}` should be valid: {}", item, err);
        }
    }
}

#[test]
fn test_invalid_object_builder_items() {
    let processor = ObjectBuilderTextProcessor;
    let invalid_items = [
        "Dimension('listing__created_at').grain('invalid')",
        "Dimension('listing__created_at').date_part('invalid')",
        "TimeDimension('listing__created_at', 'invalid', 'day')",
        "TimeDimension('listing__created_at', 'day', date_part_name='invalid')",
        "TimeDimension('listing__created_at', 'day', date_part_name='month').grain('month')",
        "TimeDimension('listing__created_at', 'day', date_part_name='month').date_part('month')",
        "Entity('listing__created_at').grain('day')",
        "Entity('listing__created_at').date_part('day')",
        "Metric('bookings').grain('day')",
        "Metric('bookings').date_part('day')",
    ];

    for item in invalid_items {
        assert!(
            processor
                .get_description(item, &ValidMethodMapping::default())
                .is_err(),
            "`{}` should be rejected",
            item
        );
    }
}

#[test]
fn test_malformed_text_is_rejected() {
    for item in [
        "",
        "Dimension",
        "Dimension('a'",
        "Dimension('a').",
        "Dimension('a') + 1",
        "Unknown('a')",
        "Dimension()",
        "Dimension('a', entity_path='host')",
        "Dimension(entity_path=['host'], 'a')",
        "Dimension('a', name='b')",
        "Dimension('a', unknown=['x'])",
        "Dimension('a', ['x'], ['y'])",
        "Dimension('a').grain('day').grain('month')",
        "Dimension('a').descending('yes')",
        "Dimension('a').grain()",
        "Dimension('listing__')",
    ] {
        assert!(parse_object_builder_item(item).is_err(), "`{}` should be rejected", item);
    }
}

#[test]
fn test_dimension_description() {
    let description = parse_object_builder_item(
        "Dimension('listing__created_at', entity_path=['host']).grain('month').date_part('year').descending(True)",
    )
    .unwrap();

    assert_eq!(description.item_type, QueryItemType::Dimension);
    assert_eq!(description.element_name, "created_at");
    assert_eq!(description.entity_links, vec!["listing".to_string()]);
    assert_eq!(description.entity_path, vec!["host".to_string()]);
    assert_eq!(description.time_granularity, Some(TimeGranularity::Month));
    assert_eq!(description.date_part, Some(DatePart::Year));
    assert_eq!(description.descending, Some(true));
    assert_eq!(description.qualified_name(), "listing__created_at");
}

#[test]
fn test_time_dimension_positional_arguments() {
    let description =
        parse_object_builder_item("TimeDimension('metric_time', 'week', ['host'], 'dow')").unwrap();

    assert_eq!(description.item_type, QueryItemType::TimeDimension);
    assert_eq!(description.element_name, "metric_time");
    assert!(description.entity_links.is_empty());
    assert_eq!(description.time_granularity, Some(TimeGranularity::Week));
    assert_eq!(description.entity_path, vec!["host".to_string()]);
    assert_eq!(description.date_part, Some(DatePart::Dow));
}

#[test]
fn test_metric_description() {
    let description =
        parse_object_builder_item("Metric(\"bookings\", group_by=['listing__country', 'host']).descending(False)")
            .unwrap();

    assert_eq!(description.item_type, QueryItemType::Metric);
    assert_eq!(description.element_name, "bookings");
    assert_eq!(description.group_by, vec!["listing__country", "host"]);
    assert_eq!(description.descending, Some(false));
    assert_eq!(description.time_granularity, None);
}

#[test]
fn test_entity_with_multi_hop_links() {
    let description = parse_object_builder_item("  Entity( 'listing__user__company' )  ").unwrap();

    assert_eq!(description.item_type, QueryItemType::Entity);
    assert_eq!(description.entity_links, vec!["listing", "user"]);
    assert_eq!(description.element_name, "company");
}

#[test]
fn test_error_message() {
    let err = parse_object_builder_item("Metric('bookings').grain('day')").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Invalid query syntax in `Metric('bookings').grain('day')`: `grain` is not a valid method for Metric");
}
