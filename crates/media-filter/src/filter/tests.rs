//! Tests for building, validating and rendering filters.

use chrono::{TimeZone, Utc};

use super::*;
use crate::dialect::Dialect;
use crate::error::FilterError;

fn android() -> FilterExpression {
    FilterExpression::new(Dialect::Android)
}

fn darwin() -> FilterExpression {
    FilterExpression::new(Dialect::Darwin)
}

// ==================== Leaf Rendering Tests ====================

#[test]
fn test_render_comparison() {
    let leaf = Comparison::new("width", ">=", "200");
    assert_eq!(leaf.render(Dialect::Android), "width >= 200");
    assert_eq!(leaf.render(Dialect::Darwin), "width >= 200");
}

#[test]
fn test_render_unary_comparison() {
    let leaf = Comparison::is_null(Dialect::Android, "_data");
    assert_eq!(leaf.render(Dialect::Android), "_data IS NULL");

    let leaf = Comparison::is_not_null(Dialect::Darwin, "burstIdentifier");
    assert_eq!(leaf.render(Dialect::Darwin), "burstIdentifier != nil");
}

#[test]
fn test_render_bare_column() {
    let leaf = Comparison::from_parts("isFavorite", None, None);
    assert_eq!(leaf.render(Dialect::Darwin), "isFavorite");
}

#[test]
fn test_render_text_is_verbatim() {
    let leaf = Condition::text("  mime_type LIKE 'image/%'  ");
    assert_eq!(leaf.render(Dialect::Android), "  mime_type LIKE 'image/%'  ");
    assert_eq!(leaf.display(Dialect::Android), "  mime_type LIKE 'image/%'  ");
}

#[test]
fn test_render_date_comparison_machine_and_display() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let added = DateComparison::new("date_added", ">", at);
    assert_eq!(added.render(Dialect::Android), "date_added > 1709294400");
    assert_eq!(
        added.display(Dialect::Android),
        "date_added > 2024-03-01T12:00:00.000Z"
    );

    let taken = DateComparison::new("datetaken", "<=", at);
    assert_eq!(taken.render(Dialect::Android), "datetaken <= 1709294400000");

    let created = DateComparison::new("creationDate", ">", at);
    assert_eq!(
        created.render(Dialect::Darwin),
        "creationDate > CAST(730987200, \"NSDate\")"
    );
    assert_eq!(
        created.display(Dialect::Darwin),
        "creationDate > 2024-03-01T12:00:00.000Z"
    );
}

// ==================== Group Rendering Tests ====================

#[test]
fn test_empty_group_renders_empty_parentheses() {
    let group = Group::new(Dialect::Android);
    assert_eq!(group.text(), "(  )");
    assert_eq!(group.display_text(), "(  )");
}

#[test]
fn test_group_joins_children() {
    let group = Group::new(Dialect::Android)
        .and_text("width > 1000")
        .and_text("height > 1000");
    assert_eq!(group.text(), "( width > 1000 AND height > 1000 )");
}

#[test]
fn test_first_child_tag_is_ignored() {
    let group = Group::new(Dialect::Android)
        .or_text("width > 1000")
        .and_text("height > 1000");
    assert_eq!(group.children()[0].logical(), LogicalType::Or);
    assert_eq!(group.text(), "( width > 1000 AND height > 1000 )");
}

#[test]
fn test_nested_groups() {
    let large = Group::new(Dialect::Android)
        .and_text("width > 1000")
        .and_text("height > 1000");
    let small = Group::new(Dialect::Android)
        .and_text("width < 500")
        .and_text("height < 500");

    let mut filter = android();
    filter.add_condition(large.clone()).unwrap().or(small.clone()).unwrap();
    assert_eq!(
        filter.where_text(),
        "( width > 1000 AND height > 1000 ) OR ( width < 500 AND height < 500 )"
    );

    // The same children inside a group gain an outer pair of parentheses.
    let outer = Group::new(Dialect::Android)
        .and(large)
        .unwrap()
        .or(small)
        .unwrap();
    assert_eq!(
        outer.text(),
        "( ( width > 1000 AND height > 1000 ) OR ( width < 500 AND height < 500 ) )"
    );
}

#[test]
fn test_group_with_validated_leaves() {
    let group = Group::new(Dialect::Darwin)
        .and(Comparison::new("pixelWidth", ">", "100"))
        .unwrap()
        .or(Comparison::new("mediaType", "==", "1"))
        .unwrap();
    assert_eq!(group.text(), "( pixelWidth > 100 OR mediaType == 1 )");
    assert_eq!(group.len(), 2);
    assert!(!group.is_empty());
}

// ==================== Filter Expression Tests ====================

#[test]
fn test_empty_filter_renders_empty_string() {
    let filter = android();
    assert_eq!(filter.where_text(), "");
    assert!(filter.is_empty());
    assert!(filter.order_by().is_empty());
}

#[test]
fn test_top_level_and_chain() {
    let mut filter = android();
    filter
        .add_condition(Comparison::new("width", ">=", "200"))
        .unwrap()
        .add_condition(Comparison::new("height", ">=", "300"))
        .unwrap();
    assert_eq!(filter.where_text(), "width >= 200 AND height >= 300");
}

#[test]
fn test_top_level_or_and_text() {
    let mut filter = android();
    filter
        .add_condition(Comparison::new("width", ">=", "200"))
        .unwrap()
        .add_text("_size < 1024", LogicalType::Or);
    assert_eq!(filter.where_text(), "width >= 200 OR _size < 1024");
}

#[test]
fn test_render_is_idempotent() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut filter = darwin();
    filter
        .add_condition(Comparison::new("pixelWidth", ">", "100"))
        .unwrap()
        .or(DateComparison::new("modificationDate", "<", at))
        .unwrap();
    let first = filter.where_text();
    let second = filter.where_text();
    assert_eq!(first, second);
    assert_eq!(filter.display_text(), filter.display_text());
}

#[test]
fn test_display_diverges_from_machine_text() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut filter = android();
    filter
        .add_condition(DateComparison::new("date_modified", ">=", at))
        .unwrap();
    assert_eq!(filter.where_text(), "date_modified >= 1704067200");
    assert_eq!(
        filter.display_text(),
        "date_modified >= 2024-01-01T00:00:00.000Z"
    );
}

#[test]
fn test_raw_where_overrides_tree() {
    let mut filter = android();
    filter
        .add_condition(Comparison::new("width", ">", "1"))
        .unwrap()
        .with_raw_where("1 = 1");
    assert_eq!(filter.where_text(), "1 = 1");
    assert_eq!(filter.display_text(), "1 = 1");

    filter.clear_raw_where();
    assert_eq!(filter.where_text(), "width > 1");
}

// ==================== Order By Tests ====================

#[test]
fn test_order_by_preserves_order_and_duplicates() {
    let mut filter = android();
    filter
        .add_order_by("date_added", false)
        .add_order_by("_id", true)
        .add_order_by("date_added", false);
    assert_eq!(
        filter.order_by(),
        &[
            OrderByItem::desc("date_added"),
            OrderByItem::asc("_id"),
            OrderByItem::desc("date_added"),
        ]
    );
    assert_eq!(
        filter.sort_clause().as_deref(),
        Some("date_added DESC, _id ASC, date_added DESC")
    );
}

#[test]
fn test_sort_clause_is_android_only() {
    let mut filter = darwin();
    filter.add_order_by("creationDate", false);
    assert_eq!(filter.sort_clause(), None);
    assert_eq!(filter.order_by().len(), 1);
    assert_eq!(android().sort_clause(), None);
}

// ==================== Validation Tests ====================

#[test]
fn test_comparison_on_date_column_is_rejected() {
    let mut filter = android();
    let err = filter
        .add_condition(Comparison::new("date_added", ">", "0"))
        .unwrap_err();
    assert_eq!(err, FilterError::date_column_in_comparison("date_added"));
    assert!(err.is_validation());
    assert!(filter.is_empty());
}

#[test]
fn test_date_comparison_on_other_column_is_rejected() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let err = Group::new(Dialect::Android)
        .and(DateComparison::new("width", ">", at))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnknownDateColumn { ref column, .. } if column == "width"));
}

#[test]
fn test_unknown_column_suggests_closest() {
    let err = android()
        .add_condition(Comparison::new("widht", ">", "1"))
        .unwrap_err();
    assert_eq!(
        err,
        FilterError::unknown_column("widht", "Android", Some("width".to_string()))
    );
}

#[test]
fn test_platform_specific_column_names() {
    assert!(android()
        .add_condition(Comparison::new("pixelWidth", ">", "1"))
        .is_err());
    assert!(darwin()
        .add_condition(Comparison::new("pixelWidth", ">", "1"))
        .is_ok());
}

#[test]
fn test_null_tokens_are_dialect_specific() {
    let mut filter = android();
    filter
        .add_condition(Comparison::is_null(Dialect::Android, "_data"))
        .unwrap();
    assert_eq!(filter.where_text(), "_data IS NULL");

    let mut filter = darwin();
    filter
        .add_condition(Comparison::is_null(Dialect::Darwin, "burstIdentifier"))
        .unwrap();
    assert_eq!(filter.where_text(), "burstIdentifier == nil");
}

#[test]
fn test_cross_dialect_operators_are_rejected() {
    let err = darwin()
        .add_condition(Comparison::unary("burstIdentifier", "IS NULL"))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedOperator { ref operator, .. } if operator == "IS NULL"));

    let err = android()
        .add_condition(Comparison::unary("_data", "== nil"))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedOperator { ref operator, .. } if operator == "== nil"));
}

#[test]
fn test_date_operator_is_checked() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let err = android()
        .add_condition(DateComparison::new("date_added", "BEGINSWITH", at))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedOperator { .. }));
}

#[test]
fn test_value_without_operator_is_rejected() {
    let err = android()
        .add_condition(Comparison::from_parts("width", None, Some("200".into())))
        .unwrap_err();
    assert_eq!(err, FilterError::value_without_operator("width"));
}

#[test]
fn test_binary_operator_without_value_is_rejected() {
    for (dialect, column) in [(Dialect::Android, "width"), (Dialect::Darwin, "pixelWidth")] {
        let mut filter = FilterExpression::new(dialect);
        let err = filter
            .add_condition(Comparison::unary(column, ">="))
            .unwrap_err();
        assert_eq!(err, FilterError::missing_value(column, ">="));
        assert!(err.is_validation());
        assert!(filter.is_empty());
    }
}

#[test]
fn test_null_check_with_value_is_rejected() {
    for (dialect, column) in [(Dialect::Android, "_data"), (Dialect::Darwin, "burstIdentifier")] {
        for operator in [dialect.null_operator(), dialect.not_null_operator()] {
            let mut filter = FilterExpression::new(dialect);
            let err = filter
                .add_condition(Comparison::new(column, operator, "5"))
                .unwrap_err();
            assert_eq!(err, FilterError::unexpected_value(column, operator));
            assert!(filter.is_empty());
        }
    }
}

#[test]
fn test_null_check_on_date_comparison_is_rejected() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for (dialect, column) in [(Dialect::Android, "date_added"), (Dialect::Darwin, "creationDate")] {
        let mut filter = FilterExpression::new(dialect);
        let err = filter
            .add_condition(DateComparison::new(column, dialect.null_operator(), at))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::unexpected_value(column, dialect.null_operator())
        );
        assert!(filter.where_text().is_empty());
    }
}

#[test]
fn test_android_is_operators_take_a_value() {
    let mut filter = android();
    filter
        .add_condition(Comparison::new("is_favorite", "IS NOT", "1"))
        .unwrap();
    assert_eq!(filter.where_text(), "is_favorite IS NOT 1");

    let err = android()
        .add_condition(Comparison::unary("is_favorite", "IS"))
        .unwrap_err();
    assert_eq!(err, FilterError::missing_value("is_favorite", "IS"));
}

#[test]
fn test_skip_validation_renders_malformed_leaves_verbatim() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let mut filter = android();
    filter
        .add_condition(Comparison::unary("width", ">=").skip_validation())
        .unwrap()
        .add_condition(Comparison::new("_data", "IS NULL", "5").skip_validation())
        .unwrap();
    assert_eq!(filter.where_text(), "width >= AND _data IS NULL 5");

    let mut filter = darwin();
    filter
        .add_condition(DateComparison::new("creationDate", "== nil", at).skip_validation())
        .unwrap();
    assert_eq!(
        filter.where_text(),
        "creationDate == nil CAST(725760000, \"NSDate\")"
    );
}

#[test]
fn test_empty_column_is_rejected() {
    let err = android()
        .add_condition(Comparison::new("", "=", "1"))
        .unwrap_err();
    assert_eq!(err, FilterError::EmptyColumn);
}

#[test]
fn test_skip_validation_bypasses_checks() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut filter = android();
    filter
        .add_condition(Comparison::new("date_added", "~", "x").skip_validation())
        .unwrap()
        .add_condition(DateComparison::new("custom_date", ">", at).skip_validation())
        .unwrap();
    assert_eq!(
        filter.where_text(),
        "date_added ~ x AND custom_date > 1704067200"
    );
}

#[test]
fn test_rejected_leaf_leaves_group_unchanged() {
    let mut group = Group::new(Dialect::Android).and_text("width > 1");
    let before = group.clone();
    assert!(group
        .push(Comparison::new("nope", "=", "1"), LogicalType::And)
        .is_err());
    assert_eq!(group, before);
}

#[test]
fn test_dialect_mismatch_is_rejected() {
    let group = Group::new(Dialect::Darwin).and_text("pixelWidth > 1");
    let err = android().add_condition(group).unwrap_err();
    assert_eq!(
        err,
        FilterError::DialectMismatch {
            expected: "Android".into(),
            found: "Darwin".into(),
        }
    );
}

// ==================== Snapshot Tests ====================

#[test]
fn test_snapshot_is_independent_of_builder() {
    let mut filter = android();
    filter
        .add_condition(Comparison::new("width", ">", "1"))
        .unwrap()
        .add_order_by("_id", true);
    let snapshot = filter.snapshot();

    filter
        .add_condition(Comparison::new("height", ">", "1"))
        .unwrap()
        .add_order_by("title", false);

    assert_eq!(snapshot.where_text, "width > 1");
    assert_eq!(snapshot.order_by, vec![OrderByItem::asc("_id")]);
    assert_eq!(snapshot.sort_clause.as_deref(), Some("_id ASC"));
    assert_eq!(snapshot.dialect, Dialect::Android);
}

#[test]
fn test_for_platform() {
    assert_eq!(
        FilterExpression::for_platform("ios").unwrap().dialect(),
        Dialect::Darwin
    );
    assert_eq!(
        FilterExpression::for_platform("plan9").unwrap_err(),
        FilterError::unsupported_platform("plan9")
    );
}
