//! End-to-end tests for query compilation
//!
//! Covers:
//! - Every operator on scalar, nullable and sequence properties
//! - Aggregation of clauses on the same property
//! - Nested and case-insensitive paths
//! - Resolution, coercion and operator errors with clause indices
//! - Programmatic descriptors and analysis mode

mod common;

use common::{Sample, compile, ids, records, sample};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sift_ast::{AggregateMode, DynamicValue, Operator, QueryDescriptor};
use sift_diagnostics::{SFT0002, SFT0100, SFT0201, SFT0202, SFT0300, SiftError};
use sift_eval::{BuilderOptions, DynamicQueryBuilder, Record, Schema};
use sift_ir::{IrSerializer, JsonSerializer};

fn build_err(query: &str) -> SiftError {
    match DynamicQueryBuilder::new().build::<Sample>(query) {
        Ok(predicate) => panic!("Expected '{}' to fail, compiled {}", query, predicate),
        Err(err) => err,
    }
}

// === Scenarios ===

#[test]
fn test_score_threshold_keeps_order() {
    assert_eq!(ids("score:GreaterThanOrEqual:5.0"), vec![2, 3]);
}

#[test]
fn test_tags_contains() {
    let records = vec![
        {
            let mut s = sample(1, 0.0);
            s.tags = vec!["x".into(), "y".into()];
            s
        },
        {
            let mut s = sample(2, 0.0);
            s.tags = vec!["y".into()];
            s
        },
    ];
    let predicate = compile(r#"tags:Contains:"x""#);
    let hits: Vec<i32> = predicate.filter(&records).map(|s| s.id).collect();
    assert_eq!(hits, vec![1]);
}

#[test]
fn test_empty_query_accepts_everything() {
    assert_eq!(ids(""), vec![1, 2, 3]);
    assert_eq!(compile(" ; ").expression().to_string(), "true");
}

// === Operators ===

#[rstest]
#[case("Id:Equal:2", vec![2])]
#[case("Id:NotEqual:2", vec![1, 3])]
#[case("Id:LessThan:2", vec![1])]
#[case("Id:LessThanOrEqual:2", vec![1, 2])]
#[case("Id:GreaterThan:2", vec![3])]
#[case("Id:GreaterThanOrEqual:2", vec![2, 3])]
#[case("Id:ContainsOnValue:[1, 3, 99]", vec![1, 3])]
#[case("Id:ContainsOnValue:2", vec![2])]
#[case("Name:Equal:O'Brien", vec![3])]
#[case("Name:GreaterThan:sample-1", vec![2])]
#[case("Created:LessThan:2024-12-31", vec![1, 2])]
#[case("Status:Equal:suspended", vec![2])]
#[case("Status:GreaterThanOrEqual:Suspended", vec![2, 3])]
#[case("Status:ContainsOnValue:[Active, 2]", vec![1, 3])]
fn test_scalar_operators(#[case] query: &str, #[case] expected: Vec<i32>) {
    assert_eq!(ids(query), expected, "query: {}", query);
}

#[rstest]
#[case("Rank:Equal:null", vec![2])]
#[case("Rank:NotEqual:null", vec![1, 3])]
#[case("Rank:Equal:10", vec![1])]
#[case("Rank:NotEqual:10", vec![2, 3])]
#[case("Rank:LessThan:100", vec![1, 3])]
#[case("Rank:GreaterThan:null", vec![])]
#[case("Rank:ContainsOnValue:[2, 10]", vec![1, 3])]
#[case("Rank:ContainsOnValue:[null, 10]", vec![1, 2])]
#[case("Rank:ContainsOnValue:[null]", vec![2])]
fn test_nullable_operators(#[case] query: &str, #[case] expected: Vec<i32>) {
    assert_eq!(ids(query), expected, "query: {}", query);
}

#[rstest]
#[case("Tags:Equal:[x, y]", vec![1])]
#[case("Tags:Equal:[y, x]", vec![])]
#[case("Tags:Equal:y", vec![2])]
#[case("Tags:Equal:[]", vec![3])]
#[case("Tags:NotEqual:[x, y]", vec![2, 3])]
#[case("Tags:Contains:y", vec![1, 2])]
#[case("Codes:Equal:[1, 2, 3]", vec![1])]
#[case("Codes:Contains:0", vec![2, 3])]
#[case("Readings:Contains:null", vec![1, 3])]
#[case("Readings:Contains:1", vec![1, 2])]
#[case("Readings:Equal:[1, null]", vec![1])]
#[case("Readings:Equal:1", vec![2])]
#[case("Readings:Equal:null", vec![3])]
#[case("Readings:NotEqual:[1, null]", vec![2, 3])]
#[case("Slots:Equal:[null, null]", vec![2])]
#[case("Slots:Contains:null", vec![1, 2])]
#[case("Slots:Contains:4", vec![3])]
fn test_sequence_operators(#[case] query: &str, #[case] expected: Vec<i32>) {
    assert_eq!(ids(query), expected, "query: {}", query);
}

// === Aggregation ===

#[test]
fn test_and_on_same_property_with_different_values_matches_nothing() {
    assert_eq!(ids("Id:Equal:1; And:Id:Equal:2"), Vec::<i32>::new());
}

#[test]
fn test_or_on_same_property_matches_either() {
    assert_eq!(ids("Id:Equal:1; Or:Id:Equal:3"), vec![1, 3]);
}

#[test]
fn test_mixed_chain_is_left_fold() {
    let predicate = compile("Id:Equal:1; Or:Id:Equal:2; And:Id:LessThan:2");
    insta::assert_snapshot!(
        predicate.expression().to_string(),
        @"(Id == 1 OR Id == 2) AND Id < 2"
    );
    let records = records();
    assert_eq!(predicate.filter(&records).map(|s| s.id).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_groups_are_anded() {
    assert_eq!(ids("Score:Equal:5; Id:Equal:2; Or:Id:Equal:1"), vec![2]);
}

#[test]
fn test_aggregate_groups_by_canonical_path() {
    assert_eq!(ids("id:Equal:1; Or:ID:Equal:3"), vec![1, 3]);
}

// === Paths ===

#[test]
fn test_nested_and_case_insensitive_paths() {
    assert_eq!(ids("address.city:Equal:Bergen"), vec![2]);
    assert_eq!(ids("Address.Zip:Equal:0150"), vec![1]);
    let predicate = compile("SCORE:LessThan:4");
    assert_eq!(predicate.expression().comparisons()[0].path, "Score");
}

#[test]
fn test_case_sensitive_option() {
    let builder = DynamicQueryBuilder::with_options(BuilderOptions {
        case_insensitive: false,
        ..BuilderOptions::default()
    });
    let err = builder.build::<Sample>("score:Equal:5").unwrap_err();
    assert_eq!(err.code(), SFT0100);
}

// === Errors ===

#[test]
fn test_unknown_property() {
    match build_err("Id:Equal:1; Address.Country:Equal:NO") {
        SiftError::PropertyNotFound {
            type_name,
            segment,
            clause,
            ..
        } => {
            assert_eq!(type_name, "Sample");
            assert_eq!(segment, "Country");
            assert_eq!(clause, Some(1));
        }
        other => panic!("Expected PropertyNotFound, got {:?}", other),
    }
}

#[test]
fn test_bogus_operator_is_malformed() {
    let err = build_err("score:Bogus:5");
    assert_eq!(err.code(), SFT0002);
    assert!(matches!(err, SiftError::MalformedQueryText { clause: 0, .. }));
}

#[rstest]
#[case("Tags:LessThan:x", SFT0300)]
#[case("Codes:ContainsOnValue:[1]", SFT0300)]
#[case("Id:Contains:1", SFT0300)]
#[case("Id:Equal:2147483648", SFT0202)]
#[case("Id:Equal:null", SFT0201)]
#[case("Codes:Contains:256", SFT0202)]
#[case("Codes:Contains:null", SFT0201)]
#[case("Tags:Equal:[x, null]", SFT0201)]
#[case("Readings:LessThan:1", SFT0300)]
#[case("Slots:Contains:256", SFT0202)]
fn test_compile_errors(#[case] query: &str, #[case] code: sift_diagnostics::ErrorCode) {
    let err = build_err(query);
    assert_eq!(err.code(), code, "query: {}, error: {}", query, err);
    assert_eq!(err.clause(), Some(0));
}

#[test]
fn test_unsupported_operator_message() {
    insta::assert_snapshot!(
        build_err("Id:Equal:1; Tags:LessThan:x").to_string(),
        @"SFT0300: operator LessThan is not supported for Collection<Text> property 'Tags' (clause 1)"
    );
}

#[test]
fn test_analysis_mode_collects_compile_errors() {
    let builder = DynamicQueryBuilder::with_options(BuilderOptions::analysis());
    let err = builder
        .build::<Sample>("Nope:Equal:1; Id:Equal:1; Tags:LessThan:x")
        .unwrap_err();
    let clauses: Vec<_> = err.into_errors().iter().filter_map(SiftError::clause).collect();
    assert_eq!(clauses, vec![0, 2]);
}

// === Descriptors ===

#[test]
fn test_compile_descriptors() {
    let descriptors = vec![
        QueryDescriptor::new(None, Operator::Equal, "Id", 1).unwrap(),
        QueryDescriptor::new(Some(AggregateMode::Or), Operator::Equal, "Id", 2).unwrap(),
        QueryDescriptor::new(
            None,
            Operator::ContainsOnValue,
            "Status",
            DynamicValue::from(vec!["Active", "Suspended"]),
        )
        .unwrap(),
    ];
    let predicate = DynamicQueryBuilder::new()
        .compile_descriptors(Sample::schema(), &descriptors)
        .unwrap();
    let records = records();
    assert_eq!(predicate.filter(&records).map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_blank_descriptor_path_is_rejected() {
    assert!(QueryDescriptor::new(None, Operator::Equal, "  ", 1).is_err());
}

// === Output ===

#[test]
fn test_ir_serializes_to_json() {
    let predicate = compile("Score:GreaterThanOrEqual:5; Tags:Contains:x");
    let json = JsonSerializer::new().serialize(predicate.expression()).unwrap();
    insta::assert_snapshot!(json, @r#"{"type":"And","left":{"type":"Compare","path":"Score","operator":"GreaterThanOrEqual","shape":"Float64","operand":5.0},"right":{"type":"Compare","path":"Tags","operator":"Contains","shape":"Collection<Text>","operand":"x"}}"#);
}

#[test]
fn test_predicate_is_shareable_across_threads() {
    let predicate = compile("Score:GreaterThan:4");
    let records = records();
    let hits = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let matches = predicate.as_fn();
                let records = &records;
                scope.spawn(move || records.iter().filter(|r| matches(*r)).count())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(hits, vec![2; 4]);
}

#[test]
fn test_explicit_schema() {
    let schema = Schema::builder("Pair")
        .scalar("Left", |p: &(i32, String)| &p.0)
        .scalar("Right", |p: &(i32, String)| &p.1)
        .build();
    let predicate = DynamicQueryBuilder::new()
        .build_with(&schema, "left:GreaterThan:1; right:Equal:b")
        .unwrap();
    let pairs = vec![(1, "b".to_string()), (2, "b".to_string()), (3, "c".to_string())];
    assert_eq!(predicate.filter(&pairs).count(), 1);
}
