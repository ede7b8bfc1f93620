//! Tests for query clause parsing
//!
//! Covers:
//! - Operator and aggregate keywords
//! - Scalar, quoted and list values
//! - Whitespace and case tolerance
//! - Malformed clause reporting

use pretty_assertions::assert_eq;
use rstest::rstest;
use sift_ast::{AggregateMode, DynamicValue, Operator, QueryDescriptor};
use sift_diagnostics::{SiftError, SFT0002, SFT0005};
use sift_parser::{parse_descriptors, parse_query, parse_with_mode, ParseMode};

fn parse_one(input: &str) -> QueryDescriptor {
    let mut descriptors = parse_descriptors(input)
        .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", input, e));
    assert_eq!(descriptors.len(), 1, "expected one clause in '{}'", input);
    descriptors.remove(0)
}

// === Operators ===

#[rstest]
#[case("score:Equal:5", Operator::Equal)]
#[case("score:NotEqual:5", Operator::NotEqual)]
#[case("score:LessThan:5", Operator::LessThan)]
#[case("score:LessThanOrEqual:5", Operator::LessThanOrEqual)]
#[case("score:GreaterThan:5", Operator::GreaterThan)]
#[case("score:GreaterThanOrEqual:5", Operator::GreaterThanOrEqual)]
#[case("tags:Contains:5", Operator::Contains)]
#[case("score:ContainsOnValue:[5]", Operator::ContainsOnValue)]
#[case("score:greaterthan:5", Operator::GreaterThan)]
#[case("score:EQUAL:5", Operator::Equal)]
fn test_operator_keywords(#[case] input: &str, #[case] expected: Operator) {
    assert_eq!(parse_one(input).operator(), expected);
}

// === Aggregates ===

#[test]
fn test_aggregate_prefix() {
    let desc = parse_one("Or:score:Equal:5");
    assert_eq!(desc.aggregate(), Some(AggregateMode::Or));
    assert_eq!(desc.property_path().as_str(), "score");

    let desc = parse_one("and : score : Equal : 5");
    assert_eq!(desc.aggregate(), Some(AggregateMode::And));
}

#[test]
fn test_property_named_like_aggregate() {
    let desc = parse_one("And:Equal:5");
    assert_eq!(desc.aggregate(), None);
    assert_eq!(desc.property_path().as_str(), "And");
    assert_eq!(desc.operator(), Operator::Equal);
}

// === Values ===

#[rstest]
#[case("score:Equal:5.0", DynamicValue::number("5.0"))]
#[case("score:Equal:-3", DynamicValue::number("-3"))]
#[case("score:Equal:1e10", DynamicValue::number("1e10"))]
#[case("flag:Equal:TRUE", DynamicValue::Boolean(true))]
#[case("count:Equal:null", DynamicValue::Null)]
#[case("name:Equal:plain text", DynamicValue::text("plain text"))]
#[case(r#"name:Equal:"5""#, DynamicValue::text("5"))]
#[case("name:Equal:'null'", DynamicValue::text("null"))]
#[case("at:Equal:2024-01-15T10:30:00Z", DynamicValue::text("2024-01-15T10:30:00Z"))]
fn test_scalar_values(#[case] input: &str, #[case] expected: DynamicValue) {
    assert_eq!(parse_one(input).value(), &expected);
}

#[test]
fn test_list_values() {
    let desc = parse_one(r#"status:ContainsOnValue:[Active, "On Hold", 3, null]"#);
    assert!(desc.is_multi_value());
    assert_eq!(
        desc.value(),
        &DynamicValue::Sequence(vec![
            DynamicValue::text("Active"),
            DynamicValue::text("On Hold"),
            DynamicValue::number("3"),
            DynamicValue::Null,
        ])
    );
    assert_eq!(parse_one("tags:Equal:[]").value(), &DynamicValue::Sequence(vec![]));
}

#[test]
fn test_nested_path_and_whitespace() {
    let desc = parse_one("   Owner.Address.City :  Equal :  Oslo   ");
    assert_eq!(desc.property_path().segments().len(), 3);
    assert_eq!(desc.value(), &DynamicValue::text("Oslo"));
}

#[test]
fn test_display_parses_back() {
    let input = r#"Or:owner.name:ContainsOnValue:["a;b", 'c"d', 4.5]"#;
    let desc = parse_one(input);
    assert_eq!(parse_one(&desc.to_string()), desc);
}

// === Queries ===

#[test]
fn test_clause_spans() {
    let query = "id:Equal:1;  score:GreaterThan:2 ;";
    let descriptors = parse_query(query).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[1].span.slice(query), "score:GreaterThan:2");
}

#[test]
fn test_empty_query() {
    assert!(parse_query("").unwrap().is_empty());
    assert!(parse_query(" ; ;").unwrap().is_empty());
}

// === Errors ===

#[test]
fn test_bogus_operator_is_malformed() {
    let err = parse_query("id:Equal:1; score:Bogus:5").unwrap_err();
    match &err {
        SiftError::MalformedQueryText {
            code,
            clause,
            text,
            location,
            ..
        } => {
            assert_eq!(*code, SFT0002);
            assert_eq!(*clause, 1);
            assert_eq!(text, "score:Bogus:5");
            assert_eq!(location.as_ref().map(|l| l.column), Some(19));
        }
        other => panic!("Expected MalformedQueryText, got {:?}", other),
    }
    insta::assert_snapshot!(err.to_string(), @"SFT0002: malformed clause 1 'score:Bogus:5': unknown operator 'Bogus'");
}

#[rstest]
#[case("score")]
#[case("score:Equal")]
#[case("score:Equal:")]
#[case(":Equal:5")]
#[case("score:Equal:[1, 2")]
#[case(r#"name:Equal:"open"#)]
#[case("a..b:Equal:1")]
fn test_malformed_clauses(#[case] input: &str) {
    let err = parse_query(input).unwrap_err();
    assert!(
        matches!(err, SiftError::MalformedQueryText { clause: 0, .. }),
        "unexpected error for '{}': {:?}",
        input,
        err
    );
}

#[test]
fn test_unterminated_string_code() {
    let err = parse_query(r#"name:Equal:"open; id:Equal:1"#).unwrap_err();
    assert_eq!(err.code(), SFT0005);
}

#[test]
fn test_analysis_mode_reports_every_clause() {
    let result = parse_with_mode("a:Bogus:1; b:Equal:2; c:Nope:3", ParseMode::Analysis);
    assert!(!result.is_success());
    let err = result.into_result().unwrap_err();
    let clauses: Vec<_> = err.into_errors().iter().filter_map(SiftError::clause).collect();
    assert_eq!(clauses, vec![0, 2]);
}
