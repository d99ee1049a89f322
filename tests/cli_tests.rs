// tests/cli_tests.rs
#![cfg(feature = "cli")]

use serde_json::json;
use shunt::Profile;
use shunt::cli::{
    CliError, DocCategory, FilterOptions, FilterOutcome, ScoreOptions, ScoreOutcome,
    execute_filter, execute_rpn, execute_score, get_doc_category, get_docs_overview,
    json_to_context, parse_assignment,
};

fn score(formula: &str, vars: Option<&str>, assignments: &[&str]) -> Result<ScoreOutcome, CliError> {
    execute_score(&ScoreOptions {
        formula: formula.to_string(),
        vars: vars.map(str::to_string),
        assignments: assignments.iter().map(|s| s.to_string()).collect(),
        syntax_only: false,
    })
}

fn filter(expression: &str, leaves: Option<&str>, names: &[&str]) -> Result<FilterOutcome, CliError> {
    execute_filter(&FilterOptions {
        expression: expression.to_string(),
        leaves: leaves.map(str::to_string),
        names: names.iter().map(|s| s.to_string()).collect(),
        syntax_only: false,
    })
}

// ============================================================================
// score
// ============================================================================

#[test]
fn test_score_with_json_vars() {
    let outcome = score("Max(Views / 10, 1)", Some(r#"{"Views": 250}"#), &[]).unwrap();
    assert_eq!(outcome, ScoreOutcome::Value(25.0));
}

#[test]
fn test_score_with_assignments() {
    let outcome = score("a * b", None, &["a=3", " b = 1.5 "]).unwrap();
    assert_eq!(outcome, ScoreOutcome::Value(4.5));
}

#[test]
fn test_assignments_override_json() {
    let outcome = score("a + b", Some(r#"{"a": 1, "b": 2}"#), &["b=10"]).unwrap();
    assert_eq!(outcome, ScoreOutcome::Value(11.0));
}

#[test]
fn test_score_constant_formula_needs_no_input() {
    let outcome = score("1 - 2 - 3", None, &[]).unwrap();
    assert_eq!(outcome, ScoreOutcome::Value(2.0));
}

#[test]
fn test_score_without_input() {
    let err = score("Views * 2", None, &[]).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_score_missing_variable() {
    let err = score("a + b", None, &["a=1"]).unwrap_err();
    assert!(matches!(err, CliError::Eval(_)));
    assert_eq!(err.to_string(), "Evaluation error: unknown variable 'b'");
}

#[test]
fn test_score_compile_error() {
    let err = score("Foo(1)", None, &[]).unwrap_err();
    match err {
        CliError::Compile(e) => assert_eq!(e.position(), Some(0)),
        other => panic!("Expected compile error, got {:?}", other),
    }
}

#[test]
fn test_score_rejects_bad_input() {
    assert!(matches!(
        score("a", Some("[1]"), &[]).unwrap_err(),
        CliError::InvalidInput(_)
    ));
    assert!(matches!(
        score("a", Some(r#"{"a": "one"}"#), &[]).unwrap_err(),
        CliError::InvalidInput(_)
    ));
    assert!(matches!(
        score("a", Some("{"), &[]).unwrap_err(),
        CliError::Json(_)
    ));
    assert!(matches!(
        score("a", None, &["a=x"]).unwrap_err(),
        CliError::InvalidAssignment(_)
    ));
}

#[test]
fn test_score_syntax_only() {
    let options = ScoreOptions {
        formula: "Clamp(Views, 0, 10)".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert_eq!(execute_score(&options).unwrap(), ScoreOutcome::SyntaxValid);

    let options = ScoreOptions {
        formula: "Clamp(Views, 0)".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(
        execute_score(&options).unwrap_err(),
        CliError::Compile(_)
    ));
}

// ============================================================================
// filter
// ============================================================================

#[test]
fn test_filter_with_names() {
    let outcome = filter("A and B", None, &["A", "B"]).unwrap();
    assert_eq!(outcome, FilterOutcome::Tree(json!({"and": ["A", "B"]})));
}

#[test]
fn test_filter_with_json_leaves() {
    let leaves = r#"{
        "Open": {"field": "state", "eq": "open"},
        "Mine": {"field": "owner", "eq": "me"},
        "Old": {"field": "age", "gt": 30}
    }"#;
    let outcome = filter("Open and not (Mine or Old)", Some(leaves), &[]).unwrap();
    assert_eq!(
        outcome,
        FilterOutcome::Tree(json!({
            "and": [
                {"field": "state", "eq": "open"},
                {"not": {"or": [
                    {"field": "owner", "eq": "me"},
                    {"field": "age", "gt": 30}
                ]}}
            ]
        }))
    );
}

#[test]
fn test_filter_unknown_leaf() {
    let err = filter("A or C", None, &["A", "B"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Compile error: unknown leaf 'C' at position 5"
    );
}

#[test]
fn test_filter_without_input() {
    let err = filter("A", None, &[]).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_filter_syntax_only() {
    let options = FilterOptions {
        expression: "A and (B or not C)".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert_eq!(execute_filter(&options).unwrap(), FilterOutcome::SyntaxValid);
}

// ============================================================================
// rpn
// ============================================================================

#[test]
fn test_rpn() {
    assert_eq!(execute_rpn("1 - 2 - 3", Profile::Arithmetic).unwrap(), "1 2 3 - -");
    assert_eq!(
        execute_rpn("A and B or C", Profile::Boolean).unwrap(),
        "A B and C or"
    );
    assert!(execute_rpn("(1", Profile::Arithmetic).is_err());
}

#[test]
fn test_profile_names() {
    assert_eq!("score".parse::<Profile>().unwrap(), Profile::Arithmetic);
    assert_eq!("Filter".parse::<Profile>().unwrap(), Profile::Boolean);
    assert!("sql".parse::<Profile>().is_err());
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_parse_assignment() {
    assert_eq!(parse_assignment(" x = 1.5 ").unwrap(), ("x".to_string(), 1.5));
    assert_eq!(
        parse_assignment("stats.views=-3").unwrap(),
        ("stats.views".to_string(), -3.0)
    );
    assert!(parse_assignment("=1").is_err());
    assert!(parse_assignment("1x=1").is_err());
    assert!(parse_assignment("x").is_err());
}

#[test]
fn test_json_to_context() {
    let context = json_to_context(json!({"a": 1, "b": 2.5})).unwrap();
    assert_eq!(context.get("a"), Some(1.0));
    assert_eq!(context.get("b"), Some(2.5));
    assert!(json_to_context(json!({"a": null})).is_err());
}

// ============================================================================
// Docs
// ============================================================================

#[test]
fn test_docs_overview_lists_categories() {
    let overview = get_docs_overview();
    for category in ["syntax", "operators", "functions", "filters", "errors"] {
        assert!(overview.contains(category), "missing {}", category);
        assert!(get_doc_category(category).is_ok());
    }
}

#[test]
fn test_doc_category_aliases() {
    assert_eq!(DocCategory::parse("ops"), Some(DocCategory::Operators));
    assert_eq!(DocCategory::parse("Boolean"), Some(DocCategory::Filters));
    assert!(get_doc_category("precedence").unwrap().contains("1 - (2 - 3)"));
}

#[test]
fn test_unknown_doc_category() {
    let err = get_doc_category("nope").unwrap_err();
    assert!(matches!(err, CliError::UnknownCategory(ref c) if c == "nope"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_cli_error_wraps_source() {
    use std::error::Error;

    let err = CliError::from(shunt::compile_score("Max(1 2)").unwrap_err());
    assert!(err.to_string().starts_with("Compile error: invalid node count"));
    assert!(err.source().is_some());

    let err: CliError = std::io::Error::other("closed").into();
    assert_eq!(err.to_string(), "IO error: closed");

    assert!(CliError::NoInput.source().is_none());
    assert_eq!(
        CliError::InvalidAssignment("x".to_string()).to_string(),
        "Invalid assignment: 'x' (expected name=number)"
    );
}
