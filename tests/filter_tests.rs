// tests/filter_tests.rs

use std::collections::HashMap;

use shunt::ast::{Filter, LogicalOp};
use shunt::{CompileError, ErrorKind, compile_filter};

/// Leaves named `A`..`H`, each resolving to its lowercase letter.
fn letters() -> HashMap<String, char> {
    ('A'..='H')
        .map(|c| (c.to_string(), c.to_ascii_lowercase()))
        .collect()
}

fn compile(input: &str) -> Filter<char> {
    compile_filter(input, &letters()).unwrap()
}

fn leaf(c: char) -> Filter<char> {
    Filter::Leaf(c)
}

fn not(inner: Filter<char>) -> Filter<char> {
    Filter::negate(inner)
}

/// No `And` directly under an `And`, no `Or` directly under an `Or`.
fn is_flat<L>(filter: &Filter<L>) -> bool {
    match filter {
        Filter::Leaf(_) => true,
        Filter::Not(inner) => is_flat(inner),
        Filter::And(children) => children
            .iter()
            .all(|c| !matches!(c, Filter::And(_)) && is_flat(c)),
        Filter::Or(children) => children
            .iter()
            .all(|c| !matches!(c, Filter::Or(_)) && is_flat(c)),
    }
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_and_chain_under_or() {
    assert_eq!(
        compile("A and B and C or D"),
        Filter::Or(vec![
            Filter::And(vec![leaf('a'), leaf('b'), leaf('c')]),
            leaf('d'),
        ])
    );
}

#[test]
fn test_or_chain_is_one_node() {
    assert_eq!(
        compile("A or B or C or D"),
        Filter::Or(vec![leaf('a'), leaf('b'), leaf('c'), leaf('d')])
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        compile("A or B and C"),
        Filter::Or(vec![leaf('a'), Filter::And(vec![leaf('b'), leaf('c')])])
    );
}

#[test]
fn test_grouped_right_operand_absorbs_left() {
    assert_eq!(
        compile("A or (B or C)"),
        Filter::Or(vec![leaf('a'), leaf('b'), leaf('c')])
    );
}

#[test]
fn test_grouped_left_operand_gets_right_in_front() {
    assert_eq!(
        compile("(A and B) and C"),
        Filter::And(vec![leaf('c'), leaf('a'), leaf('b')])
    );
}

#[test]
fn test_two_groups_are_spliced_in_order() {
    assert_eq!(
        compile("(A and B) and (C and D)"),
        Filter::And(vec![leaf('a'), leaf('b'), leaf('c'), leaf('d')])
    );
}

#[test]
fn test_different_kinds_nest() {
    assert_eq!(
        compile("(A or B) and (C or D)"),
        Filter::And(vec![
            Filter::Or(vec![leaf('a'), leaf('b')]),
            Filter::Or(vec![leaf('c'), leaf('d')]),
        ])
    );
}

#[test]
fn test_not_blocks_flattening() {
    assert_eq!(
        compile("A and (not (B and C))"),
        Filter::And(vec![leaf('a'), not(Filter::And(vec![leaf('b'), leaf('c')]))])
    );
}

// ============================================================================
// Not
// ============================================================================

#[test]
fn test_not_covers_rest_of_expression() {
    assert_eq!(
        compile("not A and B"),
        not(Filter::And(vec![leaf('a'), leaf('b')]))
    );
}

#[test]
fn test_parenthesized_not() {
    assert_eq!(
        compile("(not A) and B"),
        Filter::And(vec![not(leaf('a')), leaf('b')])
    );
}

#[test]
fn test_double_not_is_kept() {
    assert_eq!(compile("not not A"), not(not(leaf('a'))));
}

#[test]
fn test_nested_not_groups() {
    let expected = not(Filter::Or(vec![
        Filter::And(vec![
            leaf('a'),
            not(not(Filter::And(vec![leaf('b'), not(leaf('c'))]))),
        ]),
        not(leaf('d')),
    ]));
    assert_eq!(
        compile("not (A and not (not B and not C) or not D)"),
        expected
    );
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_leaves_are_cloned_payloads() {
    let leaves: HashMap<String, Vec<u32>> = [
        ("Small".to_string(), vec![1, 2]),
        ("Large".to_string(), vec![100]),
    ]
    .into_iter()
    .collect();

    let filter = compile_filter("Small or Large", &leaves).unwrap();
    assert_eq!(filter.leaves(), vec![&vec![1, 2], &vec![100]]);
    // The map is untouched and can be reused.
    assert_eq!(leaves.len(), 2);
}

#[test]
fn test_same_name_twice() {
    assert_eq!(
        compile("A and not A"),
        Filter::And(vec![leaf('a'), not(leaf('a'))])
    );
}

#[test]
fn test_leaves_in_source_order() {
    let filter = compile("A or B and not C or D");
    assert_eq!(filter.leaves(), vec![&'a', &'b', &'c', &'d']);
}

#[test]
fn test_map_leaves_keeps_shape() {
    let filter = compile("A and (B or not C)");
    let mapped = filter.clone().map_leaves(&mut |c: char| c.to_ascii_uppercase());
    assert_eq!(
        mapped,
        Filter::And(vec![
            Filter::Leaf('A'),
            Filter::Or(vec![Filter::Leaf('B'), Filter::negate(Filter::Leaf('C'))]),
        ])
    );
    assert_eq!(mapped.node_count(), filter.node_count());
}

#[test]
fn test_node_count() {
    assert_eq!(compile("A").node_count(), 1);
    assert_eq!(compile("not A").node_count(), 2);
    // or(and(a, b, c), d)
    assert_eq!(compile("A and B and C or D").node_count(), 6);
}

// ============================================================================
// Combine
// ============================================================================

#[test]
fn test_combine_rules() {
    let ab = Filter::And(vec![leaf('a'), leaf('b')]);
    let cd = Filter::And(vec![leaf('c'), leaf('d')]);

    assert_eq!(
        Filter::combine(LogicalOp::And, leaf('x'), ab.clone()),
        Filter::And(vec![leaf('x'), leaf('a'), leaf('b')])
    );
    assert_eq!(
        Filter::combine(LogicalOp::And, ab.clone(), leaf('x')),
        Filter::And(vec![leaf('x'), leaf('a'), leaf('b')])
    );
    assert_eq!(
        Filter::combine(LogicalOp::And, ab.clone(), cd),
        Filter::And(vec![leaf('a'), leaf('b'), leaf('c'), leaf('d')])
    );
    assert_eq!(
        Filter::combine(LogicalOp::Or, ab.clone(), leaf('x')),
        Filter::Or(vec![ab, leaf('x')])
    );
}

#[test]
fn test_compiled_filters_are_flat() {
    for input in [
        "A and B and C or D",
        "(A and B) and (C and (D and E))",
        "A or (B or (C and D and (E and F))) or G",
        "not (A or B) or (not C or D)",
        "((A or B) and (C or D)) and (E or F and G or H)",
    ] {
        assert!(is_flat(&compile(input)), "{} is not flat", input);
    }
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_display() {
    assert_eq!(compile("A and B and C or D").to_string(), "(a and b and c) or d");
    assert_eq!(compile("not A").to_string(), "not a");
    assert_eq!(compile("not (A or B)").to_string(), "not (a or b)");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_leaf() {
    let err = compile_filter("A and Z", &letters()).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownLeaf {
            name: "Z".to_string(),
            position: 6
        }
    );
}

#[test]
fn test_uppercase_keyword_is_a_leaf_name() {
    let err = compile_filter("A AND B", &letters()).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownLeaf {
            name: "AND".to_string(),
            position: 2
        }
    );
}

#[test]
fn test_number_is_unsupported() {
    let err = compile_filter("A and 1", &letters()).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedToken {
            token: "1".to_string(),
            position: 6
        }
    );
}

#[test]
fn test_structural_errors() {
    for input in ["A and", "and A", "not", "A B", "(A or B", "A or B)", ""] {
        let err = compile_filter(input, &letters()).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::InvalidNodeCount,
            "{} should be an invalid node count",
            input
        );
    }
}

#[test]
fn test_arithmetic_symbols_are_invalid() {
    let err = compile_filter("A & B", &letters()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
}
