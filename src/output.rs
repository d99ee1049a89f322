//! JSON rendering of compiled trees and token streams.
//!
//! Filter trees are what a downstream query builder consumes, so they get a
//! plain nested shape:
//!
//! ```text
//! {"or": [{"and": [<A>, <B>, <C>]}, <D>]}
//! {"not": <A>}
//! ```
//!
//! where each `<leaf>` is whatever the caller's renderer returns. Formula
//! trees are rendered as tagged objects, mainly for diagnostics.
//!
//! Objects use `serde_json`'s default sorted map, so output is deterministic.
//!
//! # Examples
//!
//! ```
//! use shunt::ast::Filter;
//! use shunt::output::{filter_to_json, to_json};
//!
//! let filter = Filter::Or(vec![Filter::Leaf("a"), Filter::negate(Filter::Leaf("b"))]);
//! let json = filter_to_json(&filter, &|leaf: &&str| serde_json::json!(leaf));
//! assert_eq!(to_json(&json), r#"{"or":["a",{"not":"b"}]}"#);
//! ```

use serde_json::{Value, json};

use crate::ast::{Expr, Filter, Token};

/// Renders a filter tree, delegating each leaf to `leaf`.
pub fn filter_to_json<L, F>(filter: &Filter<L>, leaf: &F) -> Value
where
    F: Fn(&L) -> Value,
{
    match filter {
        Filter::Leaf(l) => leaf(l),
        Filter::Not(inner) => json!({ "not": filter_to_json(inner, leaf) }),
        Filter::And(children) => json!({ "and": children_to_json(children, leaf) }),
        Filter::Or(children) => json!({ "or": children_to_json(children, leaf) }),
    }
}

fn children_to_json<L, F>(children: &[Filter<L>], leaf: &F) -> Vec<Value>
where
    F: Fn(&L) -> Value,
{
    children.iter().map(|c| filter_to_json(c, leaf)).collect()
}

/// Renders a formula tree.
///
/// Non-finite constants have no JSON number form and become `null`.
pub fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::Constant(n) => json!({ "const": number(*n) }),
        Expr::Variable(name) => json!({ "var": name }),
        Expr::Negate(inner) => json!({ "neg": expr_to_json(inner) }),
        Expr::Binary { op, left, right } => json!({
            "op": op.symbol().to_string(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Call { name, args, .. } => json!({
            "call": name,
            "args": args.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
    }
}

/// Renders a token stream as an array of token texts.
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(|t| Value::String(t.to_string())).collect())
}

/// JSON for a number, `null` when it is NaN or infinite.
pub fn number(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Compact JSON text.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}

/// JSON text with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    format!("{:#}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Profile, compile_score, to_rpn};

    #[test]
    fn test_expr_to_json() {
        let expr = compile_score("-x + Max(1, 2)").unwrap();
        assert_eq!(
            expr_to_json(&expr),
            json!({
                "op": "+",
                "left": {"neg": {"var": "x"}},
                "right": {"call": "Max", "args": [{"const": 1.0}, {"const": 2.0}]},
            })
        );
    }

    #[test]
    fn test_tokens_to_json() {
        let rpn = to_rpn("1 - -2", Profile::Arithmetic).unwrap();
        assert_eq!(to_json(&tokens_to_json(&rpn)), r#"["1","2","neg","-"]"#);
    }

    #[test]
    fn test_non_finite_numbers_are_null() {
        assert_eq!(number(f64::NAN), Value::Null);
        assert_eq!(number(f64::INFINITY), Value::Null);
        assert_eq!(number(1.5), json!(1.5));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let value = json!({"and": ["A", "B"]});
        assert_eq!(to_json_pretty(&value), "{\n  \"and\": [\n    \"A\",\n    \"B\"\n  ]\n}");
    }
}
