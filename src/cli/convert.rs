//! JSON and argument conversion for CLI inputs

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::CliError;
use crate::EvalContext;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\p{Alphabetic}_][\p{Alphabetic}\p{Nd}_.]*)\s*=\s*(\S+)\s*$")
        .expect("valid regex")
});

/// Convert a JSON object of numbers into an evaluation context
pub fn json_to_context(v: serde_json::Value) -> Result<EvalContext, CliError> {
    let serde_json::Value::Object(obj) = v else {
        return Err(CliError::InvalidInput(
            "variables must be a JSON object".to_string(),
        ));
    };

    let mut context = EvalContext::new();
    for (name, value) in obj {
        let number = value.as_f64().ok_or_else(|| {
            CliError::InvalidInput(format!("variable '{}' is not a number", name))
        })?;
        context.set(name, number);
    }
    Ok(context)
}

/// Convert a JSON object into a leaf map; each value is kept as the leaf's payload
pub fn json_to_leaves(
    v: serde_json::Value,
) -> Result<HashMap<String, serde_json::Value>, CliError> {
    match v {
        serde_json::Value::Object(obj) => Ok(obj.into_iter().collect()),
        _ => Err(CliError::InvalidInput(
            "leaves must be a JSON object".to_string(),
        )),
    }
}

/// Parse a `name=number` command-line assignment
pub fn parse_assignment(arg: &str) -> Result<(String, f64), CliError> {
    let invalid = || CliError::InvalidAssignment(arg.to_string());
    let caps = ASSIGNMENT.captures(arg).ok_or_else(invalid)?;
    let value = caps[2].parse::<f64>().map_err(|_| invalid())?;
    Ok((caps[1].to_string(), value))
}
