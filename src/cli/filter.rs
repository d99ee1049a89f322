//! Compile filter expressions into JSON trees

use std::collections::HashMap;

use super::{CliError, json_to_leaves};
use crate::output::filter_to_json;
use crate::{Profile, check_syntax, compile_filter};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// The filter expression to compile
    pub expression: String,
    /// JSON object mapping leaf names to their payloads
    pub leaves: Option<String>,
    /// Leaf names whose payload is the name itself
    pub names: Vec<String>,
    /// Only validate syntax, don't resolve leaves
    pub syntax_only: bool,
}

/// Result of a filter operation
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// The compiled tree as JSON
    Tree(serde_json::Value),
}

/// Execute a filter operation
pub fn execute_filter(options: &FilterOptions) -> Result<FilterOutcome, CliError> {
    if options.syntax_only {
        check_syntax(&options.expression, Profile::Boolean)?;
        return Ok(FilterOutcome::SyntaxValid);
    }

    let mut leaves: HashMap<String, serde_json::Value> = match &options.leaves {
        Some(json) => json_to_leaves(serde_json::from_str(json)?)?,
        None => HashMap::new(),
    };
    for name in &options.names {
        leaves.insert(name.clone(), serde_json::Value::String(name.clone()));
    }
    if leaves.is_empty() {
        return Err(CliError::NoInput);
    }

    let filter = compile_filter(&options.expression, &leaves)?;
    Ok(FilterOutcome::Tree(filter_to_json(&filter, &|leaf| leaf.clone())))
}
