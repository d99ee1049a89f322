//! Compile and evaluate scoring formulas

use super::{CliError, json_to_context, parse_assignment};
use crate::ast::tokens::render;
use crate::{EvalContext, Profile, check_syntax, compile_score, to_rpn};

/// Options for the score command
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// The formula to compile
    pub formula: String,
    /// JSON object of variable values
    pub vars: Option<String>,
    /// `name=number` assignments, applied after `vars`
    pub assignments: Vec<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a score operation
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// The formula evaluated to this value
    Value(f64),
}

/// Execute a score operation
pub fn execute_score(options: &ScoreOptions) -> Result<ScoreOutcome, CliError> {
    if options.syntax_only {
        check_syntax(&options.formula, Profile::Arithmetic)?;
        return Ok(ScoreOutcome::SyntaxValid);
    }

    let expr = compile_score(&options.formula)?;

    let mut context = match &options.vars {
        Some(json) => json_to_context(serde_json::from_str(json)?)?,
        None => EvalContext::new(),
    };
    for arg in &options.assignments {
        let (name, value) = parse_assignment(arg)?;
        context.set(name, value);
    }

    if context.is_empty() && !expr.variables().is_empty() {
        return Err(CliError::NoInput);
    }

    Ok(ScoreOutcome::Value(expr.evaluate(&context)?))
}

/// Render `expression` as RPN under `profile`
pub fn execute_rpn(expression: &str, profile: Profile) -> Result<String, CliError> {
    Ok(render(&to_rpn(expression, profile)?))
}
