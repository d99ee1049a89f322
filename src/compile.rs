//! Entry points that run the whole pipeline: text, tokens, RPN, tree.

use std::collections::HashMap;

use crate::ast::{Expr, Filter};
use crate::builder::{FilterAssembler, ScoreAssembler, ShapeAssembler, build_tree};
use crate::error::CompileResult;
use crate::lexer::tokenize;
use crate::parser::Parser;
use crate::profile::Profile;
use crate::registry::FunctionRegistry;

/// Compiles scoring formulas against a function registry.
///
/// # Examples
///
/// ```
/// use shunt::{EvalContext, ScoreCompiler};
/// use shunt::registry::FunctionRegistry;
///
/// let registry = FunctionRegistry::builtin();
/// let compiler = ScoreCompiler::new(&registry);
/// let formula = compiler.compile("Max(5 + 6, 1 * 10)").unwrap();
/// assert_eq!(formula.evaluate(&EvalContext::new()).unwrap(), 11.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoreCompiler<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> ScoreCompiler<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        ScoreCompiler { functions }
    }

    pub fn compile(&self, text: &str) -> CompileResult<Expr> {
        let tokens = tokenize(text, Profile::Arithmetic)?;
        let rpn = Parser::new(Profile::Arithmetic)
            .with_functions(self.functions)
            .to_rpn(&tokens)?;
        let expr = build_tree(&rpn, &ScoreAssembler::new(self.functions))?;
        log::debug!("compiled formula {:?} ({} tokens)", text, tokens.len());
        Ok(expr)
    }
}

impl Default for ScoreCompiler<'static> {
    fn default() -> Self {
        ScoreCompiler::new(FunctionRegistry::shared())
    }
}

/// Compiles a scoring formula with the built-in functions.
///
/// # Errors
///
/// Any [`CompileError`](crate::CompileError); variables are not checked until
/// evaluation.
pub fn compile_score(text: &str) -> CompileResult<Expr> {
    ScoreCompiler::default().compile(text)
}

/// Compiles a filter expression, resolving each name in `leaves`.
///
/// The returned tree holds clones of the resolved leaves.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use shunt::{compile_filter, Filter};
///
/// let leaves: HashMap<String, &str> =
///     [("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")]
///         .into_iter()
///         .map(|(k, v)| (k.to_string(), v))
///         .collect();
///
/// let filter = compile_filter("A and B and C or D", &leaves).unwrap();
/// assert_eq!(
///     filter,
///     Filter::Or(vec![
///         Filter::And(vec![Filter::Leaf("a"), Filter::Leaf("b"), Filter::Leaf("c")]),
///         Filter::Leaf("d"),
///     ])
/// );
/// ```
///
/// # Errors
///
/// `UnknownLeaf` for a name missing from `leaves`, plus the structural errors
/// shared with formulas.
pub fn compile_filter<L: Clone>(text: &str, leaves: &HashMap<String, L>) -> CompileResult<Filter<L>> {
    let tokens = tokenize(text, Profile::Boolean)?;
    let rpn = Parser::new(Profile::Boolean).to_rpn(&tokens)?;
    let filter = build_tree(&rpn, &FilterAssembler::new(leaves))?;
    log::debug!("compiled filter {:?} ({} tokens)", text, tokens.len());
    Ok(filter)
}

/// Checks that `text` is well formed under `profile` without building a tree.
///
/// Operand counts and function arities are checked; filter leaf names are
/// not resolved, so no leaf map is needed.
pub fn check_syntax(text: &str, profile: Profile) -> CompileResult<()> {
    let functions = match profile {
        Profile::Arithmetic => Some(FunctionRegistry::shared()),
        Profile::Boolean => None,
    };
    let tokens = tokenize(text, profile)?;
    let mut parser = Parser::new(profile);
    if let Some(functions) = functions {
        parser = parser.with_functions(functions);
    }
    let rpn = parser.to_rpn(&tokens)?;
    build_tree(&rpn, &ShapeAssembler::new(profile, functions))
}
