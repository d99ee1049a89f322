use std::collections::HashMap;

use crate::ast::Expr;
use crate::error::EvalError;

/// Variable values a scoring formula is evaluated against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalContext {
    variables: HashMap<String, f64>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with one more variable set
    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<HashMap<String, f64>> for EvalContext {
    fn from(variables: HashMap<String, f64>) -> Self {
        EvalContext { variables }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EvalContext {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        EvalContext {
            variables: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Evaluates a compiled formula.
///
/// Arithmetic follows IEEE-754: dividing by zero yields an infinity or NaN
/// rather than an error. Function arguments are evaluated left to right.
///
/// # Errors
///
/// Returns `EvalError::UnknownVariable` for the first variable (in
/// left-to-right order) that `context` does not define.
///
/// # Examples
///
/// ```
/// use shunt::{compile_score, evaluate, EvalContext};
///
/// let formula = compile_score("Limit(Views / 10, 5)").unwrap();
/// let context = EvalContext::new().with_variable("Views", 120.0);
/// assert_eq!(evaluate(&formula, &context).unwrap(), 5.0);
/// ```
pub fn evaluate(expr: &Expr, context: &EvalContext) -> Result<f64, EvalError> {
    match expr {
        Expr::Constant(value) => Ok(*value),
        Expr::Variable(name) => context
            .get(name)
            .ok_or_else(|| EvalError::UnknownVariable { name: name.clone() }),
        Expr::Negate(inner) => Ok(-evaluate(inner, context)?),
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, context)?;
            let right = evaluate(right, context)?;
            Ok(op.apply(left, right))
        }
        Expr::Call { apply, args, .. } => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(apply(&values))
        }
    }
}

impl Expr {
    /// Method form of [`evaluate`].
    pub fn evaluate(&self, context: &EvalContext) -> Result<f64, EvalError> {
        evaluate(self, context)
    }
}
