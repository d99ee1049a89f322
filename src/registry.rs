//! Function registry for scoring formulas.
//!
//! A function is a `(name, arity, builder)` triple. The builder receives the
//! argument nodes in source order and returns the node that represents the
//! call, so new functions never require changes to the converter or the tree
//! builder. Most builders return an [`Expr::Call`] carrying the numeric
//! semantics, but a builder may just as well rewrite the call into existing
//! nodes:
//!
//! ```
//! use shunt::ast::{ArithOp, Expr};
//! use shunt::registry::FunctionRegistry;
//!
//! fn average(mut args: Vec<Expr>) -> Expr {
//!     let right = args.pop().unwrap();
//!     let left = args.pop().unwrap();
//!     let sum = Expr::binary(ArithOp::Plus, left, right);
//!     Expr::binary(ArithOp::Div, sum, Expr::constant(2.0))
//! }
//!
//! let registry = FunctionRegistry::builtin().with("Avg", 2, average).unwrap();
//! assert_eq!(registry.arity("Avg"), Some(2));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Expr;
use crate::error::RegistryError;

/// Turns the argument nodes of a call into the node that replaces it.
pub type NodeBuilder = fn(Vec<Expr>) -> Expr;

/// Arity and builder of one registered function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSpec {
    pub arity: usize,
    pub build: NodeBuilder,
}

/// Read-only lookup from function name to [`FunctionSpec`].
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionSpec>,
}

static BUILTINS: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::builtin);

static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{Nd}_.]*$").expect("valid regex"));

impl FunctionRegistry {
    /// A registry with no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `Max`, `Min`, `Clamp` and `Limit`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("Max", 2, build_max);
        registry.insert("Min", 2, build_min);
        registry.insert("Clamp", 3, build_clamp);
        registry.insert("Limit", 2, build_limit);
        registry
    }

    /// The process-wide built-in registry.
    pub fn shared() -> &'static FunctionRegistry {
        &BUILTINS
    }

    /// Registers `name`, replacing any earlier entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidName` if `name` could not be written as a
    /// single identifier in a formula (empty, starts with a digit or `.`, or
    /// contains operator, comma, parenthesis or whitespace characters).
    pub fn register(
        &mut self,
        name: &str,
        arity: usize,
        build: NodeBuilder,
    ) -> Result<(), RegistryError> {
        if !FUNCTION_NAME.is_match(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }
        self.insert(name, arity, build);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: &str, arity: usize, build: NodeBuilder) -> Result<Self, RegistryError> {
        self.register(name, arity, build)?;
        Ok(self)
    }

    fn insert(&mut self, name: &str, arity: usize, build: NodeBuilder) {
        if self
            .functions
            .insert(name.to_string(), FunctionSpec { arity, build })
            .is_some()
        {
            log::warn!("function '{}' was already registered; replacing it", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.get(name).map(|spec| spec.arity)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Two-sided clamp that tolerates `min > max` and NaN bounds instead of panicking.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

fn build_max(args: Vec<Expr>) -> Expr {
    Expr::call("Max", |a| a[0].max(a[1]), args)
}

fn build_min(args: Vec<Expr>) -> Expr {
    Expr::call("Min", |a| a[0].min(a[1]), args)
}

fn build_clamp(args: Vec<Expr>) -> Expr {
    Expr::call("Clamp", |a| clamp(a[0], a[1], a[2]), args)
}

fn build_limit(args: Vec<Expr>) -> Expr {
    Expr::call("Limit", |a| clamp(a[0], 0.0, a[1]), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero(_args: Vec<Expr>) -> Expr {
        Expr::constant(0.0)
    }

    #[test]
    fn test_builtin_arities() {
        let registry = FunctionRegistry::builtin();
        assert_eq!(registry.arity("Max"), Some(2));
        assert_eq!(registry.arity("Min"), Some(2));
        assert_eq!(registry.arity("Clamp"), Some(3));
        assert_eq!(registry.arity("Limit"), Some(2));
        assert_eq!(registry.arity("max"), None);
        assert_eq!(registry.names(), vec!["Clamp", "Limit", "Max", "Min"]);
    }

    #[test]
    fn test_register_rejects_untokenizable_names() {
        let mut registry = FunctionRegistry::new();
        for name in ["", "1st", "a b", "a+b", "f(x)", ".x", "a,b"] {
            assert!(registry.register(name, 1, zero).is_err(), "accepted {:?}", name);
        }
        assert!(registry.register("Zero_2", 0, zero).is_ok());
        assert!(registry.contains("Zero_2"));
    }

    #[test]
    fn test_clamp_handles_inverted_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }
}
