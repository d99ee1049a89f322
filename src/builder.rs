//! Stack machine that turns an RPN token stream into a single tree.
//!
//! The machine itself only manages the operand stack and its counts. What a
//! number, a name or an operator becomes is decided by an [`Assemble`]
//! implementation: [`ScoreAssembler`] builds [`Expr`] trees and
//! [`FilterAssembler`] builds [`Filter`] trees. [`ShapeAssembler`] builds
//! nothing and only validates the shape.

use std::collections::HashMap;

use crate::ast::{Expr, Filter, Token, TokenKind};
use crate::error::{CompileError, CompileResult};
use crate::profile::Profile;
use crate::registry::FunctionRegistry;

/// Node construction for one profile.
pub trait Assemble {
    type Node;

    /// A numeric literal.
    fn constant(&self, value: f64, token: &Token) -> CompileResult<Self::Node>;

    /// Number of operands `name` consumes if it is a function, `None` otherwise.
    fn arity(&self, _name: &str) -> Option<usize> {
        None
    }

    /// A function call; `args` are in source order.
    fn call(&self, name: &str, args: Vec<Self::Node>, token: &Token) -> CompileResult<Self::Node> {
        let _ = (name, args);
        Err(CompileError::unsupported(token, token.position))
    }

    /// A name that is not a function.
    fn reference(&self, name: &str, token: &Token) -> CompileResult<Self::Node>;

    /// A prefix operator applied to `child`.
    fn unary(&self, token: &Token, child: Self::Node) -> CompileResult<Self::Node>;

    /// A binary operator; `left` was pushed before `right`.
    fn binary(&self, token: &Token, left: Self::Node, right: Self::Node) -> CompileResult<Self::Node>;
}

/// Runs the RPN stream through `assembler`.
///
/// # Errors
///
/// Returns `InvalidNodeCount` when an operator or function finds too few
/// operands, or when anything other than exactly one node is left at the end.
/// Assembler errors (unknown leaves, wrong-profile tokens) pass through.
pub fn build_tree<A: Assemble>(rpn: &[Token], assembler: &A) -> CompileResult<A::Node> {
    let mut stack: Vec<A::Node> = Vec::new();

    for token in rpn {
        let node = match &token.kind {
            TokenKind::Number(value) => assembler.constant(*value, token)?,

            TokenKind::Identifier(name) => match assembler.arity(name) {
                Some(arity) => {
                    if stack.len() < arity {
                        return Err(CompileError::node_count(
                            format!(
                                "'{}' takes {} arguments but only {} are available",
                                name,
                                arity,
                                stack.len()
                            ),
                            Some(token.position),
                        ));
                    }
                    // Popping one by one would reverse them; split_off keeps source order.
                    let args = stack.split_off(stack.len() - arity);
                    assembler.call(name, args, token)?
                }
                None => assembler.reference(name, token)?,
            },

            TokenKind::Operator(_) | TokenKind::Logical(_) => {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(CompileError::node_count(
                        format!("'{}' needs two operands", token),
                        Some(token.position),
                    ));
                };
                assembler.binary(token, left, right)?
            }

            TokenKind::Not | TokenKind::Negate => {
                let Some(child) = stack.pop() else {
                    return Err(CompileError::node_count(
                        format!("'{}' needs an operand", token),
                        Some(token.position),
                    ));
                };
                assembler.unary(token, child)?
            }

            TokenKind::Separator | TokenKind::Grouping { .. } => {
                return Err(CompileError::unsupported(token, token.position));
            }
        };
        log::trace!("tree: {} (stack depth {})", token, stack.len() + 1);
        stack.push(node);
    }

    let remaining = stack.len();
    match stack.pop() {
        Some(root) if remaining == 1 => Ok(root),
        None => Err(CompileError::node_count("empty expression", None)),
        Some(_) => Err(CompileError::node_count(
            format!("expected one root but found {}", remaining),
            None,
        )),
    }
}

/// Builds scoring-formula trees.
///
/// Names that are not registered functions become variables; they are only
/// resolved when the tree is evaluated.
pub struct ScoreAssembler<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> ScoreAssembler<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        ScoreAssembler { functions }
    }
}

impl Assemble for ScoreAssembler<'_> {
    type Node = Expr;

    fn constant(&self, value: f64, _token: &Token) -> CompileResult<Expr> {
        Ok(Expr::constant(value))
    }

    fn arity(&self, name: &str) -> Option<usize> {
        self.functions.arity(name)
    }

    fn call(&self, name: &str, args: Vec<Expr>, token: &Token) -> CompileResult<Expr> {
        let spec = self.functions.get(name).ok_or_else(|| CompileError::UnknownFunction {
            name: name.to_string(),
            position: token.position,
        })?;
        Ok((spec.build)(args))
    }

    fn reference(&self, name: &str, _token: &Token) -> CompileResult<Expr> {
        Ok(Expr::variable(name))
    }

    fn unary(&self, token: &Token, child: Expr) -> CompileResult<Expr> {
        match token.kind {
            TokenKind::Negate => Ok(Expr::negate(child)),
            _ => Err(CompileError::unsupported(token, token.position)),
        }
    }

    fn binary(&self, token: &Token, left: Expr, right: Expr) -> CompileResult<Expr> {
        match token.kind {
            TokenKind::Operator(op) => Ok(Expr::binary(op, left, right)),
            _ => Err(CompileError::unsupported(token, token.position)),
        }
    }
}

/// Builds filter trees, resolving every name against the caller's leaf map.
pub struct FilterAssembler<'a, L> {
    leaves: &'a HashMap<String, L>,
}

impl<'a, L> FilterAssembler<'a, L> {
    pub fn new(leaves: &'a HashMap<String, L>) -> Self {
        FilterAssembler { leaves }
    }
}

impl<L: Clone> Assemble for FilterAssembler<'_, L> {
    type Node = Filter<L>;

    fn constant(&self, _value: f64, token: &Token) -> CompileResult<Filter<L>> {
        Err(CompileError::unsupported(token, token.position))
    }

    fn reference(&self, name: &str, token: &Token) -> CompileResult<Filter<L>> {
        self.leaves
            .get(name)
            .cloned()
            .map(Filter::Leaf)
            .ok_or_else(|| CompileError::UnknownLeaf {
                name: name.to_string(),
                position: token.position,
            })
    }

    fn unary(&self, token: &Token, child: Filter<L>) -> CompileResult<Filter<L>> {
        match token.kind {
            TokenKind::Not => Ok(Filter::negate(child)),
            _ => Err(CompileError::unsupported(token, token.position)),
        }
    }

    fn binary(&self, token: &Token, left: Filter<L>, right: Filter<L>) -> CompileResult<Filter<L>> {
        match token.kind {
            TokenKind::Logical(op) => Ok(Filter::combine(op, left, right)),
            _ => Err(CompileError::unsupported(token, token.position)),
        }
    }
}

/// Checks structure only: operand counts and arities, without resolving names.
pub struct ShapeAssembler<'a> {
    profile: Profile,
    functions: Option<&'a FunctionRegistry>,
}

impl<'a> ShapeAssembler<'a> {
    pub fn new(profile: Profile, functions: Option<&'a FunctionRegistry>) -> Self {
        ShapeAssembler { profile, functions }
    }
}

impl Assemble for ShapeAssembler<'_> {
    type Node = ();

    fn constant(&self, _value: f64, token: &Token) -> CompileResult<()> {
        match self.profile {
            Profile::Arithmetic => Ok(()),
            Profile::Boolean => Err(CompileError::unsupported(token, token.position)),
        }
    }

    fn arity(&self, name: &str) -> Option<usize> {
        self.functions.and_then(|f| f.arity(name))
    }

    fn call(&self, _name: &str, _args: Vec<()>, _token: &Token) -> CompileResult<()> {
        Ok(())
    }

    fn reference(&self, _name: &str, _token: &Token) -> CompileResult<()> {
        Ok(())
    }

    fn unary(&self, token: &Token, _child: ()) -> CompileResult<()> {
        self.profile.priority(token).map(|_| ())
    }

    fn binary(&self, token: &Token, _left: (), _right: ()) -> CompileResult<()> {
        self.profile.priority(token).map(|_| ())
    }
}
