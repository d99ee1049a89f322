//! # Shunt - Tokens and Trees
//!
//! This module defines the data that flows through the compiler: the tokens
//! produced by the lexer and rearranged by the shunting-yard converter, and the
//! two tree shapes the builder produces.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens with their source positions
//! - **[operators]** - Arithmetic and logical operator kinds
//! - **[expressions]** - Arithmetic syntax tree for scoring formulas
//! - **[filter]** - Structural And/Or/Not tree for boolean filters
//!
//! ## The Two Profiles
//!
//! ### Scoring formulas
//!
//! Infix arithmetic over named variables with built-in functions:
//!
//! ```text
//! Limit(Views / 10 + Max(Likes, 5), 100)
//! ```
//!
//! ### Boolean filters
//!
//! Named leaf predicates combined with `not`, `and`, `or`:
//!
//! ```text
//! Open and (Urgent or not Assigned)
//! ```
//!
//! Leaf names are resolved against a map supplied by the caller; the result
//! is a [`Filter`] tree whose same-kind chains are flattened:
//!
//! ```text
//! A and B and C or D   =>   Or[And[A, B, C], D]
//! ```
pub mod expressions;
pub mod filter;
pub mod operators;
pub mod tokens;

pub use expressions::{Apply, Expr};
pub use filter::Filter;
pub use operators::{ArithOp, LogicalOp};
pub use tokens::{Token, TokenKind};
