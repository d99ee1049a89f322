//! CLI support for shunt
//!
//! Provides programmatic access to the `shunt` commands so hosts can embed
//! the same behavior (and so the commands can be tested without a process).

mod convert;
mod docs;
mod filter;
mod score;

pub use convert::{json_to_context, json_to_leaves, parse_assignment};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use filter::{FilterOptions, FilterOutcome, execute_filter};
pub use score::{ScoreOptions, ScoreOutcome, execute_rpn, execute_score};

use std::io;

use crate::{CompileError, EvalError};

/// Errors from the `shunt` commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Neither variables nor leaves were supplied.
    #[error("No input provided. Use --vars/--var, --leaves/--leaf, or pipe JSON to stdin.")]
    NoInput,

    /// JSON input had the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A `--var` argument that is not `name=number`.
    #[error("Invalid assignment: '{0}' (expected name=number)")]
    InvalidAssignment(String),

    #[error("Unknown category: '{0}'\nRun 'shunt docs' to see available categories.")]
    UnknownCategory(String),
}
