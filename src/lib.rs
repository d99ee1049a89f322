pub mod ast;
pub mod builder;
pub mod compile;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod profile;
pub mod registry;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{ArithOp, Expr, Filter, LogicalOp, Token, TokenKind};
pub use compile::{ScoreCompiler, check_syntax, compile_filter, compile_score};
pub use error::{CompileError, CompileResult, ErrorKind, EvalError, RegistryError};
pub use evaluator::{EvalContext, evaluate};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, to_rpn};
pub use profile::Profile;
pub use registry::FunctionRegistry;
