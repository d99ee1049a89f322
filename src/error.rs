//! Error types for compiling and evaluating expressions.

use thiserror::Error;

/// A specialized Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while turning text into a tree.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    /// A character that no token can start with or continue.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character offset in the input.
        position: usize,
    },

    /// A token reached a stage that cannot classify or prioritize it.
    #[error("unsupported token '{token}' at position {position}")]
    UnsupportedToken {
        /// Rendered token text.
        token: String,
        /// Character offset in the input.
        position: usize,
    },

    /// Wrong operand or argument count, unbalanced grouping, or more than one root.
    #[error("invalid node count: {reason}")]
    InvalidNodeCount {
        /// What was malformed.
        reason: String,
        /// Offset of the token that exposed the problem, when there is one.
        position: Option<usize>,
    },

    /// A filter leaf name missing from the supplied leaf map.
    #[error("unknown leaf '{name}' at position {position}")]
    UnknownLeaf {
        /// The unresolved name.
        name: String,
        /// Character offset in the input.
        position: usize,
    },

    /// A name used in call position that is not a registered function.
    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction {
        /// The unresolved function name.
        name: String,
        /// Character offset in the input.
        position: usize,
    },
}

/// Payload-free discriminant of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    UnsupportedToken,
    InvalidNodeCount,
    UnknownLeaf,
    UnknownFunction,
}

impl CompileError {
    /// Creates an invalid node count error.
    pub fn node_count(reason: impl Into<String>, position: Option<usize>) -> Self {
        CompileError::InvalidNodeCount {
            reason: reason.into(),
            position,
        }
    }

    /// Creates an unsupported token error.
    pub fn unsupported(token: impl ToString, position: usize) -> Self {
        CompileError::UnsupportedToken {
            token: token.to_string(),
            position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            CompileError::UnsupportedToken { .. } => ErrorKind::UnsupportedToken,
            CompileError::InvalidNodeCount { .. } => ErrorKind::InvalidNodeCount,
            CompileError::UnknownLeaf { .. } => ErrorKind::UnknownLeaf,
            CompileError::UnknownFunction { .. } => ErrorKind::UnknownFunction,
        }
    }

    /// Source offset to show the user, if the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            CompileError::InvalidCharacter { position, .. }
            | CompileError::UnsupportedToken { position, .. }
            | CompileError::UnknownLeaf { position, .. }
            | CompileError::UnknownFunction { position, .. } => Some(*position),
            CompileError::InvalidNodeCount { position, .. } => *position,
        }
    }
}

/// Errors that can occur while evaluating a scoring formula.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The formula reads a variable the context does not define.
    #[error("unknown variable '{name}'")]
    UnknownVariable {
        /// The missing variable.
        name: String,
    },
}

/// Errors raised when registering a function.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The lexer could never produce this name as a single identifier.
    #[error("invalid function name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}
