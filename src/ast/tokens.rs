use std::fmt;

use crate::ast::{ArithOp, LogicalOp};

/// A lexical token tagged with the character offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character (not byte) offset of the token's first character.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Token { kind, position }
    }

    /// True for `(`.
    pub fn is_open(&self) -> bool {
        matches!(self.kind, TokenKind::Grouping { open: true })
    }

    /// True for prefix operators (`not`, unary `-`).
    pub fn is_unary(&self) -> bool {
        matches!(self.kind, TokenKind::Not | TokenKind::Negate)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Operands
    /// Numeric literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.5
    /// .25
    /// ```
    Number(f64),

    /// Bare word: a variable, a leaf name or a function name
    ///
    /// # Examples
    /// ```text
    /// Views
    /// Max
    /// is_open
    /// ```
    Identifier(String),

    // Arithmetic
    /// `+`, `-`, `*` or `/`
    Operator(ArithOp),

    /// Prefix minus.
    ///
    /// The lexer always emits `Operator(Minus)`; the converter rewrites a minus
    /// in prefix position into this token.
    Negate,

    /// Function-argument comma
    Separator,

    // Boolean
    /// The `not` keyword
    Not,

    /// The `and` / `or` keywords
    Logical(LogicalOp),

    // Shared
    /// `(` when `open`, `)` otherwise
    Grouping { open: bool },
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Operator(op) => write!(f, "{}", op.symbol()),
            TokenKind::Negate => write!(f, "neg"),
            TokenKind::Separator => write!(f, ","),
            TokenKind::Not => write!(f, "not"),
            TokenKind::Logical(op) => write!(f, "{}", op.keyword()),
            TokenKind::Grouping { open: true } => write!(f, "("),
            TokenKind::Grouping { open: false } => write!(f, ")"),
        }
    }
}

/// Renders a token list space-separated, e.g. an RPN stream as `1 2 3 * +`.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.kind.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
