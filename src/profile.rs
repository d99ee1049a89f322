//! Lexical and precedence tables for the two expression languages.

use crate::ast::{ArithOp, LogicalOp, Token, TokenKind};
use crate::error::{CompileError, CompileResult};

/// Which language a piece of text is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Scoring formulas: `+ - * /`, commas, function calls.
    #[default]
    Arithmetic,
    /// Filter expressions: `not`, `and`, `or`.
    Boolean,
}

/// Priority of an open grouping on the operator stack. Nothing pops it.
pub const GROUPING_PRIORITY: i8 = 0;
/// Priority of operands and pending function names.
pub const OPERAND_PRIORITY: i8 = 6;

impl Profile {
    /// Characters that end the current word and are then classified on their own.
    pub fn is_split_char(self, ch: char) -> bool {
        if ch.is_whitespace() || ch == '(' || ch == ')' {
            return true;
        }
        match self {
            Profile::Arithmetic => ArithOp::from_char(ch).is_some() || ch == ',',
            Profile::Boolean => false,
        }
    }

    /// Reserved words of this profile. Case-sensitive.
    pub fn keyword(self, word: &str) -> Option<TokenKind> {
        match (self, word) {
            (Profile::Boolean, "not") => Some(TokenKind::Not),
            (Profile::Boolean, "and") => Some(TokenKind::Logical(LogicalOp::And)),
            (Profile::Boolean, "or") => Some(TokenKind::Logical(LogicalOp::Or)),
            _ => None,
        }
    }

    /// Binding strength of a token on the operator stack; higher binds tighter.
    ///
    /// | entry              | arithmetic | boolean |
    /// |--------------------|-----------:|--------:|
    /// | `(`                |          0 |       0 |
    /// | `not`              |          - |      -1 |
    /// | `+` `-`            |          3 |       - |
    /// | `*`                |          4 |       - |
    /// | `/`                |          5 |       - |
    /// | `or`               |          - |       3 |
    /// | `and`              |          - |       4 |
    /// | unary `-`          |          6 |       - |
    /// | operand / function |          6 |       6 |
    pub fn priority(self, token: &Token) -> CompileResult<i8> {
        let priority = match (self, &token.kind) {
            (_, TokenKind::Grouping { open: true }) => GROUPING_PRIORITY,
            (_, TokenKind::Number(_) | TokenKind::Identifier(_)) => OPERAND_PRIORITY,
            (Profile::Arithmetic, TokenKind::Operator(op)) => match op {
                ArithOp::Plus | ArithOp::Minus => 3,
                ArithOp::Mul => 4,
                ArithOp::Div => 5,
            },
            (Profile::Arithmetic, TokenKind::Negate) => OPERAND_PRIORITY,
            (Profile::Boolean, TokenKind::Not) => -1,
            (Profile::Boolean, TokenKind::Logical(LogicalOp::Or)) => 3,
            (Profile::Boolean, TokenKind::Logical(LogicalOp::And)) => 4,
            (_, kind) => return Err(CompileError::unsupported(kind, token.position)),
        };
        Ok(priority)
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arithmetic" | "score" | "scoring" => Ok(Profile::Arithmetic),
            "boolean" | "filter" => Ok(Profile::Boolean),
            other => Err(format!("unknown profile '{}'", other)),
        }
    }
}
