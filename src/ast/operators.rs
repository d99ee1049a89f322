/// Arithmetic binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`), also the prefix minus before reclassification
    Minus,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl ArithOp {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(ArithOp::Plus),
            '-' => Some(ArithOp::Minus),
            '*' => Some(ArithOp::Mul),
            '/' => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ArithOp::Plus => '+',
            ArithOp::Minus => '-',
            ArithOp::Mul => '*',
            ArithOp::Div => '/',
        }
    }

    /// Plain IEEE-754 arithmetic; `x / 0.0` is infinity or NaN, never an error.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            ArithOp::Plus => left + right,
            ArithOp::Minus => left - right,
            ArithOp::Mul => left * right,
            ArithOp::Div => left / right,
        }
    }
}

/// Boolean combinators that take two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}
