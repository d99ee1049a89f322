use std::collections::BTreeSet;
use std::fmt;

use crate::ast::ArithOp;

/// Numeric semantics of a function node: receives the evaluated arguments in
/// source order.
pub type Apply = fn(&[f64]) -> f64;

/// Abstract Syntax Tree node of a scoring formula.
///
/// Every node exclusively owns its children.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal number
    ///
    /// # Example
    /// ```text
    /// 40
    /// ```
    Constant(f64),

    /// Named variable, resolved against an `EvalContext` at evaluation time
    ///
    /// # Example
    /// ```text
    /// Views
    /// ```
    Variable(String),

    /// Prefix minus
    ///
    /// # Example
    /// ```text
    /// -Views
    /// ```
    Negate(Box<Expr>),

    /// Binary arithmetic
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Built-in or registered function call
    ///
    /// # Examples
    /// ```text
    /// Max(Views, 10)
    /// Clamp(Score * 2, 0, 100)
    /// ```
    Call {
        name: String,
        apply: Apply,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Constant(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn negate(inner: Expr) -> Self {
        Expr::Negate(Box::new(inner))
    }

    pub fn binary(op: ArithOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, apply: Apply, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            apply,
            args,
        }
    }

    /// Names of every variable the formula reads, sorted and de-duplicated.
    pub fn variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().map(str::to_string).collect()
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Variable(name) => {
                names.insert(name);
            }
            Expr::Negate(inner) => inner.collect_variables(names),
            Expr::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
        }
    }
}

// `apply` is left out: two calls are equal when they have the same name and arguments.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Constant(a), Expr::Constant(b)) => a == b,
            (Expr::Variable(a), Expr::Variable(b)) => a == b,
            (Expr::Negate(a), Expr::Negate(b)) => a == b,
            (
                Expr::Binary { op, left, right },
                Expr::Binary {
                    op: other_op,
                    left: other_left,
                    right: other_right,
                },
            ) => op == other_op && left == other_left && right == other_right,
            (
                Expr::Call { name, args, .. },
                Expr::Call {
                    name: other_name,
                    args: other_args,
                    ..
                },
            ) => name == other_name && args == other_args,
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(n) => write!(f, "{}", n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Negate(inner) => match inner.as_ref() {
                Expr::Binary { .. } => write!(f, "-({})", inner),
                _ => write!(f, "-{}", inner),
            },
            Expr::Binary { op, left, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right)
            }
            Expr::Call { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Binary { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}
