use std::fmt;

use crate::ast::LogicalOp;

/// Structural filter tree produced by the boolean profile.
///
/// `L` is whatever the caller's leaf map resolves a name to. The tree is not
/// evaluated here; a query builder downstream serializes it into its own
/// format.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<L> {
    /// A resolved leaf predicate.
    Leaf(L),

    /// Logical NOT of a filter.
    Not(Box<Filter<L>>),

    /// All children must match. Never directly contains another `And`
    /// at the point where the builder created it.
    And(Vec<Filter<L>>),

    /// Any child must match. Never directly contains another `Or` at the
    /// point where the builder created it.
    Or(Vec<Filter<L>>),
}

impl<L> Filter<L> {
    pub fn negate(inner: Filter<L>) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Combines two operands with `op`, merging into an existing node of the
    /// same kind instead of nesting a new one.
    ///
    /// If `right` already is an `op` node, `left` goes to the front of its
    /// children. Otherwise, if `left` is one, `right` goes to the front of
    /// its children. Two same-kind nodes are spliced left-first. Anything else
    /// becomes a new node holding `[left, right]`.
    pub fn combine(op: LogicalOp, left: Filter<L>, right: Filter<L>) -> Self {
        let left_matches = left.is_combinator(op);
        let right_matches = right.is_combinator(op);

        match (left_matches, right_matches) {
            (true, true) => {
                let mut children = left.into_children();
                children.extend(right.into_children());
                Self::from_children(op, children)
            }
            (_, true) => {
                let mut children = right.into_children();
                children.insert(0, left);
                Self::from_children(op, children)
            }
            (true, false) => {
                let mut children = left.into_children();
                children.insert(0, right);
                Self::from_children(op, children)
            }
            (false, false) => Self::from_children(op, vec![left, right]),
        }
    }

    fn is_combinator(&self, op: LogicalOp) -> bool {
        matches!(
            (self, op),
            (Filter::And(_), LogicalOp::And) | (Filter::Or(_), LogicalOp::Or)
        )
    }

    fn into_children(self) -> Vec<Filter<L>> {
        match self {
            Filter::And(children) | Filter::Or(children) => children,
            other => vec![other],
        }
    }

    fn from_children(op: LogicalOp, children: Vec<Filter<L>>) -> Self {
        match op {
            LogicalOp::And => Filter::And(children),
            LogicalOp::Or => Filter::Or(children),
        }
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Filter::Leaf(leaf) => out.push(leaf),
            Filter::Not(inner) => inner.collect_leaves(out),
            Filter::And(children) | Filter::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Rebuilds the tree with every leaf converted by `f`, keeping its shape.
    pub fn map_leaves<M, F>(self, f: &mut F) -> Filter<M>
    where
        F: FnMut(L) -> M,
    {
        match self {
            Filter::Leaf(leaf) => Filter::Leaf(f(leaf)),
            Filter::Not(inner) => Filter::Not(Box::new(inner.map_leaves(f))),
            Filter::And(children) => {
                Filter::And(children.into_iter().map(|c| c.map_leaves(f)).collect())
            }
            Filter::Or(children) => {
                Filter::Or(children.into_iter().map(|c| c.map_leaves(f)).collect())
            }
        }
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            Filter::Leaf(_) => 1,
            Filter::Not(inner) => 1 + inner.node_count(),
            Filter::And(children) | Filter::Or(children) => {
                1 + children.iter().map(Filter::node_count).sum::<usize>()
            }
        }
    }
}

impl<L: fmt::Display> fmt::Display for Filter<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Leaf(leaf) => write!(f, "{}", leaf),
            Filter::Not(inner) => match inner.as_ref() {
                Filter::Leaf(_) => write!(f, "not {}", inner),
                _ => write!(f, "not ({})", inner),
            },
            Filter::And(children) => write_children(f, children, LogicalOp::And),
            Filter::Or(children) => write_children(f, children, LogicalOp::Or),
        }
    }
}

fn write_children<L: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    children: &[Filter<L>],
    op: LogicalOp,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op.keyword())?;
        }
        match child {
            Filter::Leaf(_) => write!(f, "{}", child)?,
            _ => write!(f, "({})", child)?,
        }
    }
    Ok(())
}
