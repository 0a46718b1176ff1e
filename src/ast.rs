//! Constraint AST.
//!
//! A [`Constraint`] is the already-parsed form of a sequencing constraint:
//!
//! ```text
//! expr       := orExpr
//! orExpr     := andExpr ("||" andExpr)*
//! andExpr    := concatExpr ("&&" concatExpr)*
//! concatExpr := unary ("." unary)*
//! unary      := "!" unary | "_" unary | primary
//! primary    := EVENT | "{" EVENT ("," EVENT)* "}" | "(" expr ")" | primary seqOp primary
//! seqOp      := "+-" | "-+" | "~" | "+..." | "...+" | ".~."
//! ```
//!
//! The [`Display`][std::fmt::Display] impl renders this syntax back, fully
//! parenthesised, so every rendered constraint reads unambiguously.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Unary operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    /// `!B`: complement.
    Not,
    /// `_B`: B occurs somewhere as a contiguous block.
    Always,
}

/// Binary operators: the three common ones and the six binary sequencing ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    /// `B && C`
    And,
    /// `B || C`
    Or,
    /// `B . C`
    Concat,
    /// `B +- C`: every B is immediately followed by C.
    ImmediateLeft,
    /// `B -+ C`: every C is immediately preceded by B.
    ImmediateRight,
    /// `B ~ C`: C never immediately follows B.
    ImmediateNever,
    /// `B +... C`: every B is eventually followed by C.
    GeneralLeft,
    /// `B ...+ C`: every C is preceded by B somewhere before it.
    GeneralRight,
    /// `B .~. C`: C never occurs after B.
    GeneralNever,
}

impl BinaryOp {
    /// Surface syntax of the operator.
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Concat => ".",
            BinaryOp::ImmediateLeft => "+-",
            BinaryOp::ImmediateRight => "-+",
            BinaryOp::ImmediateNever => "~",
            BinaryOp::GeneralLeft => "+...",
            BinaryOp::GeneralRight => "...+",
            BinaryOp::GeneralNever => ".~.",
        }
    }

    /// Is this one of the sequencing operators (as opposed to `&&`, `||`, `.`)?
    pub fn is_sequencing(self) -> bool {
        !matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Concat)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Always => write!(f, "_"),
        }
    }
}

/// Sequencing constraint AST node.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Constraint {
    Event(String),
    /// Union of single events, `{e1, e2, ...}`.
    EventSet(Vec<String>),
    Unary(UnaryOp, Box<Constraint>),
    Binary(BinaryOp, Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    pub fn event(name: impl Into<String>) -> Self {
        Constraint::Event(name.into())
    }

    pub fn set<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::EventSet(names.into_iter().map(Into::into).collect())
    }

    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Constraint::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Constraint::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn negate(operand: Self) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn always(operand: Self) -> Self {
        Self::unary(UnaryOp::Always, operand)
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn concat(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Concat, lhs, rhs)
    }

    /// `lhs +- rhs`
    pub fn immediate_left(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::ImmediateLeft, lhs, rhs)
    }

    /// `lhs -+ rhs`
    pub fn immediate_right(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::ImmediateRight, lhs, rhs)
    }

    /// `lhs ~ rhs`
    pub fn immediate_never(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::ImmediateNever, lhs, rhs)
    }

    /// `lhs +... rhs`
    pub fn general_left(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::GeneralLeft, lhs, rhs)
    }

    /// `lhs ...+ rhs`
    pub fn general_right(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::GeneralRight, lhs, rhs)
    }

    /// `lhs .~. rhs`
    pub fn general_never(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinaryOp::GeneralNever, lhs, rhs)
    }

    /// Conjunction of several constraints, left to right.
    /// Returns `None` for an empty iterator.
    pub fn all(constraints: impl IntoIterator<Item = Constraint>) -> Option<Self> {
        constraints.into_iter().reduce(Self::and)
    }

    /// Is this node a single event or an event set?
    pub fn is_leaf(&self) -> bool {
        matches!(self, Constraint::Event(_) | Constraint::EventSet(_))
    }

    /// Does the tree contain a sequencing operator whose left operand is not a leaf?
    pub fn is_nested(&self) -> bool {
        match self {
            Constraint::Event(_) | Constraint::EventSet(_) => false,
            Constraint::Unary(_, a) => a.is_nested(),
            Constraint::Binary(op, a, b) => (op.is_sequencing() && !a.is_leaf()) || a.is_nested() || b.is_nested(),
        }
    }

    /// Events referenced by the constraint, in order of first appearance.
    pub fn events(&self) -> Vec<&str> {
        fn walk<'a>(c: &'a Constraint, out: &mut Vec<&'a str>) {
            match c {
                Constraint::Event(e) => {
                    if !out.contains(&e.as_str()) {
                        out.push(e);
                    }
                }
                Constraint::EventSet(es) => {
                    for e in es {
                        if !out.contains(&e.as_str()) {
                            out.push(e);
                        }
                    }
                }
                Constraint::Unary(_, a) => walk(a, out),
                Constraint::Binary(_, a, b) => {
                    walk(a, out);
                    walk(b, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Constraint::Event(_) | Constraint::EventSet(_) => 1,
            Constraint::Unary(_, a) => 1 + a.size(),
            Constraint::Binary(_, a, b) => 1 + a.size() + b.size(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Event(e) => write!(f, "{}", e),
            Constraint::EventSet(es) => write!(f, "{{{}}}", es.join(",")),
            Constraint::Unary(op, a) => write!(f, "{}{}", op, a),
            Constraint::Binary(op, a, b) => write!(f, "({} {} {})", a, op, b),
        }
    }
}

impl BitAnd for Constraint {
    type Output = Constraint;

    fn bitand(self, rhs: Self) -> Self::Output {
        Constraint::and(self, rhs)
    }
}

impl BitOr for Constraint {
    type Output = Constraint;

    fn bitor(self, rhs: Self) -> Self::Output {
        Constraint::or(self, rhs)
    }
}

impl Not for Constraint {
    type Output = Constraint;

    fn not(self) -> Self::Output {
        Constraint::negate(self)
    }
}
