//! Dice expressions: `[count]d<sides>[(+|-)modifier][ op threshold]`.
//!
//! The only way to obtain a [`RollSpec`] is through [`parse_expression`] or
//! [`parse_repeatable`], so every spec in circulation is within the rules it
//! was parsed against.

pub mod lexer;
mod parser;

pub use parser::{parse_expression, parse_repeatable};

use std::fmt;

use serde::Serialize;

use crate::dice::Dice;
use crate::roll::{RollResult, evaluate};

/// Comparison operator of an optional `op threshold` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl CompareOp {
    /// Apply the operator as `lhs <op> rhs`.
    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
            Self::Le => lhs <= rhs,
            Self::Lt => lhs < rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    /// The operator as written in an expression.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ge => ">=",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Lt => "<",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A `total <op> threshold` test attached to a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// The operator.
    pub op: CompareOp,
    /// The right-hand side.
    pub threshold: i64,
}

impl Comparison {
    /// Evaluate the comparison against a roll total.
    pub fn evaluate(&self, total: i64) -> bool {
        self.op.apply(total, self.threshold)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.threshold)
    }
}

/// A validated, bounded description of one dice roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollSpec {
    count: u32,
    sides: u32,
    modifier: i64,
    comparison: Option<Comparison>,
}

impl RollSpec {
    /// Number of dice, at least 1.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Faces per die, at least 2.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier added to the dice sum.
    pub fn modifier(&self) -> i64 {
        self.modifier
    }

    /// Optional comparison clause.
    pub fn comparison(&self) -> Option<Comparison> {
        self.comparison
    }
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "d{}", self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        if let Some(cmp) = self.comparison {
            write!(f, "{cmp}")?;
        }
        Ok(())
    }
}

/// A roll spec together with how many times to roll it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollPlan {
    repeat: u32,
    spec: RollSpec,
}

impl RollPlan {
    /// Number of independent evaluations, at least 1.
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    /// The spec evaluated each time.
    pub fn spec(&self) -> &RollSpec {
        &self.spec
    }

    /// Evaluate the spec `repeat` times with fresh draws for each repetition.
    pub fn roll(&self, dice: &mut Dice) -> Vec<RollResult> {
        (0..self.repeat).map(|_| evaluate(&self.spec, dice)).collect()
    }
}
