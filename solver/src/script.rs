//! The serializable constraint-construction script.
//!
//! Hosts without a native solving capability encode the constraints they
//! want checked as a JSON instruction sequence: variable declarations,
//! assertions over a typed expression tree, and a `check` step that records
//! the solver's verdict. The script is deserialized here and built against
//! the solving engine programmatically; no caller-supplied code is ever
//! evaluated.

use derive_more as dm;
use serde::{Deserialize, Serialize};

/// Sort of a declared variable or bound quantifier variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, dm::Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("real")]
    Real,
}

/// A variable declaration, either top-level or quantifier-bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    pub sort: Sort,
}

/// A constraint expression.
///
/// Rational literals are exact `num/den` pairs; decimal time bounds such as
/// `0.30259726` are encoded as `30259726/100000000`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Bool(bool),
    Int(i64),
    Real { num: i32, den: i32 },
    Var(String),

    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Implies(Box<Expr>, Box<Expr>),

    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
    Lt(Box<Expr>, Box<Expr>),
    Le(Box<Expr>, Box<Expr>),
    Gt(Box<Expr>, Box<Expr>),
    Ge(Box<Expr>, Box<Expr>),

    Add(Vec<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Vec<Expr>),
    Neg(Box<Expr>),

    Exists { bound: Vec<Decl>, body: Box<Expr> },
    Forall { bound: Vec<Decl>, body: Box<Expr> },
}

/// One step of a solver script.
///
/// `check` records the verdict over everything asserted so far; when a
/// script checks more than once, the last verdict wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    Declare(Decl),
    Assert(Expr),
    Check,
}

pub type Script = Vec<Instruction>;

/// A variable assignment extracted from a satisfiable check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelValue {
    Bool(bool),
    Int(i64),
    Real { num: i64, den: i64 },
    /// Printed form of a value the typed variants cannot represent,
    /// e.g. an integer outside the `i64` range.
    Opaque(String),
}
