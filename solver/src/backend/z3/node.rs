use derive_more as dm;
use z3::ast::{self, Ast};

use crate::script::Sort;

/* NOTE: Why not using `Dynamic`?
 * The concrete ast types keep the sort of every node visible, so sort
 * mismatches are caught while building instead of inside the solver.
 */
#[derive(Debug, Clone, PartialEq, Eq, dm::Display)]
#[display("{_0}")]
pub enum AstNode<'ctx> {
    Bool(ast::Bool<'ctx>),
    Int(ast::Int<'ctx>),
    Real(ast::Real<'ctx>),
}

impl<'ctx> From<ast::Bool<'ctx>> for AstNode<'ctx> {
    fn from(ast: ast::Bool<'ctx>) -> Self {
        Self::Bool(ast)
    }
}

impl<'ctx> From<ast::Int<'ctx>> for AstNode<'ctx> {
    fn from(ast: ast::Int<'ctx>) -> Self {
        Self::Int(ast)
    }
}

impl<'ctx> From<ast::Real<'ctx>> for AstNode<'ctx> {
    fn from(ast: ast::Real<'ctx>) -> Self {
        Self::Real(ast)
    }
}

impl<'ctx> AstNode<'ctx> {
    pub fn sort(&self) -> Sort {
        match self {
            Self::Bool(_) => Sort::Bool,
            Self::Int(_) => Sort::Int,
            Self::Real(_) => Sort::Real,
        }
    }

    pub fn ast(&self) -> &dyn ast::Ast<'ctx> {
        match self {
            Self::Bool(ast) => ast,
            Self::Int(ast) => ast,
            Self::Real(ast) => ast,
        }
    }

    pub fn dyn_ast(&self) -> ast::Dynamic<'ctx> {
        ast::Dynamic::from_ast(self.ast())
    }

    pub fn simplify(&self) -> Self {
        match self {
            Self::Bool(ast) => Self::Bool(ast.simplify()),
            Self::Int(ast) => Self::Int(ast.simplify()),
            Self::Real(ast) => Self::Real(ast.simplify()),
        }
    }

    pub fn to_smtlib(&self) -> String {
        match self {
            Self::Bool(ast) => ast.to_string(),
            Self::Int(ast) => ast.to_string(),
            Self::Real(ast) => ast.to_string(),
        }
    }
}

/// An assertion together with the variables in scope when it was built,
/// kept around for model extraction.
#[derive(Debug, Clone)]
pub struct AstAndVars<'ctx> {
    pub value: ast::Bool<'ctx>,
    pub variables: Vec<(String, AstNode<'ctx>)>,
}
