//! Building script expressions into Z3 ast nodes.

use std::collections::HashMap;

use z3::Context;
use z3::ast::{self, Ast};

use crate::bridge::ExecError;
use crate::script::{Decl, Expr, Sort};

use super::node::{AstAndVars, AstNode};

/// Builds [`Expr`] trees against a declaration scope.
///
/// Quantifier-bound variables shadow top-level declarations for the extent
/// of the quantifier body.
pub struct Translator<'ctx> {
    context: &'ctx Context,
    scope: HashMap<String, AstNode<'ctx>>,
}

impl<'ctx> Translator<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            scope: HashMap::new(),
        }
    }

    /// Declares a top-level variable.
    pub fn declare(&mut self, decl: &Decl) -> Result<(), ExecError> {
        if self.scope.contains_key(&decl.name) {
            return Err(ExecError::Redeclared(decl.name.clone()));
        }
        self.scope
            .insert(decl.name.clone(), fresh_const(self.context, decl));
        Ok(())
    }

    /// Builds a boolean assertion, pairing it with the variables currently
    /// in scope for later model extraction.
    pub fn assertion(&self, expr: &Expr) -> Result<AstAndVars<'ctx>, ExecError> {
        let value = self.build_bool(expr, &mut Vec::new())?;
        let variables = self
            .scope
            .iter()
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect();
        Ok(AstAndVars { value, variables })
    }

    fn build_bool(
        &self,
        expr: &Expr,
        bound: &mut Vec<(String, AstNode<'ctx>)>,
    ) -> Result<ast::Bool<'ctx>, ExecError> {
        match self.build(expr, bound)? {
            AstNode::Bool(ast) => Ok(ast),
            node => Err(ExecError::SortMismatch {
                expected: Sort::Bool,
                found: node.sort(),
            }),
        }
    }

    fn build(
        &self,
        expr: &Expr,
        bound: &mut Vec<(String, AstNode<'ctx>)>,
    ) -> Result<AstNode<'ctx>, ExecError> {
        let ctx = self.context;
        let node = match expr {
            Expr::Bool(value) => ast::Bool::from_bool(ctx, *value).into(),
            Expr::Int(value) => ast::Int::from_i64(ctx, *value).into(),
            Expr::Real { num, den } => ast::Real::from_real(ctx, *num, *den).into(),
            Expr::Var(name) => self.lookup(name, bound)?,

            Expr::Not(inner) => self.build_bool(inner, bound)?.not().into(),
            Expr::And(operands) => self.connective(operands, bound, "and", ast::Bool::and)?,
            Expr::Or(operands) => self.connective(operands, bound, "or", ast::Bool::or)?,
            Expr::Implies(lhs, rhs) => {
                let lhs = self.build_bool(lhs, bound)?;
                let rhs = self.build_bool(rhs, bound)?;
                lhs.implies(&rhs).into()
            }

            Expr::Eq(lhs, rhs) => self.equality(lhs, rhs, bound)?.into(),
            Expr::Ne(lhs, rhs) => self.equality(lhs, rhs, bound)?.not().into(),
            Expr::Lt(l, r) => self.comparison(l, r, bound, |a, b| a.lt(b), |a, b| a.lt(b))?,
            Expr::Le(l, r) => self.comparison(l, r, bound, |a, b| a.le(b), |a, b| a.le(b))?,
            Expr::Gt(l, r) => self.comparison(l, r, bound, |a, b| a.gt(b), |a, b| a.gt(b))?,
            Expr::Ge(l, r) => self.comparison(l, r, bound, |a, b| a.ge(b), |a, b| a.ge(b))?,

            Expr::Add(operands) => {
                self.numeric_varop(operands, bound, "add", ast::Int::add, ast::Real::add)?
            }
            Expr::Mul(operands) => {
                self.numeric_varop(operands, bound, "mul", ast::Int::mul, ast::Real::mul)?
            }
            Expr::Sub(lhs, rhs) => match (self.build(lhs, bound)?, self.build(rhs, bound)?) {
                (AstNode::Int(l), AstNode::Int(r)) => ast::Int::sub(ctx, &[&l, &r]).into(),
                (AstNode::Real(l), AstNode::Real(r)) => ast::Real::sub(ctx, &[&l, &r]).into(),
                (AstNode::Bool(_), _) | (_, AstNode::Bool(_)) => {
                    return Err(ExecError::NotNumeric(Sort::Bool));
                }
                (l, r) => {
                    return Err(ExecError::SortMismatch {
                        expected: l.sort(),
                        found: r.sort(),
                    });
                }
            },
            Expr::Neg(inner) => match self.build(inner, bound)? {
                AstNode::Int(ast) => ast.unary_minus().into(),
                AstNode::Real(ast) => ast.unary_minus().into(),
                AstNode::Bool(_) => return Err(ExecError::NotNumeric(Sort::Bool)),
            },

            Expr::Exists { bound: decls, body } => self.quantifier(decls, body, bound, false)?,
            Expr::Forall { bound: decls, body } => self.quantifier(decls, body, bound, true)?,
        };
        Ok(node)
    }

    fn lookup(
        &self,
        name: &str,
        bound: &[(String, AstNode<'ctx>)],
    ) -> Result<AstNode<'ctx>, ExecError> {
        bound
            .iter()
            .rev()
            .find(|(bound_name, _)| bound_name == name)
            .map(|(_, node)| node.clone())
            .or_else(|| self.scope.get(name).cloned())
            .ok_or_else(|| ExecError::UnknownVariable(name.to_owned()))
    }

    fn connective(
        &self,
        operands: &[Expr],
        bound: &mut Vec<(String, AstNode<'ctx>)>,
        name: &'static str,
        op: fn(&'ctx Context, &[&ast::Bool<'ctx>]) -> ast::Bool<'ctx>,
    ) -> Result<AstNode<'ctx>, ExecError> {
        if operands.is_empty() {
            return Err(ExecError::EmptyOperands(name));
        }
        let built = operands
            .iter()
            .map(|operand| self.build_bool(operand, bound))
            .collect::<Result<Vec<_>, _>>()?;
        let refs = built.iter().collect::<Vec<_>>();
        Ok(op(self.context, &refs).into())
    }

    fn equality(
        &self,
        lhs: &Expr,
        rhs: &Expr,
        bound: &mut Vec<(String, AstNode<'ctx>)>,
    ) -> Result<ast::Bool<'ctx>, ExecError> {
        let lhs = self.build(lhs, bound)?;
        let rhs = self.build(rhs, bound)?;
        if lhs.sort() != rhs.sort() {
            return Err(ExecError::SortMismatch {
                expected: lhs.sort(),
                found: rhs.sort(),
            });
        }
        Ok(lhs.dyn_ast()._eq(&rhs.dyn_ast()))
    }

    fn comparison(
        &self,
        lhs: &Expr,
        rhs: &Expr,
        bound: &mut Vec<(String, AstNode<'ctx>)>,
        int_op: fn(&ast::Int<'ctx>, &ast::Int<'ctx>) -> ast::Bool<'ctx>,
        real_op: fn(&ast::Real<'ctx>, &ast::Real<'ctx>) -> ast::Bool<'ctx>,
    ) -> Result<AstNode<'ctx>, ExecError> {
        match (self.build(lhs, bound)?, self.build(rhs, bound)?) {
            (AstNode::Int(l), AstNode::Int(r)) => Ok(int_op(&l, &r).into()),
            (AstNode::Real(l), AstNode::Real(r)) => Ok(real_op(&l, &r).into()),
            (AstNode::Bool(_), _) | (_, AstNode::Bool(_)) => Err(ExecError::NotNumeric(Sort::Bool)),
            (l, r) => Err(ExecError::SortMismatch {
                expected: l.sort(),
                found: r.sort(),
            }),
        }
    }

    fn numeric_varop(
        &self,
        operands: &[Expr],
        bound: &mut Vec<(String, AstNode<'ctx>)>,
        name: &'static str,
        int_op: fn(&'ctx Context, &[&ast::Int<'ctx>]) -> ast::Int<'ctx>,
        real_op: fn(&'ctx Context, &[&ast::Real<'ctx>]) -> ast::Real<'ctx>,
    ) -> Result<AstNode<'ctx>, ExecError> {
        if operands.is_empty() {
            return Err(ExecError::EmptyOperands(name));
        }
        let built = operands
            .iter()
            .map(|operand| self.build(operand, bound))
            .collect::<Result<Vec<_>, _>>()?;
        match built[0].sort() {
            Sort::Int => {
                let ints = built
                    .iter()
                    .map(|node| match node {
                        AstNode::Int(ast) => Ok(ast),
                        other => Err(ExecError::SortMismatch {
                            expected: Sort::Int,
                            found: other.sort(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(int_op(self.context, &ints).into())
            }
            Sort::Real => {
                let reals = built
                    .iter()
                    .map(|node| match node {
                        AstNode::Real(ast) => Ok(ast),
                        other => Err(ExecError::SortMismatch {
                            expected: Sort::Real,
                            found: other.sort(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(real_op(self.context, &reals).into())
            }
            Sort::Bool => Err(ExecError::NotNumeric(Sort::Bool)),
        }
    }

    fn quantifier(
        &self,
        decls: &[Decl],
        body: &Expr,
        bound: &mut Vec<(String, AstNode<'ctx>)>,
        universal: bool,
    ) -> Result<AstNode<'ctx>, ExecError> {
        let kind = if universal { "forall" } else { "exists" };
        if decls.is_empty() {
            return Err(ExecError::EmptyOperands(kind));
        }

        let depth = bound.len();
        for decl in decls {
            bound.push((decl.name.clone(), fresh_const(self.context, decl)));
        }
        let body = self.build_bool(body, bound);
        let bound_vars = bound
            .drain(depth..)
            .map(|(_, node)| node)
            .collect::<Vec<_>>();
        let body = body?;

        let refs = bound_vars
            .iter()
            .map(|node| node.ast())
            .collect::<Vec<_>>();
        let ast = if universal {
            ast::forall_const(self.context, &refs, &[], &body)
        } else {
            ast::exists_const(self.context, &refs, &[], &body)
        };
        Ok(ast.into())
    }
}

fn fresh_const<'ctx>(context: &'ctx Context, decl: &Decl) -> AstNode<'ctx> {
    match decl.sort {
        Sort::Bool => ast::Bool::new_const(context, decl.name.as_str()).into(),
        Sort::Int => ast::Int::new_const(context, decl.name.as_str()).into(),
        Sort::Real => ast::Real::new_const(context, decl.name.as_str()).into(),
    }
}
