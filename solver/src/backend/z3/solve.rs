use std::collections::HashMap;

use tracing::debug;
use z3::{Context, Model as Z3Model, SatResult, ast};

use crate::script::ModelValue;
use crate::solver::{Model, SolveResult};

use super::node::{AstAndVars, AstNode};

/// A solver bound to one context. Checking leaves the underlying solver
/// clean, so one instance can serve several independent checks.
pub struct WrappedSolver<'ctx> {
    context: &'ctx Context,
    solver: z3::Solver<'ctx>,
}

impl<'ctx> WrappedSolver<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            solver: z3::Solver::new(context),
        }
    }

    pub fn context(&self) -> &'ctx Context {
        self.context
    }

    /// Checks the conjunction of the given assertions. On a satisfiable
    /// outcome the model binds every variable carried by the assertions.
    pub fn check(
        &self,
        assertions: impl Iterator<Item = AstAndVars<'ctx>>,
    ) -> SolveResult<Model<String, ModelValue>> {
        let mut all_vars = HashMap::<String, AstNode<'ctx>>::new();
        let asts = assertions
            .map(|assertion| {
                let AstAndVars { value, variables } = assertion;
                all_vars.extend(variables);
                value
            })
            .collect::<Vec<_>>();
        self.check_using(&asts, all_vars)
    }

    fn check_using(
        &self,
        constraints: &[ast::Bool<'ctx>],
        vars: HashMap<String, AstNode<'ctx>>,
    ) -> SolveResult<Model<String, ModelValue>> {
        debug!("sending constraints to z3: {:#?}", constraints);

        self.solver.push();

        for constraint in constraints {
            self.solver.assert(constraint);
        }

        let result = match self.solver.check() {
            SatResult::Sat => {
                let model = self.solver.get_model().unwrap();
                let values = vars
                    .into_iter()
                    .map(|(name, node)| {
                        let value = eval_node(&model, &node);
                        (name, value)
                    })
                    .collect();
                SolveResult::Sat(values)
            }
            SatResult::Unsat => SolveResult::Unsat,
            SatResult::Unknown => SolveResult::Unknown,
        };

        self.solver.pop(1);
        result
    }
}

fn eval_node<'ctx>(model: &Z3Model<'ctx>, node: &AstNode<'ctx>) -> ModelValue {
    let value = match node {
        AstNode::Bool(ast) => model
            .eval(ast, true)
            .and_then(|v| v.as_bool())
            .map(ModelValue::Bool),
        AstNode::Int(ast) => model
            .eval(ast, true)
            .and_then(|v| v.as_i64())
            .map(ModelValue::Int),
        AstNode::Real(ast) => model
            .eval(ast, true)
            .and_then(|v| v.as_real())
            .map(|(num, den)| ModelValue::Real { num, den }),
    };
    value.unwrap_or_else(|| ModelValue::Opaque(node.to_smtlib()))
}
