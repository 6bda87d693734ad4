mod node;
mod solve;
mod translate;

pub use node::{AstAndVars, AstNode};
pub use solve::WrappedSolver;
pub use translate::Translator;

use crate::script::ModelValue;
use crate::solver::{Model, SolveResult, Solver};

/// Z3-based solver implementation
pub type Z3Solver<'ctx> = WrappedSolver<'ctx>;

impl<'ctx> Solver for Z3Solver<'ctx> {
    type Assertion = AstAndVars<'ctx>;
    type Model = Model<String, ModelValue>;

    fn check(
        &mut self,
        assertions: impl Iterator<Item = Self::Assertion>,
    ) -> SolveResult<Self::Model> {
        WrappedSolver::check(self, assertions)
    }
}
