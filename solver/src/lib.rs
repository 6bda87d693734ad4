pub mod backend;
pub mod bridge;
pub mod script;

pub use crate::backend::z3::{AstAndVars, AstNode, Translator, WrappedSolver, Z3Solver};
pub use crate::bridge::{BridgeError, ExecError, check_satisfiable, run_script, simplify_formula};
pub use crate::script::{Decl, Expr, Instruction, ModelValue, Script, Sort};
pub use crate::solver::{Model, SolveResult, Solver};

// Re-export essential Z3 types for standalone usage
pub use z3::{Config, Context};

pub mod solver {
    use std::collections::HashMap;

    /// Core solver trait that all backend implementations must provide
    pub trait Solver {
        type Assertion;
        type Model;

        /// Check satisfiability of the given assertions
        fn check(
            &mut self,
            assertions: impl Iterator<Item = Self::Assertion>,
        ) -> SolveResult<Self::Model>;
    }

    pub type Model<I, V> = HashMap<I, V>;

    /// The result of the checking performed by [`Solver`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum SolveResult<M> {
        Sat(M),
        Unsat,
        Unknown,
    }

    impl<M> SolveResult<M> {
        /// Whether the checked state is satisfiable.
        ///
        /// Unsat and unknown both answer `false` here; callers that need to
        /// tell them apart must match on the result instead.
        pub fn is_sat(&self) -> bool {
            matches!(self, Self::Sat(_))
        }

        pub fn model(&self) -> Option<&M> {
            match self {
                Self::Sat(model) => Some(model),
                _ => None,
            }
        }
    }
}
