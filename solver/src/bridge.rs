//! Entry points for hosts that ship constraint scripts across a language
//! boundary.
//!
//! The input is UTF-8 JSON encoding a [`Script`]; the output is the verdict
//! of the script's `check` instruction. Every call builds against a fresh
//! solving context, so calls are independent of each other.

use core::str::Utf8Error;

use derive_more as dm;
use tracing::debug;
use z3::ast;
use z3::{Config, Context};

use crate::backend::z3::{AstNode, Translator, WrappedSolver};
use crate::script::{Instruction, ModelValue, Script, Sort};
use crate::solver::{Model, SolveResult};

/// Failures surfaced to the host. Nothing is caught and swallowed: every
/// failure either shows up here or is a contract-violation panic.
#[derive(Debug, dm::Display, dm::Error, dm::From)]
pub enum BridgeError {
    /// The input bytes are not valid UTF-8.
    #[display("input is not valid utf-8: {_0}")]
    Decode(#[error(source)] Utf8Error),
    /// The script finished without ever executing a `check` instruction,
    /// so there is no verdict to report.
    #[display("script recorded no verdict: it contains no check instruction")]
    MissingVerdict,
    /// The script could not be evaluated.
    #[display("script evaluation failed: {_0}")]
    Execution(#[error(source)] ExecError),
}

/// Failures while evaluating a decoded script.
#[derive(Debug, dm::Display, dm::Error)]
pub enum ExecError {
    #[display("malformed script: {_0}")]
    Syntax(#[error(source)] serde_json::Error),
    #[display("unknown variable: {_0}")]
    UnknownVariable(#[error(ignore)] String),
    #[display("variable declared twice: {_0}")]
    Redeclared(#[error(ignore)] String),
    #[display("expected a {expected} operand, found {found}")]
    SortMismatch { expected: Sort, found: Sort },
    #[display("expected a numeric operand, found {_0}")]
    NotNumeric(#[error(ignore)] Sort),
    #[display("'{_0}' needs at least one operand")]
    EmptyOperands(#[error(ignore)] &'static str),
}

/// Decodes and runs a solver script, collapsing the verdict to a boolean.
///
/// `true` means satisfiable. Unsatisfiable and unknown both come back as
/// `false`; hosts that need the distinction should call [`run_script`].
pub fn check_satisfiable(raw: &[u8]) -> Result<bool, BridgeError> {
    Ok(run_script(raw)?.is_sat())
}

/// Executes an encoded solver script and returns the verdict recorded by
/// its last `check` instruction, with a model of the declared variables
/// when the checked state is satisfiable.
pub fn run_script(raw: &[u8]) -> Result<SolveResult<Model<String, ModelValue>>, BridgeError> {
    let script = decode(raw)?;
    debug!(instructions = script.len(), "executing solver script");

    let config = Config::new();
    let context = Context::new(&config);
    let mut translator = Translator::new(&context);
    let solver = WrappedSolver::new(&context);

    let mut assertions = Vec::new();
    let mut verdict = None;
    for instruction in &script {
        match instruction {
            Instruction::Declare(decl) => translator.declare(decl)?,
            Instruction::Assert(expr) => assertions.push(translator.assertion(expr)?),
            Instruction::Check => verdict = Some(solver.check(assertions.iter().cloned())),
        }
    }
    verdict.ok_or(BridgeError::MissingVerdict)
}

/// Builds the script's assertions without checking them and returns the
/// simplified conjunction in SMT-LIB text form. `check` instructions are
/// ignored here.
pub fn simplify_formula(raw: &[u8]) -> Result<String, BridgeError> {
    let script = decode(raw)?;

    let config = Config::new();
    let context = Context::new(&config);
    let mut translator = Translator::new(&context);

    let mut asserted = Vec::new();
    for instruction in &script {
        match instruction {
            Instruction::Declare(decl) => translator.declare(decl)?,
            Instruction::Assert(expr) => asserted.push(translator.assertion(expr)?.value),
            Instruction::Check => {}
        }
    }

    let conjunction = match asserted.len() {
        0 => ast::Bool::from_bool(&context, true),
        1 => asserted.remove(0),
        _ => {
            let refs = asserted.iter().collect::<Vec<_>>();
            ast::Bool::and(&context, &refs)
        }
    };
    let smtlib = AstNode::from(conjunction).simplify().to_smtlib();
    Ok(smtlib)
}

fn decode(raw: &[u8]) -> Result<Script, BridgeError> {
    let text = core::str::from_utf8(raw)?;
    let script = serde_json::from_str(text).map_err(ExecError::Syntax)?;
    Ok(script)
}
