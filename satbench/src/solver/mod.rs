//! The boundary to the solver under benchmark.
//!
//! The harness only needs to run the solver on an instance and look at what it printed and how
//! it exited. [`Solver`] captures exactly that, so the harness can be driven by a fake solver in
//! tests and by a [`ProcessSolver`] otherwise.

mod process;

use std::path::Path;
use std::time::Duration;

pub use process::*;
use thiserror::Error;

/// Everything a single solver run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverOutput {
    pub stdout: String,
    pub stderr: String,
    /// The exit code of the solver, or [`None`] if it was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Errors which prevent a solver run from producing a [`SolverOutput`].
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to start the solver: {0}")]
    Launch(std::io::Error),

    #[error("the solver took more than {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("failed to capture the solver output: {0}")]
    Io(#[from] std::io::Error),
}

/// A solver which can decide DIMACS CNF instances.
pub trait Solver {
    /// Run the solver on the instance at `instance`.
    ///
    /// A non-zero exit code is not an error at this level; interpreting it is up to the caller.
    fn invoke(&self, instance: &Path) -> Result<SolverOutput, InvocationError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn invoke(&self, instance: &Path) -> Result<SolverOutput, InvocationError> {
        (**self).invoke(instance)
    }
}
