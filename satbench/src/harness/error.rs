use satbench_cnf::dimacs::ValidationError;
use thiserror::Error;

use crate::solver::InvocationError;

/// The reasons for which an instance does not produce a [`SolverReport`](crate::SolverReport).
///
/// None of these abort a batch; the instance is recorded as skipped and the batch continues.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("malformed CNF file: {0}")]
    MalformedCnf(#[from] ValidationError),

    #[error("the solver could not parse the instance (exit code {exit_code}): {stderr}")]
    SolverParseError { exit_code: i32, stderr: String },

    #[error("solver execution failed: {0}")]
    SolverExecutionFailure(#[from] ExecutionFailure),

    #[error("the solver finished without reporting SATISFIABLE or UNSATISFIABLE")]
    IncompleteReport,
}

/// The ways in which running the solver can fail.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("unexpected exit code {0}")]
    UnexpectedExit(i32),

    #[error("the solver was terminated by a signal")]
    Signal,
}

impl From<InvocationError> for BenchmarkError {
    fn from(value: InvocationError) -> Self {
        BenchmarkError::SolverExecutionFailure(value.into())
    }
}
