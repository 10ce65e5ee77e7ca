//! The structured record extracted from a single solver run.

mod exit_code;
mod parser;

use std::fmt::Display;
use std::fmt::Formatter;

pub use exit_code::*;
pub use parser::*;
use serde::Serialize;

/// The satisfiability verdict reported by a solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    #[serde(rename = "SAT")]
    Sat,
    #[serde(rename = "UNSAT")]
    Unsat,
    /// Neither verdict could be established from the solver output.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Sat => write!(f, "SAT"),
            Verdict::Unsat => write!(f, "UNSAT"),
            Verdict::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// The statistics a solver printed about its run.
///
/// Every field is optional: a statistic which the solver did not report is [`None`], which is
/// different from a statistic reported as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverStatistics {
    pub num_vars: Option<u64>,
    pub num_clauses: Option<u64>,
    /// In seconds.
    pub parse_time: Option<f64>,
    /// In seconds.
    pub simplification_time: Option<f64>,
    /// In seconds.
    pub cpu_time: Option<f64>,
    pub conflicts: Option<u64>,
    pub decisions: Option<u64>,
    pub propagations: Option<u64>,
    pub conflict_literals: Option<u64>,
    pub memory_used_mb: Option<f64>,
}

/// The outcome of benchmarking one instance.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverReport {
    /// The file name of the instance.
    pub formula_file: String,
    pub result: Verdict,
    pub statistics: SolverStatistics,
}
