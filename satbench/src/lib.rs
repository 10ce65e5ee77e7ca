//! # satbench
//! Benchmarks an external SAT solver on DIMACS CNF instances.
//!
//! Every instance is validated, handed to the solver (see [`Solver`] and [`ProcessSolver`]), and
//! the output of the solver is turned into a [`SolverReport`] holding the verdict and whatever
//! statistics the solver printed. A batch of instances is processed with [`run_batch`], and the
//! reports can be tabulated with [`write_results`].
//!
//! Instances are typically produced by the generator in [`satbench_cnf`], either as formulas
//! which are unsatisfiable by construction ([`write_unsat_formulas`]) or as a random test set
//! classified by the solver itself ([`build_random_testset`]).
//!
//! ```no_run
//! # use std::path::PathBuf;
//! # use satbench::*;
//! let instances = collect_instances(&[PathBuf::from("formulas")])?;
//! let solver = ProcessSolver::new("minisat");
//!
//! let outcome = run_batch(instances, &solver, HarnessOptions::default());
//! write_results(&outcome.reports, std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod harness;
pub mod report;
pub mod solver;
pub mod table;
pub mod testset;

pub use harness::benchmark_instance;
pub use harness::collect_instances;
pub use harness::run_batch;
pub use harness::BatchOutcome;
pub use harness::BenchmarkError;
pub use harness::HarnessOptions;
pub use report::ExitCodeConvention;
pub use report::SolverReport;
pub use report::SolverStatistics;
pub use report::Verdict;
pub use solver::InvocationError;
pub use solver::ProcessSolver;
pub use solver::Solver;
pub use solver::SolverOutput;
pub use table::write_results;
pub use testset::build_random_testset;
pub use testset::write_unsat_formulas;
