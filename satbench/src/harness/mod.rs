//! Runs a solver over a batch of instances and collects one [`SolverReport`] per instance.
//!
//! Every instance goes through the same procedure (see [`benchmark_instance`]):
//!  1. the file is validated, so obviously broken instances never reach the solver,
//!  2. the solver is invoked and its exit code is interpreted with an [`ExitCodeConvention`],
//!  3. the standard output is parsed into a verdict and statistics.
//!
//! A failure in any step only affects that instance. It is recorded in
//! [`BatchOutcome::skipped`] and the batch carries on.

mod error;
mod instances;

use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;

pub use error::*;
pub use instances::*;
use log::debug;
use log::info;
use log::warn;
use satbench_cnf::dimacs::validate_file;
use satbench_cnf::dimacs::DeclaredShape;

use crate::report::parse_solver_output;
use crate::report::ExitCodeConvention;
use crate::report::ExitKind;
use crate::report::SolverReport;
use crate::report::SolverStatistics;
use crate::report::Verdict;
use crate::solver::Solver;

/// The options which control a benchmark batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarnessOptions {
    /// How the exit code of the solver is interpreted.
    pub exit_codes: ExitCodeConvention,
    /// The maximum number of solver invocations which run at the same time.
    pub concurrency: NonZeroUsize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        HarnessOptions {
            exit_codes: ExitCodeConvention::default(),
            concurrency: NonZeroUsize::MIN,
        }
    }
}

/// An instance which did not produce a report.
#[derive(Debug)]
pub struct SkippedInstance {
    pub path: PathBuf,
    pub error: BenchmarkError,
}

/// The result of [`run_batch`]. Both lists are ordered by instance path.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<SolverReport>,
    pub skipped: Vec<SkippedInstance>,
}

impl BatchOutcome {
    pub fn num_with_verdict(&self, verdict: Verdict) -> usize {
        self.reports
            .iter()
            .filter(|report| report.result == verdict)
            .count()
    }
}

/// Benchmark `solver` on every file in `files`, in order of their paths.
///
/// With a concurrency limit above one, instances are distributed over that many worker threads;
/// the outcome is ordered by path regardless.
pub fn run_batch<S: Solver + Sync>(
    files: impl IntoIterator<Item = PathBuf>,
    solver: &S,
    options: HarnessOptions,
) -> BatchOutcome {
    let mut files = files.into_iter().collect::<Vec<_>>();
    files.sort();

    let results = if options.concurrency.get() == 1 || files.len() <= 1 {
        files
            .into_iter()
            .map(|path| {
                let result = benchmark_logged(&path, solver, options.exit_codes);
                (path, result)
            })
            .collect()
    } else {
        run_in_parallel(files, solver, options)
    };

    let mut outcome = BatchOutcome::default();
    for (path, result) in results {
        match result {
            Ok(report) => outcome.reports.push(report),
            Err(error) => outcome.skipped.push(SkippedInstance { path, error }),
        }
    }

    info!(
        "Processed {} instances: {} SAT, {} UNSAT, {} skipped",
        outcome.reports.len() + outcome.skipped.len(),
        outcome.num_with_verdict(Verdict::Sat),
        outcome.num_with_verdict(Verdict::Unsat),
        outcome.skipped.len()
    );

    outcome
}

/// Benchmark `solver` on the single instance at `path`.
///
/// The verdict is taken from the exit code when it signals UNSAT, even if the output does not
/// contain the `UNSATISFIABLE` marker. On a normal exit the verdict comes from the markers in
/// the output, and a missing verdict is an [`BenchmarkError::IncompleteReport`].
pub fn benchmark_instance(
    path: &Path,
    solver: &impl Solver,
    exit_codes: ExitCodeConvention,
) -> Result<SolverReport, BenchmarkError> {
    let shape = validate_file(path)?;
    let output = solver.invoke(path)?;

    debug!("Solver stdout for {}:\n{}", path.display(), output.stdout);
    if !output.stderr.is_empty() {
        debug!("Solver stderr for {}:\n{}", path.display(), output.stderr);
    }

    let parsed = parse_solver_output(&output.stdout);

    let result = match exit_codes.classify(output.exit_code) {
        ExitKind::Finished => match parsed.result {
            Verdict::Unknown => return Err(BenchmarkError::IncompleteReport),
            verdict => verdict,
        },

        ExitKind::Unsat => {
            if parsed.result == Verdict::Sat {
                warn!(
                    "{}: the solver exited with the UNSAT code but printed SATISFIABLE",
                    path.display()
                );
            }
            Verdict::Unsat
        }

        ExitKind::InputError => {
            return Err(BenchmarkError::SolverParseError {
                exit_code: exit_codes.input_error,
                stderr: output.stderr.trim().to_owned(),
            })
        }

        ExitKind::Abnormal(Some(code)) => return Err(ExecutionFailure::UnexpectedExit(code).into()),
        ExitKind::Abnormal(None) => return Err(ExecutionFailure::Signal.into()),
    };

    let _ = reconcile_shape(path, shape, &parsed.statistics);

    Ok(SolverReport {
        formula_file: file_name(path),
        result,
        statistics: parsed.statistics,
    })
}

fn benchmark_logged(
    path: &Path,
    solver: &impl Solver,
    exit_codes: ExitCodeConvention,
) -> Result<SolverReport, BenchmarkError> {
    let result = benchmark_instance(path, solver, exit_codes);

    match &result {
        Ok(report) => match report.statistics.cpu_time {
            Some(cpu_time) => info!("{}: {} in {cpu_time}s", path.display(), report.result),
            None => info!("{}: {}", path.display(), report.result),
        },
        Err(error) => warn!("Skipping {}: {error}", path.display()),
    }

    result
}

fn run_in_parallel<S: Solver + Sync>(
    files: Vec<PathBuf>,
    solver: &S,
    options: HarnessOptions,
) -> Vec<(PathBuf, Result<SolverReport, BenchmarkError>)> {
    let num_workers = options.concurrency.get().min(files.len());

    let (job_sender, job_receiver) = crossbeam::channel::unbounded();
    for job in files.into_iter().enumerate() {
        // The receiver is alive, so sending cannot fail.
        let _ = job_sender.send(job);
    }
    drop(job_sender);

    let (result_sender, result_receiver) = crossbeam::channel::unbounded();

    let scope_result = crossbeam::scope(|scope| {
        for _ in 0..num_workers {
            let jobs = job_receiver.clone();
            let results = result_sender.clone();

            let _ = scope.spawn(move |_| {
                for (index, path) in jobs.iter() {
                    let result = benchmark_logged(&path, solver, options.exit_codes);
                    let _ = results.send((index, path, result));
                }
            });
        }
    });

    if let Err(panic) = scope_result {
        std::panic::resume_unwind(panic);
    }

    drop(result_sender);

    let mut results = result_receiver.iter().collect::<Vec<_>>();
    results.sort_by_key(|(index, _, _)| *index);

    results
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}

/// Warn when the problem size reported by the solver differs from the size declared in the
/// header of the instance. The statistics are left as the solver reported them.
///
/// Returns whether the two sizes agree; a size the solver did not report agrees with anything.
fn reconcile_shape(path: &Path, declared: DeclaredShape, statistics: &SolverStatistics) -> bool {
    let mut consistent = true;

    if let Some(num_vars) = statistics.num_vars {
        if num_vars != declared.num_variables as u64 {
            warn!(
                "{}: the header declares {} variables, the solver reports {num_vars}",
                path.display(),
                declared.num_variables
            );
            consistent = false;
        }
    }

    if let Some(num_clauses) = statistics.num_clauses {
        if num_clauses != declared.num_clauses as u64 {
            warn!(
                "{}: the header declares {} clauses, the solver reports {num_clauses}",
                path.display(),
                declared.num_clauses
            );
            consistent = false;
        }
    }

    consistent
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
