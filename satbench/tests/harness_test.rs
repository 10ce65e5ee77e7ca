#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use satbench::harness::ExecutionFailure;
use satbench::*;
use satbench_cnf::dimacs::ValidationError;
use tempfile::TempDir;

/// Answers with a fixed output per instance file name, and with UNSAT for everything else.
/// Instances listed in `timeouts` fail to run as if the solver timed out.
#[derive(Debug, Default)]
struct ScriptedSolver {
    outputs: HashMap<String, SolverOutput>,
    timeouts: Vec<String>,
}

impl ScriptedSolver {
    fn with_output(mut self, file_name: &str, stdout: &str, exit_code: Option<i32>) -> Self {
        let _ = self.outputs.insert(
            file_name.to_owned(),
            SolverOutput {
                stdout: stdout.to_owned(),
                stderr: String::new(),
                exit_code,
            },
        );
        self
    }

    fn with_timeout(mut self, file_name: &str) -> Self {
        self.timeouts.push(file_name.to_owned());
        self
    }
}

impl Solver for ScriptedSolver {
    fn invoke(&self, instance: &Path) -> Result<SolverOutput, InvocationError> {
        let file_name = instance
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if self.timeouts.iter().any(|name| name == file_name) {
            return Err(InvocationError::Timeout(Duration::from_secs(60)));
        }

        Ok(self
            .outputs
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| SolverOutput {
                stdout: MINISAT_UNSAT.to_owned(),
                stderr: String::new(),
                exit_code: Some(20),
            }))
    }
}

const MINISAT_UNSAT: &str = "\
============================[ Problem Statistics ]=============================
|                                                                             |
|  Number of variables:            20                                         |
|  Number of clauses:              90                                         |
|  Parse time:                   0.00 s                                       |
|  Simplification time:          0.00 s                                       |
|                                                                             |
===============================================================================
Solved by simplification
restarts              : 1
conflicts             : 12             (1200 /sec)
decisions             : 17             (0.00 % random) (1700 /sec)
propagations          : 241            (24100 /sec)
conflict literals     : 30             (3.23 % deleted)
Memory used           : 11.00 MB
CPU time              : 0.01 s

UNSATISFIABLE
";

fn unsat_instances(count: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let paths = write_unsat_formulas(dir.path(), count, 20, 90, &mut SmallRng::seed_from_u64(42))
        .expect("formulas are written");

    (dir, paths)
}

#[test]
fn batch_skips_malformed_instance_and_continues() {
    let (_dir, paths) = unsat_instances(5);
    std::fs::write(&paths[2], "p cnf 20\n1 2 3 0\n").expect("overwrite instance");

    let outcome = run_batch(paths.clone(), &ScriptedSolver::default(), HarnessOptions::default());

    assert_eq!(4, outcome.reports.len());
    assert_eq!(4, outcome.num_with_verdict(Verdict::Unsat));
    assert_eq!(1, outcome.skipped.len());
    assert_eq!(paths[2], outcome.skipped[0].path);
    assert!(matches!(
        outcome.skipped[0].error,
        BenchmarkError::MalformedCnf(ValidationError::InvalidHeader(_))
    ));

    let report = &outcome.reports[0];
    assert_eq!("unsat_formula_1.cnf", report.formula_file);
    assert_eq!(Some(20), report.statistics.num_vars);
    assert_eq!(Some(90), report.statistics.num_clauses);
    assert_eq!(Some(12), report.statistics.conflicts);
    assert_eq!(Some(0.01), report.statistics.cpu_time);
}

#[test]
fn unsat_exit_code_without_marker_is_unsat() {
    let (_dir, paths) = unsat_instances(1);
    let solver = ScriptedSolver::default().with_output("unsat_formula_1.cnf", "", Some(20));

    let report = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default())
        .expect("exit code decides the verdict");

    assert_eq!(Verdict::Unsat, report.result);
    assert_eq!(SolverStatistics::default(), report.statistics);
}

#[test]
fn input_error_exit_code_is_a_solver_parse_error() {
    let (_dir, paths) = unsat_instances(1);
    let solver = ScriptedSolver::default().with_output("unsat_formula_1.cnf", "", Some(10));

    let result = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default());

    assert!(matches!(
        result,
        Err(BenchmarkError::SolverParseError { exit_code: 10, .. })
    ));
}

#[test]
fn other_exit_codes_are_execution_failures() {
    let (_dir, paths) = unsat_instances(2);
    let solver = ScriptedSolver::default()
        .with_output("unsat_formula_1.cnf", "UNSATISFIABLE\n", Some(3))
        .with_output("unsat_formula_2.cnf", "", None);

    let unexpected = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default());
    let signalled = benchmark_instance(&paths[1], &solver, ExitCodeConvention::default());

    assert!(matches!(
        unexpected,
        Err(BenchmarkError::SolverExecutionFailure(
            ExecutionFailure::UnexpectedExit(3)
        ))
    ));
    assert!(matches!(
        signalled,
        Err(BenchmarkError::SolverExecutionFailure(ExecutionFailure::Signal))
    ));
}

#[test]
fn normal_exit_without_verdict_is_incomplete() {
    let (_dir, paths) = unsat_instances(1);
    let solver =
        ScriptedSolver::default().with_output("unsat_formula_1.cnf", "CPU time : 1.0 s\n", Some(0));

    let result = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default());

    assert!(matches!(result, Err(BenchmarkError::IncompleteReport)));
}

#[test]
fn normal_exit_takes_verdict_from_output() {
    let (_dir, paths) = unsat_instances(1);
    let solver =
        ScriptedSolver::default().with_output("unsat_formula_1.cnf", "SATISFIABLE\n", Some(0));

    let report = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default())
        .expect("verdict is in the output");

    assert_eq!(Verdict::Sat, report.result);
}

#[test]
fn custom_exit_code_convention() {
    let (_dir, paths) = unsat_instances(1);
    let solver = ScriptedSolver::default().with_output("unsat_formula_1.cnf", "", Some(1));
    let convention = ExitCodeConvention {
        unsat: 1,
        input_error: 2,
        sat: None,
    };

    let report =
        benchmark_instance(&paths[0], &solver, convention).expect("exit code decides the verdict");

    assert_eq!(Verdict::Unsat, report.result);
}

#[test]
fn reports_are_ordered_by_path() {
    let (_dir, mut paths) = unsat_instances(4);
    paths.reverse();

    let outcome = run_batch(paths, &ScriptedSolver::default(), HarnessOptions::default());

    let names = outcome
        .reports
        .iter()
        .map(|report| report.formula_file.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            "unsat_formula_1.cnf",
            "unsat_formula_2.cnf",
            "unsat_formula_3.cnf",
            "unsat_formula_4.cnf",
        ],
        names
    );
}

#[test]
fn parallel_batch_matches_sequential_batch() {
    let (_dir, paths) = unsat_instances(8);
    std::fs::write(&paths[5], "").expect("overwrite instance");
    let solver = ScriptedSolver::default()
        .with_output("unsat_formula_2.cnf", "SATISFIABLE\n", Some(0))
        .with_output("unsat_formula_7.cnf", "", Some(10));

    let sequential = run_batch(paths.clone(), &solver, HarnessOptions::default());
    let parallel = run_batch(
        paths,
        &solver,
        HarnessOptions {
            concurrency: NonZeroUsize::new(3).expect("non-zero"),
            ..Default::default()
        },
    );

    assert_eq!(sequential.reports, parallel.reports);
    assert_eq!(
        sequential
            .skipped
            .iter()
            .map(|skipped| &skipped.path)
            .collect::<Vec<_>>(),
        parallel
            .skipped
            .iter()
            .map(|skipped| &skipped.path)
            .collect::<Vec<_>>()
    );
    assert_eq!(2, parallel.skipped.len());
    assert_eq!(1, parallel.num_with_verdict(Verdict::Sat));
}

#[test]
fn batch_results_are_tabulated() {
    let (_dir, paths) = unsat_instances(2);

    let outcome = run_batch(paths, &ScriptedSolver::default(), HarnessOptions::default());

    let mut buffer = Vec::new();
    write_results(&outcome.reports, &mut buffer).expect("writing to memory");
    let table = String::from_utf8(buffer).expect("utf8");

    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(3, lines.len());
    assert_eq!(
        "unsat_formula_1.cnf,20,90,0.0,0.0,12,17,241,30,11.0,0.01,UNSAT",
        lines[1]
    );
}

#[test]
fn solver_that_cannot_run_skips_only_that_instance() {
    let (_dir, paths) = unsat_instances(3);
    let solver = ScriptedSolver::default().with_timeout("unsat_formula_2.cnf");

    let outcome = run_batch(paths.clone(), &solver, HarnessOptions::default());

    assert_eq!(2, outcome.reports.len());
    assert_eq!(2, outcome.num_with_verdict(Verdict::Unsat));
    assert_eq!(1, outcome.skipped.len());
    assert_eq!(paths[1], outcome.skipped[0].path);
    assert!(matches!(
        outcome.skipped[0].error,
        BenchmarkError::SolverExecutionFailure(ExecutionFailure::Invocation(
            InvocationError::Timeout(_)
        ))
    ));
}

#[test]
fn solver_statistics_are_kept_when_they_differ_from_the_header() {
    let (_dir, paths) = unsat_instances(1);
    let stdout = MINISAT_UNSAT
        .replace("Number of variables:            20", "Number of variables:            17")
        .replace("Number of clauses:              90", "Number of clauses:              85");
    let solver = ScriptedSolver::default().with_output("unsat_formula_1.cnf", &stdout, Some(20));

    let report = benchmark_instance(&paths[0], &solver, ExitCodeConvention::default())
        .expect("a size mismatch does not skip the instance");

    assert_eq!(Verdict::Unsat, report.result);
    assert_eq!(Some(17), report.statistics.num_vars);
    assert_eq!(Some(85), report.statistics.num_clauses);
    assert_eq!(Some(12), report.statistics.conflicts);
}
