//! Builders for benchmark test sets.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use log::warn;
use satbench_cnf::dimacs::write_cnf;
use satbench_cnf::generate_uniform;
use satbench_cnf::generate_unsatisfiable;
use satbench_cnf::Formula;
use satbench_cnf::GenerationError;
use satbench_cnf::Random;
use thiserror::Error;

use crate::harness::benchmark_instance;
use crate::report::ExitCodeConvention;
use crate::report::Verdict;
use crate::solver::Solver;

#[derive(Debug, Error)]
pub enum TestsetError {
    #[error("failed to write instance: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Generation(Box<GenerationError>),
}

impl From<GenerationError> for TestsetError {
    fn from(error: GenerationError) -> Self {
        TestsetError::Generation(Box::new(error))
    }
}

/// Write `count` formulas from [`generate_unsatisfiable`] to `dir`, named
/// `unsat_formula_{i}.cnf` for `i` in `1..=count`. Returns the paths of the written files.
pub fn write_unsat_formulas(
    dir: &Path,
    count: usize,
    num_vars: usize,
    num_clauses: usize,
    rng: &mut impl Random,
) -> Result<Vec<PathBuf>, TestsetError> {
    std::fs::create_dir_all(dir)?;

    (1..=count)
        .map(|index| {
            let formula = generate_unsatisfiable(num_vars, num_clauses, rng)?;
            let path = dir.join(format!("unsat_formula_{index}.cnf"));
            write_formula(&formula, &path, rng)?;

            info!("Generated unsatisfiable formula {index}/{count}: {}", path.display());
            Ok(path)
        })
        .collect()
}

/// The options of [`build_random_testset`].
#[derive(Clone, Debug)]
pub struct TestsetOptions {
    /// The test set is written to the `sat` and `unsat` subdirectories of this directory.
    pub output_dir: PathBuf,
    pub num_vars: usize,
    pub num_clauses: usize,
    /// The number of satisfiable instances to collect.
    pub num_sat: usize,
    /// The number of unsatisfiable instances to collect.
    pub num_unsat: usize,
    /// The maximum number of formulas which are drawn before giving up.
    pub max_attempts: usize,
    pub exit_codes: ExitCodeConvention,
}

/// What [`build_random_testset`] produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Testset {
    pub sat: Vec<PathBuf>,
    pub unsat: Vec<PathBuf>,
    pub attempts: usize,
}

/// Build a test set of uniform random 3-CNF formulas classified by `solver`.
///
/// Formulas are drawn with [`generate_uniform`] and decided by the solver. Depending on the
/// verdict, a formula is kept as `sat/{clauses}_{vars}_{i}.cnf` or
/// `unsat/{clauses}_{vars}_{i}.cnf` below the output directory, until the requested numbers are
/// reached or `max_attempts` formulas have been drawn. Formulas that are not needed anymore, or
/// that the solver fails on, are discarded.
pub fn build_random_testset(
    options: &TestsetOptions,
    solver: &impl Solver,
    rng: &mut impl Random,
) -> Result<Testset, TestsetError> {
    let sat_dir = options.output_dir.join("sat");
    let unsat_dir = options.output_dir.join("unsat");
    std::fs::create_dir_all(&sat_dir)?;
    std::fs::create_dir_all(&unsat_dir)?;

    let candidate_path = options.output_dir.join("candidate.cnf");
    let mut testset = Testset::default();

    while (testset.sat.len() < options.num_sat || testset.unsat.len() < options.num_unsat)
        && testset.attempts < options.max_attempts
    {
        testset.attempts += 1;

        let formula = generate_uniform(options.num_vars, options.num_clauses, rng)?;
        write_formula(&formula, &candidate_path, rng)?;

        let verdict = match benchmark_instance(&candidate_path, solver, options.exit_codes) {
            Ok(report) => report.result,
            Err(error) => {
                warn!("Discarding a candidate formula: {error}");
                continue;
            }
        };

        let (dir, collected, wanted) = match verdict {
            Verdict::Sat => (&sat_dir, &mut testset.sat, options.num_sat),
            Verdict::Unsat => (&unsat_dir, &mut testset.unsat, options.num_unsat),
            Verdict::Unknown => continue,
        };

        if collected.len() < wanted {
            let path = dir.join(format!(
                "{}_{}_{}.cnf",
                options.num_clauses,
                options.num_vars,
                collected.len()
            ));
            std::fs::rename(&candidate_path, &path)?;

            info!("{verdict} file path: {}", path.display());
            collected.push(path);
        }
    }

    if candidate_path.exists() {
        std::fs::remove_file(&candidate_path)?;
    }

    if testset.sat.len() < options.num_sat || testset.unsat.len() < options.num_unsat {
        warn!(
            "Gave up after {} attempts with {} SAT and {} UNSAT instances",
            testset.attempts,
            testset.sat.len(),
            testset.unsat.len()
        );
    }

    Ok(testset)
}

fn write_formula(
    formula: &Formula,
    path: &Path,
    rng: &mut impl Random,
) -> Result<(), std::io::Error> {
    let file = File::create(path)?;
    write_cnf(formula, rng, BufWriter::new(file))
}
