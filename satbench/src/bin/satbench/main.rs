mod result;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use log::error;
use log::info;
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use result::SatBenchError;
use result::SatBenchResult;
use satbench::testset::TestsetOptions;
use satbench::*;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    version,
    about,
    arg_required_else_help = true
)]
struct Cli {
    /// Log debug messages, including the raw output of the solver.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate 3-CNF formulas which are unsatisfiable by construction.
    ///
    /// The formulas are written to '<OUTPUT_DIR>/unsat_formula_{i}.cnf' for i = 1..=count.
    #[command(verbatim_doc_comment)]
    Generate {
        /// The number of variables of every formula. At least 3.
        #[arg(long, default_value_t = 20)]
        num_vars: usize,

        /// The number of clauses of every formula. At least 2.
        #[arg(long, default_value_t = 90)]
        num_clauses: usize,

        /// The number of formulas to generate.
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// The directory the formulas are written to. It is created if it does not exist.
        #[arg(long, default_value = "formulas")]
        output_dir: PathBuf,

        /// The seed of the random number generator.
        #[arg(long, default_value_t = 42)]
        random_seed: u64,
    },

    /// Run the solver on every instance and tabulate the reports as CSV.
    Run {
        #[command(flatten)]
        solver: SolverArgs,

        /// The maximum number of solver runs which happen at the same time.
        #[arg(long, default_value_t = NonZeroUsize::MIN)]
        jobs: NonZeroUsize,

        /// The file the results table is written to. Without it, the table goes to stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// The instances to benchmark. Directories are searched recursively for '*.cnf' files.
        #[arg(required = true)]
        instances: Vec<PathBuf>,
    },

    /// Build a test set of uniform random 3-CNF formulas, classified as SAT or UNSAT by the
    /// solver.
    ///
    /// The instances are written to '<OUTPUT_DIR>/sat/{clauses}_{vars}_{i}.cnf' and
    /// '<OUTPUT_DIR>/unsat/{clauses}_{vars}_{i}.cnf'.
    #[command(verbatim_doc_comment)]
    Testset {
        #[command(flatten)]
        solver: SolverArgs,

        /// The number of variables of every formula.
        #[arg(long, default_value_t = 20)]
        num_vars: usize,

        /// The number of clauses of every formula.
        #[arg(long, default_value_t = 91)]
        num_clauses: usize,

        /// The number of satisfiable instances to collect.
        #[arg(long, default_value_t = 10)]
        num_sat: usize,

        /// The number of unsatisfiable instances to collect.
        #[arg(long, default_value_t = 10)]
        num_unsat: usize,

        /// The maximum number of formulas which are drawn before giving up.
        #[arg(long, default_value_t = 1000)]
        max_attempts: usize,

        /// The directory the test set is written to.
        #[arg(long, default_value = "testset")]
        output_dir: PathBuf,

        /// The seed of the random number generator.
        #[arg(long, default_value_t = 42)]
        random_seed: u64,
    },
}

#[derive(Debug, Args)]
struct SolverArgs {
    /// The solver executable.
    #[arg(long, default_value = "minisat")]
    solver: PathBuf,

    /// An argument passed to the solver before the instance path. Can be repeated.
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,

    /// The time limit of a single solver run in seconds. A value of 0 disables the limit.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// The exit code with which the solver reports an unsatisfiable instance.
    #[arg(long, default_value_t = 20)]
    unsat_exit_code: i32,

    /// The exit code with which the solver reports that it could not parse the instance.
    #[arg(long, default_value_t = 10)]
    input_error_exit_code: i32,

    /// The exit code with which the solver reports a satisfiable instance, if it has one.
    ///
    /// MiniSat exits with 10 on SAT; pass '--sat-exit-code 10' to read the verdict of such runs
    /// from the output instead of treating them as input errors.
    #[arg(long, verbatim_doc_comment)]
    sat_exit_code: Option<i32>,
}

impl SolverArgs {
    fn process_solver(&self) -> ProcessSolver {
        let timeout = (self.timeout > 0).then_some(Duration::from_secs(self.timeout));

        ProcessSolver::new(&self.solver)
            .with_args(self.solver_args.iter().cloned())
            .with_timeout(timeout)
    }

    fn exit_codes(&self) -> ExitCodeConvention {
        ExitCodeConvention {
            unsat: self.unsat_exit_code,
            input_error: self.input_error_exit_code,
            sat: self.sat_exit_code,
        }
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Stdout is reserved for the results table.
    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> SatBenchResult<()> {
    let cli = Cli::parse();

    configure_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            num_vars,
            num_clauses,
            count,
            output_dir,
            random_seed,
        } => {
            let mut rng = SmallRng::seed_from_u64(random_seed);
            let paths =
                write_unsat_formulas(&output_dir, count, num_vars, num_clauses, &mut rng)?;

            info!(
                "Wrote {} formulas to {}",
                paths.len(),
                output_dir.display()
            );
        }

        Command::Run {
            solver,
            jobs,
            output,
            instances,
        } => {
            let files = collect_instances(&instances)?;
            if files.is_empty() {
                let searched = instances
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(SatBenchError::NoInstances(searched));
            }

            let options = HarnessOptions {
                exit_codes: solver.exit_codes(),
                concurrency: jobs,
            };
            let outcome = run_batch(files, &solver.process_solver(), options);

            match output {
                Some(path) => {
                    write_results(&outcome.reports, BufWriter::new(File::create(&path)?))?;
                    info!("Results written to {}", path.display());
                }
                None => write_results(&outcome.reports, std::io::stdout().lock())?,
            }
        }

        Command::Testset {
            solver,
            num_vars,
            num_clauses,
            num_sat,
            num_unsat,
            max_attempts,
            output_dir,
            random_seed,
        } => {
            let options = TestsetOptions {
                output_dir,
                num_vars,
                num_clauses,
                num_sat,
                num_unsat,
                max_attempts,
                exit_codes: solver.exit_codes(),
            };

            let mut rng = SmallRng::seed_from_u64(random_seed);
            let testset = build_random_testset(&options, &solver.process_solver(), &mut rng)?;

            info!(
                "Built a test set of {} SAT and {} UNSAT instances in {} attempts",
                testset.sat.len(),
                testset.unsat.len(),
                testset.attempts
            );
        }
    }

    Ok(())
}
