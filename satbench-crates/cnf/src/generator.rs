//! Random 3-CNF generation.
//!
//! [`generate_unsatisfiable`] builds formulas meant to be unsatisfiable: the clauses are drawn
//! around one hidden assignment, after which clauses that are falsified by that assignment are
//! appended. This is a heuristic. The conflict clauses only rule out the hidden assignment, so
//! the resulting formula is expected, but not verified, to be unsatisfiable.
//!
//! [`generate_uniform`] draws plain uniform random 3-CNF formulas, whose satisfiability has to be
//! decided by a solver.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::Clause;
use crate::Formula;
use crate::Literal;
use crate::Random;

/// The number of literals in every generated clause.
pub const CLAUSE_LENGTH: usize = 3;

/// The number of trailing clauses of [`generate_unsatisfiable`] which are falsified by the hidden
/// assignment.
pub const NUM_CONFLICT_CLAUSES: usize = 2;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error(
        "cannot generate {num_clauses} clauses over {num_vars} variables, at least \
         {min_vars} variables and {min_clauses} clauses are required"
    )]
    InvalidParameters {
        num_vars: usize,
        num_clauses: usize,
        min_vars: usize,
        min_clauses: usize,
    },
}

/// Generate a 3-CNF formula over `num_vars` variables with `num_clauses` clauses which is
/// unsatisfiable by construction.
///
/// The first `num_clauses - 2` clauses each pick three distinct variables, and for every
/// variable flip a fair coin to decide whether the literal agrees with a randomly drawn hidden
/// assignment. The final two clauses each pick three fresh distinct variables whose literals
/// all disagree with the hidden assignment.
///
/// Fails with [`GenerationError::InvalidParameters`] if `num_vars < 3` or `num_clauses < 2`.
pub fn generate_unsatisfiable(
    num_vars: usize,
    num_clauses: usize,
    rng: &mut impl Random,
) -> Result<Formula, GenerationError> {
    check_parameters(num_vars, num_clauses, NUM_CONFLICT_CLAUSES)?;

    let solution = (0..num_vars)
        .map(|_| rng.generate_bool(0.5))
        .collect::<Vec<_>>();

    let mut sampler = VariableSampler::new(num_vars);
    let mut formula = Formula::new(num_vars, Vec::with_capacity(num_clauses));

    for _ in 0..num_clauses - NUM_CONFLICT_CLAUSES {
        let clause = sampler
            .sample(rng)
            .iter()
            .map(|&variable| {
                let agrees = rng.generate_bool(0.5);
                literal_relative_to(&solution, variable, agrees)
            })
            .collect::<Clause>();

        formula.push_clause(clause);
    }

    for _ in 0..NUM_CONFLICT_CLAUSES {
        let clause = sampler
            .sample(rng)
            .iter()
            .map(|&variable| literal_relative_to(&solution, variable, false))
            .collect::<Clause>();

        formula.push_clause(clause);
    }

    Ok(formula)
}

/// Generate a uniform random 3-CNF formula: every clause has three distinct variables, each
/// negated with probability one half.
///
/// Fails with [`GenerationError::InvalidParameters`] if `num_vars < 3` or `num_clauses < 1`.
pub fn generate_uniform(
    num_vars: usize,
    num_clauses: usize,
    rng: &mut impl Random,
) -> Result<Formula, GenerationError> {
    check_parameters(num_vars, num_clauses, 1)?;

    let mut sampler = VariableSampler::new(num_vars);
    let mut formula = Formula::new(num_vars, Vec::with_capacity(num_clauses));

    for _ in 0..num_clauses {
        let clause = sampler
            .sample(rng)
            .iter()
            .map(|&variable| Literal::new(variable, rng.generate_bool(0.5)))
            .collect::<Clause>();

        formula.push_clause(clause);
    }

    Ok(formula)
}

fn check_parameters(
    num_vars: usize,
    num_clauses: usize,
    min_clauses: usize,
) -> Result<(), GenerationError> {
    // Variables are written as `i32` DIMACS codes.
    let max_vars = i32::MAX as usize;

    if num_vars < CLAUSE_LENGTH || num_vars > max_vars || num_clauses < min_clauses {
        return Err(GenerationError::InvalidParameters {
            num_vars,
            num_clauses,
            min_vars: CLAUSE_LENGTH,
            min_clauses,
        });
    }

    Ok(())
}

/// The literal over `variable` which agrees (or disagrees) with the value `solution` assigns to
/// it.
fn literal_relative_to(solution: &[bool], variable: NonZeroU32, agrees: bool) -> Literal {
    let value = solution[variable.get() as usize - 1];
    Literal::new(variable, value == agrees)
}

/// Samples [`CLAUSE_LENGTH`] distinct variables without replacement.
///
/// Every sample runs the first steps of a Fisher-Yates shuffle over a pool of all variables. The
/// pool is a permutation at all times, so it does not have to be reset between samples.
#[derive(Debug)]
struct VariableSampler {
    pool: Vec<NonZeroU32>,
}

impl VariableSampler {
    fn new(num_vars: usize) -> VariableSampler {
        VariableSampler {
            pool: (1..=num_vars as u32)
                .filter_map(NonZeroU32::new)
                .collect(),
        }
    }

    fn sample(&mut self, rng: &mut impl Random) -> &[NonZeroU32] {
        let num_vars = self.pool.len();

        for index in 0..CLAUSE_LENGTH {
            let selected = rng.generate_usize_in_range(index..num_vars);
            self.pool.swap(index, selected);
        }

        &self.pool[..CLAUSE_LENGTH]
    }
}
