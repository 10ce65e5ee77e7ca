use std::io::Write;
use std::num::NonZeroU32;

use itertools::Itertools;
use log::warn;

use crate::Clause;
use crate::Formula;
use crate::Literal;
use crate::Random;
use crate::CLAUSE_LENGTH;

/// Write `formula` in the DIMACS CNF format to `writer`.
///
/// The header declares the formula's variable count and its number of clauses. Every clause is
/// written with exactly three literals: shorter clauses are padded with random literals over
/// `[1, num_vars]`, longer clauses are truncated to their first three literals. Generated
/// formulas never need this, so a warning is logged whenever a clause is normalised.
///
/// This function wraps IO operations, which is why it can fail with an IO error.
pub fn write_cnf(
    formula: &Formula,
    rng: &mut impl Random,
    mut writer: impl Write,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "p cnf {} {}",
        formula.num_variables(),
        formula.num_clauses()
    )?;

    for clause in formula.clauses() {
        if clause.len() == CLAUSE_LENGTH {
            write_clause(&mut writer, clause)?;
        } else {
            warn!(
                "Clause {} does not have exactly {CLAUSE_LENGTH} literals",
                clause.literals().iter().join(" ")
            );

            let clause = normalise_clause(clause, formula.num_variables(), rng);
            write_clause(&mut writer, &clause)?;
        }
    }

    writer.flush()
}

/// Serialize `formula` to a DIMACS CNF string. See [`write_cnf`] for the details.
pub fn serialize(formula: &Formula, rng: &mut impl Random) -> String {
    let mut buffer = Vec::new();
    write_cnf(formula, rng, &mut buffer).expect("writing to a vector does not fail");

    String::from_utf8(buffer).expect("DIMACS output is ASCII")
}

fn write_clause(writer: &mut impl Write, clause: &Clause) -> std::io::Result<()> {
    for literal in clause.literals() {
        write!(writer, "{literal} ")?;
    }

    writeln!(writer, "0")
}

fn normalise_clause(clause: &Clause, num_variables: usize, rng: &mut impl Random) -> Clause {
    let mut clause = clause.clone();

    // Padding literals must be representable as DIMACS codes, whatever the header declares.
    let max_variable = num_variables.min(i32::MAX as usize);

    while clause.len() < CLAUSE_LENGTH && max_variable > 0 {
        let variable = rng.generate_usize_in_range(1..max_variable + 1);
        let variable = u32::try_from(variable)
            .ok()
            .and_then(NonZeroU32::new)
            .expect("drawn from [1, i32::MAX]");
        clause.push(Literal::new(variable, rng.generate_bool(0.5)));
    }

    clause.truncate(CLAUSE_LENGTH);
    clause
}
