//! Writes the collected reports as a CSV table, one row per benchmarked instance.

use std::io::Write;

use serde::Serialize;

use crate::report::SolverReport;
use crate::report::Verdict;

/// A row of the results table. The field order is the column order.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    formula_file: &'a str,
    num_vars: Option<u64>,
    num_clauses: Option<u64>,
    parse_time: Option<f64>,
    simplification_time: Option<f64>,
    conflicts: Option<u64>,
    decisions: Option<u64>,
    propagations: Option<u64>,
    conflict_literals: Option<u64>,
    memory_used_mb: Option<f64>,
    cpu_time: Option<f64>,
    result: Verdict,
}

impl<'a> From<&'a SolverReport> for ResultRow<'a> {
    fn from(report: &'a SolverReport) -> Self {
        let statistics = &report.statistics;

        ResultRow {
            formula_file: &report.formula_file,
            num_vars: statistics.num_vars,
            num_clauses: statistics.num_clauses,
            parse_time: statistics.parse_time,
            simplification_time: statistics.simplification_time,
            conflicts: statistics.conflicts,
            decisions: statistics.decisions,
            propagations: statistics.propagations,
            conflict_literals: statistics.conflict_literals,
            memory_used_mb: statistics.memory_used_mb,
            cpu_time: statistics.cpu_time,
            result: report.result,
        }
    }
}

/// The header row of the table written by [`write_results`].
pub const RESULT_COLUMNS: [&str; 12] = [
    "formula_file",
    "num_vars",
    "num_clauses",
    "parse_time",
    "simplification_time",
    "conflicts",
    "decisions",
    "propagations",
    "conflict_literals",
    "memory_used_mb",
    "cpu_time",
    "result",
];

/// Write `reports` as CSV to `writer`. Statistics which were not reported are left empty.
pub fn write_results<'a>(
    reports: impl IntoIterator<Item = &'a SolverReport>,
    writer: impl Write,
) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so that an empty table still has its header.
    csv_writer.write_record(RESULT_COLUMNS)?;

    for report in reports {
        csv_writer.serialize(ResultRow::from(report))?;
    }

    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SolverStatistics;

    #[test]
    fn reports_are_written_with_empty_cells_for_absent_statistics() {
        let reports = [
            SolverReport {
                formula_file: "unsat_formula_1.cnf".to_owned(),
                result: Verdict::Unsat,
                statistics: SolverStatistics {
                    num_vars: Some(20),
                    num_clauses: Some(90),
                    conflicts: Some(0),
                    cpu_time: Some(0.5),
                    ..Default::default()
                },
            },
            SolverReport {
                formula_file: "sat.cnf".to_owned(),
                result: Verdict::Sat,
                statistics: SolverStatistics::default(),
            },
        ];

        let mut buffer = Vec::new();
        write_results(&reports, &mut buffer).expect("writing to memory");

        let expected = "\
formula_file,num_vars,num_clauses,parse_time,simplification_time,conflicts,decisions,propagations,conflict_literals,memory_used_mb,cpu_time,result
unsat_formula_1.cnf,20,90,,,0,,,,,0.5,UNSAT
sat.cnf,,,,,,,,,,,SAT
";
        assert_eq!(expected, String::from_utf8(buffer).expect("utf8"));
    }

    #[test]
    fn empty_table_has_a_header() {
        let mut buffer = Vec::new();
        write_results(&[], &mut buffer).expect("writing to memory");

        assert_eq!(
            format!("{}\n", RESULT_COLUMNS.join(",")),
            String::from_utf8(buffer).expect("utf8")
        );
    }
}
