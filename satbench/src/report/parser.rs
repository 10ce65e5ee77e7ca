//! Extraction of the verdict and statistics from the free-form text a MiniSat-style solver prints.
//!
//! The statistics are matched by label, so the order of the lines and any surrounding decoration
//! (such as the boxes MiniSat draws around its problem statistics) do not matter.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::SolverStatistics;
use super::Verdict;

/// The verdict and statistics found in a solver's standard output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedOutput {
    pub result: Verdict,
    pub statistics: SolverStatistics,
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("statistic patterns are valid regular expressions")
}

static NUM_VARS: Lazy<Regex> = Lazy::new(|| pattern(r"Number of variables:\s+(\d+)"));
static NUM_CLAUSES: Lazy<Regex> = Lazy::new(|| pattern(r"Number of clauses:\s+(\d+)"));
static PARSE_TIME: Lazy<Regex> = Lazy::new(|| pattern(r"Parse time:\s+([\d.]+) s"));
static SIMPLIFICATION_TIME: Lazy<Regex> =
    Lazy::new(|| pattern(r"Simplification time:\s+([\d.]+) s"));
static CPU_TIME: Lazy<Regex> = Lazy::new(|| pattern(r"CPU time\s+:\s+([\d.]+) s"));
static CONFLICTS: Lazy<Regex> = Lazy::new(|| pattern(r"conflicts\s+:\s+(\d+)"));
static DECISIONS: Lazy<Regex> = Lazy::new(|| pattern(r"decisions\s+:\s+(\d+)"));
static PROPAGATIONS: Lazy<Regex> = Lazy::new(|| pattern(r"propagations\s+:\s+(\d+)"));
static CONFLICT_LITERALS: Lazy<Regex> = Lazy::new(|| pattern(r"conflict literals\s+:\s+(\d+)"));
static MEMORY_USED: Lazy<Regex> = Lazy::new(|| pattern(r"Memory used\s+:\s+([\d.]+) MB"));

/// Parse the standard output of a solver run.
///
/// Statistics whose line is missing, or whose value does not parse, are left as [`None`].
pub fn parse_solver_output(output: &str) -> ParsedOutput {
    let statistics = SolverStatistics {
        num_vars: capture(&NUM_VARS, output),
        num_clauses: capture(&NUM_CLAUSES, output),
        parse_time: capture(&PARSE_TIME, output),
        simplification_time: capture(&SIMPLIFICATION_TIME, output),
        cpu_time: capture(&CPU_TIME, output),
        conflicts: capture(&CONFLICTS, output),
        decisions: capture(&DECISIONS, output),
        propagations: capture(&PROPAGATIONS, output),
        conflict_literals: capture(&CONFLICT_LITERALS, output),
        memory_used_mb: capture(&MEMORY_USED, output),
    };

    ParsedOutput {
        result: verdict_from_markers(output),
        statistics,
    }
}

/// Determine the verdict from the `SATISFIABLE`/`UNSATISFIABLE` markers in `output`.
///
/// `SATISFIABLE` is a substring of `UNSATISFIABLE`, so the latter is checked first.
pub fn verdict_from_markers(output: &str) -> Verdict {
    if output.contains("UNSATISFIABLE") {
        Verdict::Unsat
    } else if output.contains("SATISFIABLE") {
        Verdict::Sat
    } else {
        Verdict::Unknown
    }
}

fn capture<T: FromStr>(regex: &Regex, output: &str) -> Option<T> {
    regex.captures(output)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINISAT_UNSAT_OUTPUT: &str = r#"
============================[ Problem Statistics ]=============================
|                                                                             |
|  Number of variables:            20                                         |
|  Number of clauses:              90                                         |
|  Parse time:                   0.00 s                                       |
|  Simplification time:          0.01 s                                       |
|                                                                             |
===============================================================================
Solved by simplification
restarts              : 1
conflicts             : 145            (14500 /sec)
decisions             : 212            (0.00 % random) (21200 /sec)
propagations          : 2391           (239100 /sec)
conflict literals     : 731            (27.41 % deleted)
Memory used           : 11.00 MB
CPU time              : 0.012 s

UNSATISFIABLE
"#;

    #[test]
    fn minisat_statistics_are_extracted() {
        let parsed = parse_solver_output(MINISAT_UNSAT_OUTPUT);

        assert_eq!(Verdict::Unsat, parsed.result);
        assert_eq!(
            SolverStatistics {
                num_vars: Some(20),
                num_clauses: Some(90),
                parse_time: Some(0.0),
                simplification_time: Some(0.01),
                cpu_time: Some(0.012),
                conflicts: Some(145),
                decisions: Some(212),
                propagations: Some(2391),
                conflict_literals: Some(731),
                memory_used_mb: Some(11.0),
            },
            parsed.statistics
        );
    }

    #[test]
    fn minimal_sample_is_parsed() {
        let output = "Number of variables: 20\nNumber of clauses: 90\nconflicts : 145\nUNSATISFIABLE\n";

        let parsed = parse_solver_output(output);

        assert_eq!(Verdict::Unsat, parsed.result);
        assert_eq!(Some(20), parsed.statistics.num_vars);
        assert_eq!(Some(90), parsed.statistics.num_clauses);
        assert_eq!(Some(145), parsed.statistics.conflicts);
    }

    #[test]
    fn unsatisfiable_marker_takes_precedence() {
        assert_eq!(
            Verdict::Unsat,
            verdict_from_markers("SATISFIABLE? no: UNSATISFIABLE")
        );
        assert_eq!(Verdict::Sat, verdict_from_markers("SATISFIABLE\n"));
        assert_eq!(Verdict::Unknown, verdict_from_markers("INDETERMINATE\n"));
    }

    #[test]
    fn missing_statistics_are_absent_rather_than_zero() {
        let parsed = parse_solver_output("conflicts : 0\nSATISFIABLE\n");

        assert_eq!(Some(0), parsed.statistics.conflicts);
        assert_eq!(None, parsed.statistics.decisions);
        assert_eq!(None, parsed.statistics.cpu_time);
        assert_eq!(None, parsed.statistics.memory_used_mb);
    }

    #[test]
    fn conflict_literals_are_not_mistaken_for_conflicts() {
        let parsed = parse_solver_output("conflict literals     : 12\n");

        assert_eq!(None, parsed.statistics.conflicts);
        assert_eq!(Some(12), parsed.statistics.conflict_literals);
    }

    #[test]
    fn malformed_values_are_absent() {
        let parsed = parse_solver_output("CPU time : 1.2.3 s\n");

        assert_eq!(None, parsed.statistics.cpu_time);
    }
}
