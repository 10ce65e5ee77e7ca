/// The meaning a solver attaches to its exit codes.
///
/// An exit code of `0` always means the solver finished normally. The defaults follow the
/// convention used for MiniSat-style solvers in this harness: `20` is a regular UNSAT answer and
/// `10` means the solver rejected its input.
///
/// Some solvers, MiniSat among them, also signal SAT through their exit code. Setting `sat` to
/// that code makes it a normal finish whose verdict is read from the output. It takes precedence
/// over `input_error`, since MiniSat uses `10` for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitCodeConvention {
    pub unsat: i32,
    pub input_error: i32,
    pub sat: Option<i32>,
}

impl Default for ExitCodeConvention {
    fn default() -> Self {
        ExitCodeConvention {
            unsat: 20,
            input_error: 10,
            sat: None,
        }
    }
}

/// How a solver run ended, according to an [`ExitCodeConvention`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKind {
    /// The solver finished normally; the verdict is in its output.
    Finished,
    /// The solver finished normally and answered UNSAT.
    Unsat,
    /// The solver could not parse its input.
    InputError,
    /// Any other exit code, or termination by a signal ([`None`]).
    Abnormal(Option<i32>),
}

impl ExitCodeConvention {
    pub fn classify(&self, exit_code: Option<i32>) -> ExitKind {
        match exit_code {
            Some(0) => ExitKind::Finished,
            Some(code) if code == self.unsat => ExitKind::Unsat,
            Some(code) if self.sat == Some(code) => ExitKind::Finished,
            Some(code) if code == self.input_error => ExitKind::InputError,
            code => ExitKind::Abnormal(code),
        }
    }
}
