use std::path::Path;

use thiserror::Error;

/// The problem shape declared by the header of a DIMACS CNF file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclaredShape {
    pub num_variables: usize,
    pub num_clauses: usize,
}

/// The reasons for which [`validate`] rejects a file.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("the file is empty")]
    Empty,

    #[error("missing 'p cnf' header, found '{0}'")]
    MissingHeader(String),

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("clause count mismatch: expected {expected}, found {found}")]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Check whether `source` is structurally a DIMACS CNF file, and return the shape declared by its
/// header.
///
/// The check is deliberately shallow. It rejects the source if
///  - it is empty,
///  - the first line which is neither a comment nor blank does not start with `p cnf`,
///  - the header does not consist of exactly four whitespace-separated tokens of which the last
///    two are counts,
///  - the number of non-comment, non-blank lines after the header differs from the declared
///    clause count.
///
/// Comment lines are lines starting with `c`. Literal ranges and clause lengths are not
/// inspected; use [`parse_cnf`](super::parse_cnf) for a complete check.
pub fn validate(source: &str) -> Result<DeclaredShape, ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut lines = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('c'));

    let header = lines.next().ok_or(ValidationError::Empty)?;
    let shape = parse_header(header)?;

    let found = lines.count();
    if found != shape.num_clauses {
        return Err(ValidationError::ClauseCountMismatch {
            expected: shape.num_clauses,
            found,
        });
    }

    Ok(shape)
}

/// Read the file at `path` and [`validate`] its contents. A file which cannot be read is
/// rejected with [`ValidationError::Io`].
pub fn validate_file(path: impl AsRef<Path>) -> Result<DeclaredShape, ValidationError> {
    let source = std::fs::read_to_string(path)?;
    validate(&source)
}

fn parse_header(header: &str) -> Result<DeclaredShape, ValidationError> {
    if !header.starts_with("p cnf") {
        return Err(ValidationError::MissingHeader(header.to_owned()));
    }

    let invalid_header = || ValidationError::InvalidHeader(header.to_owned());

    let tokens = header.split_whitespace().collect::<Vec<_>>();
    let [_, _, num_variables, num_clauses] = tokens.as_slice() else {
        return Err(invalid_header());
    };

    Ok(DeclaredShape {
        num_variables: num_variables.parse().map_err(|_| invalid_header())?,
        num_clauses: num_clauses.parse().map_err(|_| invalid_header())?,
    })
}
