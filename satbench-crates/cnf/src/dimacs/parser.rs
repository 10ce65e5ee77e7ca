//! A strict reader for DIMACS CNF files.
//!
//! Benchmark files can be large, so the source is consumed in chunks by a small state machine
//! which does not need the whole file in memory. A chunk boundary may fall anywhere, including in
//! the middle of the header or of a literal.
//!
//! Unlike [`validate`](super::validate), the reader checks every literal: each must be a
//! non-zero integer whose magnitude does not exceed the declared number of variables, every
//! clause must be terminated by a `0`, and the number of clauses must match the header.
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use thiserror::Error;

use crate::Clause;
use crate::Formula;
use crate::Literal;

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("no 'p cnf' header precedes the clauses")]
    MissingHeader,

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("found more than one 'p cnf' header")]
    DuplicateHeader,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("literal {literal} refers to a variable outside of [1, {num_variables}]")]
    LiteralOutOfRange { literal: i64, num_variables: usize },

    #[error("the last clause is not terminated with a '0'")]
    UnterminatedClause,

    #[error("the header declares {expected} clauses, but the body has {parsed}")]
    IncorrectClauseCount { expected: usize, parsed: usize },
}

/// Read a DIMACS CNF source into a [`Formula`].
pub fn parse_cnf(source: impl Read) -> Result<Formula, DimacsParseError> {
    let mut reader = BufReader::new(source);
    let mut cnf_reader = CnfReader::default();

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return cnf_reader.finish();
        }

        for &byte in chunk {
            cnf_reader.consume(byte)?;
        }

        let num_bytes = chunk.len();
        reader.consume(num_bytes);
    }
}

#[derive(Clone, Copy, Debug)]
struct CnfHeader {
    num_variables: usize,
    num_clauses: usize,
}

#[derive(Debug, Default)]
struct CnfReader {
    header: Option<CnfHeader>,
    header_line: String,
    clauses: Vec<Clause>,
    /// The literals of the clause which has not seen its `0` yet.
    open_clause: Vec<Literal>,
    state: ReadState,
}

#[derive(Clone, Copy, Debug, Default)]
enum ReadState {
    /// Only whitespace has been seen on the current line.
    #[default]
    LineStart,
    Header,
    Comment,
    /// The digits of a literal are being read. The magnitude is zero until the first digit.
    Literal { negative: bool, magnitude: u64 },
    /// Between two tokens of a clause line.
    InClause,
}

impl CnfReader {
    fn consume(&mut self, byte: u8) -> Result<(), DimacsParseError> {
        match self.state {
            ReadState::LineStart => match byte {
                b'p' => {
                    self.header_line.clear();
                    self.header_line.push('p');
                    self.state = ReadState::Header;
                }
                b'c' => self.state = ReadState::Comment,
                byte => self.clause_token(byte)?,
            },

            ReadState::Header => {
                if byte == b'\n' {
                    self.read_header()?;
                    self.state = ReadState::LineStart;
                } else {
                    self.header_line.push(byte as char);
                }
            }

            ReadState::Comment => {
                if byte == b'\n' {
                    self.state = ReadState::LineStart;
                }
            }

            ReadState::Literal {
                negative,
                magnitude,
            } => match byte {
                // "-0" is not a literal.
                b'0' if negative && magnitude == 0 => {
                    return Err(DimacsParseError::UnexpectedCharacter('0'))
                }
                digit @ b'0'..=b'9' => {
                    self.state = ReadState::Literal {
                        negative,
                        magnitude: magnitude
                            .saturating_mul(10)
                            .saturating_add(u64::from(digit - b'0')),
                    };
                }
                whitespace if whitespace.is_ascii_whitespace() && magnitude > 0 => {
                    self.push_literal(negative, magnitude)?;
                    self.state = if whitespace == b'\n' {
                        ReadState::LineStart
                    } else {
                        ReadState::InClause
                    };
                }
                other => return Err(DimacsParseError::UnexpectedCharacter(other as char)),
            },

            // Clauses may span several lines; only the '0' closes them.
            ReadState::InClause => self.clause_token(byte)?,
        }

        Ok(())
    }

    /// Handle a byte which is not part of a header, a comment or a literal.
    fn clause_token(&mut self, byte: u8) -> Result<(), DimacsParseError> {
        match byte {
            b'\n' => self.state = ReadState::LineStart,
            whitespace if whitespace.is_ascii_whitespace() => {}
            b'0' => self.close_clause()?,
            b'-' => {
                self.state = ReadState::Literal {
                    negative: true,
                    magnitude: 0,
                }
            }
            digit @ b'1'..=b'9' => {
                self.state = ReadState::Literal {
                    negative: false,
                    magnitude: u64::from(digit - b'0'),
                }
            }
            other => return Err(DimacsParseError::UnexpectedCharacter(other as char)),
        }

        Ok(())
    }

    fn read_header(&mut self) -> Result<(), DimacsParseError> {
        if self.header.is_some() {
            return Err(DimacsParseError::DuplicateHeader);
        }

        let line = self.header_line.trim();
        let invalid_header = || DimacsParseError::InvalidHeader(line.to_owned());

        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let ["p", "cnf", num_variables, num_clauses] = tokens.as_slice() else {
            return Err(invalid_header());
        };

        let header = CnfHeader {
            num_variables: num_variables.parse().map_err(|_| invalid_header())?,
            num_clauses: num_clauses.parse().map_err(|_| invalid_header())?,
        };

        self.clauses.reserve(header.num_clauses);
        self.header = Some(header);

        Ok(())
    }

    fn push_literal(&mut self, negative: bool, magnitude: u64) -> Result<(), DimacsParseError> {
        let num_variables = self
            .header
            .ok_or(DimacsParseError::MissingHeader)?
            .num_variables;

        let signed = i64::try_from(magnitude).unwrap_or(i64::MAX);
        let signed = if negative { -signed } else { signed };

        let literal = i32::try_from(signed)
            .ok()
            .filter(|_| magnitude <= num_variables as u64)
            .and_then(Literal::from_dimacs)
            .ok_or(DimacsParseError::LiteralOutOfRange {
                literal: signed,
                num_variables,
            })?;

        self.open_clause.push(literal);

        Ok(())
    }

    fn close_clause(&mut self) -> Result<(), DimacsParseError> {
        if self.header.is_none() {
            return Err(DimacsParseError::MissingHeader);
        }

        let literals = std::mem::take(&mut self.open_clause);
        self.clauses.push(Clause::new(literals));
        self.state = ReadState::LineStart;

        Ok(())
    }

    fn finish(mut self) -> Result<Formula, DimacsParseError> {
        // The source does not have to end with a new-line.
        match self.state {
            ReadState::Header => self.read_header()?,
            ReadState::Literal {
                negative,
                magnitude,
            } if magnitude > 0 => self.push_literal(negative, magnitude)?,
            ReadState::Literal { .. } => return Err(DimacsParseError::UnterminatedClause),
            ReadState::LineStart | ReadState::Comment | ReadState::InClause => {}
        }

        let header = self.header.ok_or(DimacsParseError::MissingHeader)?;

        if !self.open_clause.is_empty() {
            return Err(DimacsParseError::UnterminatedClause);
        }

        if header.num_clauses != self.clauses.len() {
            return Err(DimacsParseError::IncorrectClauseCount {
                expected: header.num_clauses,
                parsed: self.clauses.len(),
            });
        }

        Ok(Formula::new(header.num_variables, self.clauses))
    }
}
