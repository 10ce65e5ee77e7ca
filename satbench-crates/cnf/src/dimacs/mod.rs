//! Support for the DIMACS CNF file format.
//!
//! A DIMACS CNF file consists of optional comment lines starting with `c`, a single header line
//! `p cnf <num_vars> <num_clauses>`, and one line per clause listing its literals followed by a
//! terminating `0`.
//!
//! This module provides three entry points:
//!  - [`serialize`] and [`write_cnf`] write a [`Formula`](crate::Formula),
//!  - [`validate`] and [`validate_file`] perform the cheap structural check which gates an
//!    instance before it is handed to a solver,
//!  - [`parse_cnf`] reads a file back into a formula, and is strict about the contents.

mod parser;
mod validator;
mod writer;

pub use parser::*;
pub use validator::*;
pub use writer::*;
