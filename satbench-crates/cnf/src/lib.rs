//! Everything needed to produce and check 3-CNF benchmark instances.
//!
//! The crate provides:
//!  - the formula data model ([`Literal`], [`Clause`], [`Formula`]),
//!  - generators for random 3-CNF formulas (see [`generate_unsatisfiable`] and
//!    [`generate_uniform`]), which draw their randomness from an injected [`Random`],
//!  - DIMACS support in the [`dimacs`] module: writing, validating and parsing CNF files.
//!
//! # Example
//! ```
//! # use rand::rngs::SmallRng;
//! # use rand::SeedableRng;
//! # use satbench_cnf::dimacs;
//! # use satbench_cnf::generate_unsatisfiable;
//! let mut rng = SmallRng::seed_from_u64(42);
//! let formula = generate_unsatisfiable(20, 90, &mut rng).expect("valid parameters");
//!
//! let source = dimacs::serialize(&formula, &mut rng);
//! let shape = dimacs::validate(&source).expect("generated formulas are well-formed");
//! assert_eq!(shape.num_clauses, 90);
//! ```

mod basic_types;
pub mod dimacs;
mod generator;

pub use basic_types::*;
pub use generator::*;
