mod formula;
mod literal;
mod random;

pub use formula::*;
pub use literal::*;
pub use random::*;
