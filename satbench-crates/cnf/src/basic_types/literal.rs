use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZeroI32;
use std::num::NonZeroU32;
use std::ops::Not;

/// A literal in DIMACS encoding: a variable index in `[1, N]` which is negated when the code is
/// negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Create the literal over `variable` with the given polarity.
    ///
    /// # Panics
    /// If `variable` does not fit in an `i32`.
    pub fn new(variable: NonZeroU32, is_positive: bool) -> Literal {
        let code = i32::try_from(variable.get()).expect("variable index fits in an i32");
        let code = if is_positive { code } else { -code };

        Literal(NonZeroI32::new(code).expect("code is derived from a non-zero variable"))
    }

    /// Interpret a DIMACS code. Returns [`None`] for `0`, which is the clause terminator and not
    /// a literal.
    pub fn from_dimacs(code: i32) -> Option<Literal> {
        NonZeroI32::new(code).map(Literal)
    }

    pub fn variable(self) -> NonZeroU32 {
        self.0.unsigned_abs()
    }

    pub fn is_positive(self) -> bool {
        self.0.get().is_positive()
    }

    /// The DIMACS code of this literal.
    pub fn code(self) -> i32 {
        self.0.get()
    }
}

impl From<NonZeroI32> for Literal {
    fn from(value: NonZeroI32) -> Self {
        Literal(value)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal(-self.0)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_is_encoded_in_the_sign() {
        let variable = NonZeroU32::new(7).unwrap();

        assert_eq!(7, Literal::new(variable, true).code());
        assert_eq!(-7, Literal::new(variable, false).code());
    }

    #[test]
    fn negation_keeps_the_variable() {
        let literal = Literal::from_dimacs(-3).unwrap();

        assert_eq!(3, (!literal).code());
        assert_eq!(literal.variable(), (!literal).variable());
        assert!(!literal.is_positive());
    }

    #[test]
    fn zero_is_not_a_literal() {
        assert_eq!(None, Literal::from_dimacs(0));
    }
}
