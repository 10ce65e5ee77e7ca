use super::Literal;

/// A disjunction of literals.
///
/// Generated clauses always hold exactly three literals over three distinct variables. The
/// type does not enforce this so that formulas read from elsewhere can be represented as well.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: impl Into<Vec<Literal>>) -> Clause {
        Clause {
            literals: literals.into(),
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub(crate) fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.literals.truncate(len);
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause {
            literals: iter.into_iter().collect(),
        }
    }
}

/// A CNF formula over the variables `1..=num_variables`.
///
/// Once built, a formula is not modified; it is only written out or inspected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_variables: usize, clauses: Vec<Clause>) -> Formula {
        Formula {
            num_variables,
            clauses,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether every literal refers to a variable in `1..=num_variables`.
    pub fn literals_in_range(&self) -> bool {
        self.clauses
            .iter()
            .flat_map(Clause::literals)
            .all(|literal| literal.variable().get() as usize <= self.num_variables)
    }

    pub(crate) fn push_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }
}
