use super::assignment::Assignment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single occurrence of a variable inside a clause.
///
/// Variables are zero-based. `polarity == true` denotes a positive occurrence,
/// `false` a negated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub var: usize,
    pub polarity: bool,
}

impl Literal {
    pub fn new(var: usize, polarity: bool) -> Self {
        Self { var, polarity }
    }

    pub fn positive(var: usize) -> Self {
        Self::new(var, true)
    }

    pub fn negative(var: usize) -> Self {
        Self::new(var, false)
    }

    /// Converts a signed DIMACS literal (one-based, sign = polarity).
    ///
    /// Returns `None` for the clause terminator `0`.
    pub fn from_dimacs(lit: i64) -> Option<Self> {
        if lit == 0 {
            return None;
        }
        let var = (lit.unsigned_abs() - 1) as usize;
        Some(Self::new(var, lit > 0))
    }

    pub fn to_dimacs(self) -> i64 {
        let magnitude = self.var as i64 + 1;
        if self.polarity { magnitude } else { -magnitude }
    }

    pub fn negated(self) -> Self {
        Self::new(self.var, !self.polarity)
    }

    #[inline]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        assignment.value(self.var) == self.polarity
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl From<(usize, bool)> for Literal {
    fn from((var, polarity): (usize, bool)) -> Self {
        Self::new(var, polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_conversion_is_one_based_and_signed() {
        assert_eq!(Literal::from_dimacs(1), Some(Literal::positive(0)));
        assert_eq!(Literal::from_dimacs(-7), Some(Literal::negative(6)));
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(Literal::negative(6).to_dimacs(), -7);
    }

    #[test]
    fn satisfaction_follows_polarity() {
        let assignment = Assignment::from(vec![true, false]);
        assert!(Literal::positive(0).is_satisfied_by(&assignment));
        assert!(!Literal::negative(0).is_satisfied_by(&assignment));
        assert!(Literal::negative(1).is_satisfied_by(&assignment));
        assert_eq!(Literal::positive(1).negated(), Literal::negative(1));
    }
}
