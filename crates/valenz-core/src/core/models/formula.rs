use super::assignment::Assignment;
use super::literal::Literal;
use serde::{Deserialize, Serialize};

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
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

    /// A clause is satisfied if at least one of its literals is.
    #[inline]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|lit| lit.is_satisfied_by(assignment))
    }

    pub fn max_var(&self) -> Option<usize> {
        self.literals.iter().map(|lit| lit.var).max()
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A formula in conjunctive normal form.
///
/// The variable count is derived from the clauses: one more than the largest
/// variable index that occurs anywhere. A formula without literals therefore
/// has zero variables. Serialized as its clause list; the count is
/// recomputed on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Clause>", into = "Vec<Clause>")]
pub struct Formula {
    clauses: Vec<Clause>,
    num_vars: usize,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        let num_vars = clauses
            .iter()
            .filter_map(Clause::max_var)
            .max()
            .map_or(0, |max| max + 1);
        Self { clauses, num_vars }
    }

    /// Builds a formula from raw `(variable, polarity)` pairs.
    pub fn from_pairs<C, L>(clauses: C) -> Self
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = (usize, bool)>,
    {
        Self::new(
            clauses
                .into_iter()
                .map(|clause| clause.into_iter().map(Literal::from).collect())
                .collect(),
        )
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline]
    pub fn clause(&self, idx: usize) -> &Clause {
        &self.clauses[idx]
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Indices of every clause `assignment` leaves unsatisfied, in clause order.
    pub fn unsatisfied_clauses(&self, assignment: &Assignment) -> Vec<usize> {
        self.clauses
            .iter()
            .enumerate()
            .filter_map(|(idx, clause)| (!clause.is_satisfied_by(assignment)).then_some(idx))
            .collect()
    }

    pub fn count_satisfied(&self, assignment: &Assignment) -> usize {
        self.clauses
            .iter()
            .filter(|clause| clause.is_satisfied_by(assignment))
            .count()
    }
}

impl From<Vec<Clause>> for Formula {
    fn from(clauses: Vec<Clause>) -> Self {
        Self::new(clauses)
    }
}

impl From<Formula> for Vec<Clause> {
    fn from(formula: Formula) -> Self {
        formula.clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_formula() -> Formula {
        Formula::from_pairs([vec![(0, true), (1, true)], vec![(0, false), (1, false)]])
    }

    #[test]
    fn num_vars_is_one_past_the_largest_index() {
        let formula = Formula::from_pairs([vec![(4, true)], vec![(1, false), (2, true)]]);
        assert_eq!(formula.num_vars(), 5);
        assert_eq!(formula.num_clauses(), 2);
        assert_eq!(formula.num_literals(), 3);
    }

    #[test]
    fn formula_without_literals_has_no_variables() {
        let formula = Formula::new(vec![Clause::default()]);
        assert_eq!(formula.num_vars(), 0);
        assert_eq!(formula.num_literals(), 0);
        assert!(Formula::default().is_empty());
    }

    #[test]
    fn unsatisfied_clauses_are_reported_in_order() {
        let formula = xor_formula();
        let all_true = Assignment::from(vec![true, true]);
        let mixed = Assignment::from(vec![true, false]);

        assert_eq!(formula.unsatisfied_clauses(&all_true), vec![1]);
        assert!(formula.unsatisfied_clauses(&mixed).is_empty());
        assert_eq!(formula.count_satisfied(&mixed), 2);
    }

    #[test]
    fn deserialization_recomputes_the_variable_count() {
        let json = r#"[[{"var": 4, "polarity": true}], [{"var": 1, "polarity": false}]]"#;
        let formula: Formula = serde_json::from_str(json).unwrap();
        assert_eq!(formula.num_vars(), 5);

        let stale = r#"{"clauses": [[{"var": 9, "polarity": true}]], "num_vars": 1}"#;
        assert!(serde_json::from_str::<Formula>(stale).is_err());

        let text = serde_json::to_string(&xor_formula()).unwrap();
        assert_eq!(serde_json::from_str::<Formula>(&text).unwrap(), xor_formula());
    }
}
