//! Objective functions scoring an assignment against a formula.

use crate::core::models::assignment::Assignment;
use crate::core::models::formula::Formula;

/// Scores how close an assignment is to satisfying a formula.
///
/// Implementations must be pure: identical inputs always yield identical
/// scores. Higher is better, and `1.0` means every clause is satisfied.
pub trait Objective {
    fn evaluate(&self, formula: &Formula, assignment: &Assignment) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&Formula, &Assignment) -> f64,
{
    fn evaluate(&self, formula: &Formula, assignment: &Assignment) -> f64 {
        self(formula, assignment)
    }
}

/// The fraction of clauses satisfied by `assignment`.
///
/// A formula with zero clauses scores `0.0`.
pub fn valence(formula: &Formula, assignment: &Assignment) -> f64 {
    if formula.is_empty() {
        return 0.0;
    }
    formula.count_satisfied(assignment) as f64 / formula.num_clauses() as f64
}

/// The default objective, backed by [`valence`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Valence;

impl Objective for Valence {
    #[inline]
    fn evaluate(&self, formula: &Formula, assignment: &Assignment) -> f64 {
        valence(formula, assignment)
    }
}
