//! Mutation operators ("drifts") that move the search through assignment space.
//!
//! Every drift mutates the assignment in place and returns the variables it
//! flipped. The search loop relies on that list being exact: it is the only
//! input to the incremental unsatisfied-clause update.

use crate::core::models::assignment::Assignment;
use crate::core::models::formula::Formula;
use crate::engine::unsat::UnsatisfiedSet;
use rand::RngCore;
use rand::seq::{SliceRandom, index};

/// Fraction of the variables semantic drift flips at valence zero.
pub const SEMANTIC_DRIFT_RATE: f64 = 0.1;

pub trait Drift {
    /// Mutates `assignment` and returns the indices of the flipped variables,
    /// each listed once.
    fn apply(
        &self,
        assignment: &mut Assignment,
        formula: &Formula,
        valence: f64,
        unsatisfied: &UnsatisfiedSet,
        rng: &mut dyn RngCore,
    ) -> Vec<usize>;
}

/// Targeted repair: flips one variable of one unsatisfied clause.
///
/// Both the clause and the literal within it are drawn uniformly. With no
/// unsatisfied clause, or an empty one, nothing is flipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDrift;

impl Drift for LocalDrift {
    fn apply(
        &self,
        assignment: &mut Assignment,
        formula: &Formula,
        _valence: f64,
        unsatisfied: &UnsatisfiedSet,
        rng: &mut dyn RngCore,
    ) -> Vec<usize> {
        let Some(clause_idx) = unsatisfied.choose(rng) else {
            return Vec::new();
        };
        let Some(lit) = formula.clause(clause_idx).literals().choose(rng) else {
            return Vec::new();
        };
        assignment.flip(lit.var);
        vec![lit.var]
    }
}

/// Global diversification: flips a valence-scaled number of random variables.
///
/// Flips `k = max(1, floor(n * (1 - valence) * 0.1))` distinct variables drawn
/// uniformly from the whole assignment, so the step shrinks as the search
/// closes in on a solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticDrift;

impl SemanticDrift {
    pub fn flip_count(num_vars: usize, valence: f64) -> usize {
        let scaled = (num_vars as f64 * (1.0 - valence) * SEMANTIC_DRIFT_RATE) as usize;
        scaled.max(1).min(num_vars)
    }
}

impl Drift for SemanticDrift {
    fn apply(
        &self,
        assignment: &mut Assignment,
        _formula: &Formula,
        valence: f64,
        _unsatisfied: &UnsatisfiedSet,
        rng: &mut dyn RngCore,
    ) -> Vec<usize> {
        let num_vars = assignment.len();
        if num_vars == 0 {
            return Vec::new();
        }
        let k = Self::flip_count(num_vars, valence);
        let flipped = index::sample(rng, num_vars, k).into_vec();
        for &var in &flipped {
            assignment.flip(var);
        }
        flipped
    }
}
