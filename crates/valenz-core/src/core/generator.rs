//! Random 3-SAT instances with a planted solution.

use crate::core::models::assignment::Assignment;
use crate::core::models::formula::{Clause, Formula};
use crate::core::models::literal::Literal;
use rand::Rng;
use rand::seq::index;
use thiserror::Error;
use tracing::{debug, instrument};

/// Clause-to-variable ratio near the 3-SAT phase transition.
pub const DEFAULT_CLAUSE_RATIO: f64 = 4.3;

const CLAUSE_WIDTH: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("A 3-SAT instance needs at least 3 variables, got {0}")]
    TooFewVariables(usize),
}

#[derive(Debug, Clone)]
pub struct PlantedInstance {
    pub formula: Formula,
    /// The hidden assignment every clause was built to agree with.
    pub hidden: Assignment,
}

/// Number of clauses for `num_vars` variables at the given ratio.
pub fn clause_count_for(num_vars: usize, ratio: f64) -> usize {
    (ratio * num_vars as f64) as usize
}

/// Generates a satisfiable random 3-SAT instance.
///
/// Each clause draws three distinct variables with random polarities. If the
/// hidden assignment falsifies the clause, the polarity of its first literal
/// is inverted, so the hidden assignment satisfies the whole formula.
#[instrument(level = "debug", skip(rng))]
pub fn planted_3sat<R: Rng + ?Sized>(
    num_vars: usize,
    num_clauses: Option<usize>,
    rng: &mut R,
) -> Result<PlantedInstance, GeneratorError> {
    if num_vars < CLAUSE_WIDTH {
        return Err(GeneratorError::TooFewVariables(num_vars));
    }
    let num_clauses = num_clauses.unwrap_or_else(|| clause_count_for(num_vars, DEFAULT_CLAUSE_RATIO));

    let hidden = Assignment::random(num_vars, rng);
    let mut clauses = Vec::with_capacity(num_clauses);
    for _ in 0..num_clauses {
        let mut literals: Vec<Literal> = index::sample(rng, num_vars, CLAUSE_WIDTH)
            .into_iter()
            .map(|var| Literal::new(var, rng.r#gen::<bool>()))
            .collect();
        if !literals.iter().any(|lit| lit.is_satisfied_by(&hidden)) {
            literals[0] = literals[0].negated();
        }
        clauses.push(Clause::new(literals));
    }

    debug!(num_vars, num_clauses, "Generated planted 3-SAT instance.");
    Ok(PlantedInstance {
        formula: Formula::new(clauses),
        hidden,
    })
}
