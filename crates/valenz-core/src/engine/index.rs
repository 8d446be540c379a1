use crate::core::models::formula::Formula;
use crate::engine::error::EngineError;

/// Largest variable count a search will allocate state for.
pub const MAX_VARIABLES: usize = 1 << 26;

/// Maps every variable to the clauses it occurs in.
///
/// Built once per formula. A variable that appears more than once in the same
/// clause contributes one entry per occurrence; rechecking such a clause twice
/// is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableIndex {
    occurrences: Vec<Vec<usize>>,
}

impl VariableIndex {
    /// Builds the index, sized to the formula's variable count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyFormula`] if the formula has no clauses or
    /// no literals at all, and [`EngineError::TooManyVariables`] if its
    /// variable count exceeds [`MAX_VARIABLES`] or the index cannot be
    /// allocated.
    pub fn build(formula: &Formula) -> Result<Self, EngineError> {
        if formula.is_empty() || formula.num_literals() == 0 {
            return Err(EngineError::EmptyFormula);
        }

        let num_vars = formula.num_vars();
        let too_many = EngineError::TooManyVariables {
            num_vars,
            limit: MAX_VARIABLES,
        };
        if num_vars > MAX_VARIABLES {
            return Err(too_many);
        }
        let mut occurrences = Vec::new();
        occurrences.try_reserve_exact(num_vars).map_err(|_| too_many)?;
        occurrences.resize_with(num_vars, Vec::new);
        for (clause_idx, clause) in formula.clauses().iter().enumerate() {
            for lit in clause.literals() {
                occurrences[lit.var].push(clause_idx);
            }
        }
        Ok(Self { occurrences })
    }

    #[inline]
    pub fn clauses_of(&self, var: usize) -> &[usize] {
        &self.occurrences[var]
    }

    pub fn num_vars(&self) -> usize {
        self.occurrences.len()
    }
}
