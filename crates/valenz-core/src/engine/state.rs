use crate::core::models::assignment::Assignment;
use crate::core::models::formula::Formula;
use crate::engine::index::VariableIndex;
use crate::engine::memory::SearchMemory;
use crate::engine::unsat::UnsatisfiedSet;
use serde::Serialize;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Every clause was satisfied; the live assignment is returned.
    Satisfied,
    /// The iteration budget ran out; the best assignment seen is returned.
    BudgetExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub termination: Termination,
    /// `1.0` when satisfied, otherwise the best valence seen.
    pub valence: f64,
    pub assignment: Assignment,
    /// Iterations performed before termination.
    pub steps: u64,
    /// Initial best valence, one entry per iteration, and a final entry.
    pub trace: Option<Vec<f64>>,
    pub memory: SearchMemory,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        self.termination == Termination::Satisfied
    }
}

/// Everything a running search owns.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub(crate) assignment: Assignment,
    pub(crate) unsatisfied: UnsatisfiedSet,
    pub(crate) best_assignment: Assignment,
    pub(crate) best_valence: f64,
    pub(crate) iteration: u64,
    pub(crate) trace: Option<Vec<f64>>,
    pub(crate) memory: SearchMemory,
}

impl SearchState {
    pub(crate) fn new(
        formula: &Formula,
        assignment: Assignment,
        initial_valence: f64,
        record_trace: bool,
    ) -> Self {
        let unsatisfied = UnsatisfiedSet::from_assignment(formula, &assignment);
        Self {
            best_assignment: assignment.clone(),
            best_valence: initial_valence,
            assignment,
            unsatisfied,
            iteration: 0,
            trace: record_trace.then(|| vec![initial_valence]),
            memory: SearchMemory::default(),
        }
    }

    /// Records the valence of the current assignment.
    ///
    /// Only a strict improvement replaces the best record; the trace gets the
    /// best-so-far value either way.
    pub(crate) fn record_valence(&mut self, valence: f64) -> bool {
        let improved = valence > self.best_valence;
        if improved {
            self.best_valence = valence;
            self.best_assignment.clone_from(&self.assignment);
        }
        if let Some(trace) = &mut self.trace {
            trace.push(self.best_valence);
        }
        improved
    }

    /// Re-evaluates every clause touched by the flipped variables.
    pub(crate) fn apply_flips(&mut self, formula: &Formula, index: &VariableIndex, flipped: &[usize]) {
        for &var in flipped {
            for &clause_idx in index.clauses_of(var) {
                self.unsatisfied.refresh(formula, &self.assignment, clause_idx);
            }
        }
    }

    pub(crate) fn into_satisfied(mut self, steps: u64) -> SolveResult {
        if let Some(trace) = &mut self.trace {
            trace.push(1.0);
        }
        SolveResult {
            termination: Termination::Satisfied,
            valence: 1.0,
            assignment: self.assignment,
            steps,
            trace: self.trace,
            memory: self.memory,
        }
    }

    pub(crate) fn into_exhausted(mut self, steps: u64) -> SolveResult {
        if let Some(trace) = &mut self.trace {
            trace.push(self.best_valence);
        }
        SolveResult {
            termination: Termination::BudgetExhausted,
            valence: self.best_valence,
            assignment: self.best_assignment,
            steps,
            trace: self.trace,
            memory: self.memory,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn unsatisfied(&self) -> &UnsatisfiedSet {
        &self.unsatisfied
    }

    pub fn best_assignment(&self) -> &Assignment {
        &self.best_assignment
    }

    pub fn best_valence(&self) -> f64 {
        self.best_valence
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn trace(&self) -> Option<&[f64]> {
        self.trace.as_deref()
    }

    pub fn memory(&self) -> &SearchMemory {
        &self.memory
    }
}
