use crate::core::models::assignment::Assignment;
use crate::core::models::formula::Formula;
use crate::core::objective::{Objective, Valence};
use crate::engine::config::SearchConfig;
use crate::engine::drift::{Drift, LocalDrift, SemanticDrift};
use crate::engine::error::EngineError;
use crate::engine::index::VariableIndex;
use crate::engine::memory::{MemoryHook, NoopMemory};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{SearchState, SolveResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

const PROGRESS_STRIDE: u64 = 1024;

/// Which operator a single iteration applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Local,
    Global,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// No clause is unsatisfied; the state was left untouched.
    Satisfied,
    /// One mutation was applied.
    Mutated { kind: Move, flipped: Vec<usize> },
}

/// The valence-drift local search.
///
/// Owns the formula's variable index, the injected objective, global drift
/// and memory hook, and its own seeded random generator. Local drift is always
/// the targeted branch; `drift` fills the global branch.
pub struct Solver<'f, O = Valence, D = SemanticDrift, M = NoopMemory> {
    formula: &'f Formula,
    index: VariableIndex,
    config: SearchConfig,
    objective: O,
    drift: D,
    memory_hook: M,
    rng: StdRng,
}

impl<'f> Solver<'f> {
    /// Creates a solver with the default valence objective, semantic drift and
    /// no-op memory hook.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyFormula`] for a formula without clauses or
    /// literals, and [`EngineError::Config`] for an invalid configuration.
    pub fn new(formula: &'f Formula, config: SearchConfig) -> Result<Self, EngineError> {
        let index = VariableIndex::build(formula)?;
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            num_vars = index.num_vars(),
            num_clauses = formula.num_clauses(),
            seed = ?config.seed,
            "Solver constructed."
        );
        Ok(Self {
            formula,
            index,
            config,
            objective: Valence,
            drift: SemanticDrift,
            memory_hook: NoopMemory,
            rng,
        })
    }
}

impl<'f, O, D, M> Solver<'f, O, D, M>
where
    O: Objective,
    D: Drift,
    M: MemoryHook,
{
    pub fn with_objective<O2: Objective>(self, objective: O2) -> Solver<'f, O2, D, M> {
        Solver {
            formula: self.formula,
            index: self.index,
            config: self.config,
            objective,
            drift: self.drift,
            memory_hook: self.memory_hook,
            rng: self.rng,
        }
    }

    pub fn with_drift<D2: Drift>(self, drift: D2) -> Solver<'f, O, D2, M> {
        Solver {
            formula: self.formula,
            index: self.index,
            config: self.config,
            objective: self.objective,
            drift,
            memory_hook: self.memory_hook,
            rng: self.rng,
        }
    }

    pub fn with_memory_hook<M2: MemoryHook>(self, memory_hook: M2) -> Solver<'f, O, D, M2> {
        Solver {
            formula: self.formula,
            index: self.index,
            config: self.config,
            objective: self.objective,
            drift: self.drift,
            memory_hook,
            rng: self.rng,
        }
    }

    pub fn formula(&self) -> &Formula {
        self.formula
    }

    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Draws a uniform random assignment and evaluates it from scratch.
    pub fn initialize(&mut self) -> SearchState {
        let assignment = Assignment::random(self.index.num_vars(), &mut self.rng);
        let initial_valence = self.objective.evaluate(self.formula, &assignment);
        SearchState::new(self.formula, assignment, initial_valence, self.config.record_trace)
    }

    /// Performs one iteration of the search.
    pub fn step(&mut self, state: &mut SearchState) -> StepOutcome {
        if state.unsatisfied.is_empty() {
            return StepOutcome::Satisfied;
        }

        let valence = self.objective.evaluate(self.formula, &state.assignment);
        if state.record_valence(valence) {
            trace!(iteration = state.iteration, valence, "New best valence.");
        }

        let kind = if self.rng.r#gen::<f64>() < self.config.p_local {
            Move::Local
        } else {
            Move::Global
        };
        let flipped = match kind {
            Move::Local => LocalDrift.apply(
                &mut state.assignment,
                self.formula,
                valence,
                &state.unsatisfied,
                &mut self.rng,
            ),
            Move::Global => self.drift.apply(
                &mut state.assignment,
                self.formula,
                valence,
                &state.unsatisfied,
                &mut self.rng,
            ),
        };
        state.apply_flips(self.formula, &self.index, &flipped);

        self.memory_hook
            .observe(&mut state.memory, &state.assignment, valence);
        state.iteration += 1;

        StepOutcome::Mutated { kind, flipped }
    }

    /// Runs the search until every clause is satisfied or the budget is spent.
    ///
    /// A satisfied run returns the live assignment with valence `1.0`; an
    /// exhausted run returns the best assignment it recorded, which is not
    /// necessarily the one it ended on.
    #[instrument(skip_all, name = "valence_drift_search", fields(max_iterations = self.config.max_iterations))]
    pub fn solve(&mut self, reporter: &ProgressReporter) -> SolveResult {
        let max_iterations = self.config.max_iterations;
        let mut state = self.initialize();
        debug!(
            initial_valence = state.best_valence,
            unsatisfied = state.unsatisfied.len(),
            "Search initialized."
        );

        reporter.report(Progress::TaskStart {
            total_steps: max_iterations,
        });

        for step in 0..max_iterations {
            if self.step(&mut state) == StepOutcome::Satisfied {
                reporter.report(Progress::TaskFinish);
                info!(steps = step, "All clauses satisfied.");
                return state.into_satisfied(step);
            }
            if reporter.is_enabled() && (step + 1) % PROGRESS_STRIDE == 0 {
                reporter.report(Progress::TaskAdvance {
                    steps: PROGRESS_STRIDE,
                });
            }
        }

        reporter.report(Progress::TaskFinish);
        info!(
            steps = max_iterations,
            best_valence = state.best_valence,
            "Iteration budget exhausted."
        );
        state.into_exhausted(max_iterations)
    }
}
