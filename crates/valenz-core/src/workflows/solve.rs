use crate::core::models::formula::Formula;
use crate::engine::config::SearchConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search::Solver;
use crate::engine::state::SolveResult;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub result: SolveResult,
    pub num_vars: usize,
    pub num_clauses: usize,
    pub runtime: Duration,
}

/// Solves one formula with the default valence objective, semantic drift and
/// no-op memory hook.
#[instrument(skip_all, name = "solve_workflow")]
pub fn run(
    formula: &Formula,
    config: &SearchConfig,
    reporter: &ProgressReporter,
) -> Result<SolveReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    info!(
        num_vars = formula.num_vars(),
        num_clauses = formula.num_clauses(),
        "Building variable index."
    );
    let mut solver = Solver::new(formula, config.clone())?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Searching" });
    let started = Instant::now();
    let result = solver.solve(reporter);
    let runtime = started.elapsed();
    reporter.report(Progress::PhaseFinish);

    info!(
        solved = result.is_solved(),
        valence = result.valence,
        steps = result.steps,
        runtime_sec = runtime.as_secs_f64(),
        "Solve finished."
    );

    Ok(SolveReport {
        result,
        num_vars: formula.num_vars(),
        num_clauses: formula.num_clauses(),
        runtime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SearchConfigBuilder;
    use std::sync::Mutex;

    #[test]
    fn report_carries_instance_dimensions() {
        let formula = Formula::from_pairs([vec![(0, true), (2, true)], vec![(1, false)]]);
        let config = SearchConfigBuilder::new().seed(Some(1)).build().unwrap();
        let report = run(&formula, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.num_vars, 3);
        assert_eq!(report.num_clauses, 2);
        assert!(report.result.is_solved());
    }

    #[test]
    fn empty_formula_fails_before_any_phase_runs_the_search() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));

        let err = run(&Formula::default(), &SearchConfig::default(), &reporter).unwrap_err();
        drop(reporter);

        assert!(matches!(err, EngineError::EmptyFormula));
        assert_eq!(phases.into_inner().unwrap(), vec!["Preparation"]);
    }
}
