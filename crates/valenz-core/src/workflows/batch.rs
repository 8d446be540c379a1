use crate::core::models::formula::Formula;
use crate::engine::config::SearchConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::solve;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One independent solve in a batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub name: String,
    pub formula: Formula,
    /// Overrides the seed derived from the batch configuration.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub name: String,
    pub n: usize,
    pub m: usize,
    pub seed: Option<u64>,
    pub solved: bool,
    pub best_valence: f64,
    pub steps: u64,
    pub runtime_sec: f64,
    /// Set when the job was rejected instead of solved.
    pub error: Option<String>,
}

/// Solves every job independently.
///
/// Each job gets its own solver and random generator; nothing is shared
/// between jobs. With the `parallel` feature the jobs run on the rayon pool.
/// A job that cannot be solved (for example an empty formula) produces a
/// record with `error` set and does not affect the others. Records are
/// returned in job order.
///
/// Job seeds: the job's own seed if present, otherwise the configured seed
/// plus the job's position, otherwise fresh entropy.
#[instrument(skip_all, name = "batch_workflow", fields(jobs = jobs.len()))]
pub fn run(jobs: Vec<BatchJob>, config: &SearchConfig, reporter: &ProgressReporter) -> Vec<BatchRecord> {
    reporter.report(Progress::PhaseStart { name: "Batch" });
    reporter.report(Progress::TaskStart {
        total_steps: jobs.len() as u64,
    });
    info!("Starting batch of {} instance(s).", jobs.len());

    let run_job = |(position, job): (usize, BatchJob)| {
        let seed = job
            .seed
            .or_else(|| config.seed.map(|base| base.wrapping_add(position as u64)));
        let record = solve_job(job, &config.with_seed(seed));
        reporter.report(Progress::TaskAdvance { steps: 1 });
        record
    };

    #[cfg(feature = "parallel")]
    let records: Vec<BatchRecord> = jobs.into_par_iter().enumerate().map(run_job).collect();

    #[cfg(not(feature = "parallel"))]
    let records: Vec<BatchRecord> = jobs.into_iter().enumerate().map(run_job).collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        solved = records.iter().filter(|r| r.solved).count(),
        total = records.len(),
        "Batch complete."
    );
    records
}

fn solve_job(job: BatchJob, config: &SearchConfig) -> BatchRecord {
    let silent = ProgressReporter::new();
    let n = job.formula.num_vars();
    let m = job.formula.num_clauses();
    match solve::run(&job.formula, config, &silent) {
        Ok(report) => BatchRecord {
            name: job.name,
            n,
            m,
            seed: config.seed,
            solved: report.result.is_solved(),
            best_valence: report.result.valence,
            steps: report.result.steps,
            runtime_sec: report.runtime.as_secs_f64(),
            error: None,
        },
        Err(e) => {
            warn!(instance = %job.name, "Skipping instance: {}", e);
            BatchRecord {
                name: job.name,
                n,
                m,
                seed: config.seed,
                solved: false,
                best_valence: 0.0,
                steps: 0,
                runtime_sec: 0.0,
                error: Some(e.to_string()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spread<T> {
    pub mean: f64,
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub instances: usize,
    pub solved: usize,
    pub valence: Spread<f64>,
    pub runtime_sec: Spread<f64>,
    pub steps: Spread<u64>,
}

impl BatchSummary {
    pub fn solved_ratio(&self) -> f64 {
        self.solved as f64 / self.instances as f64
    }
}

/// Aggregates the records that were actually solved (no `error`).
///
/// Returns `None` when there is nothing to aggregate.
pub fn summarize(records: &[BatchRecord]) -> Option<BatchSummary> {
    let valid: Vec<&BatchRecord> = records.iter().filter(|r| r.error.is_none()).collect();
    if valid.is_empty() {
        return None;
    }
    let count = valid.len() as f64;

    let float_spread = |value: fn(&BatchRecord) -> f64| Spread {
        mean: valid.iter().map(|r| value(r)).sum::<f64>() / count,
        min: valid.iter().map(|r| value(r)).fold(f64::INFINITY, f64::min),
        max: valid.iter().map(|r| value(r)).fold(f64::NEG_INFINITY, f64::max),
    };

    Some(BatchSummary {
        instances: valid.len(),
        solved: valid.iter().filter(|r| r.solved).count(),
        valence: float_spread(|r| r.best_valence),
        runtime_sec: float_spread(|r| r.runtime_sec),
        steps: Spread {
            mean: valid.iter().map(|r| r.steps as f64).sum::<f64>() / count,
            min: valid.iter().map(|r| r.steps).min().unwrap_or(0),
            max: valid.iter().map(|r| r.steps).max().unwrap_or(0),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::planted_3sat;
    use crate::engine::config::SearchConfigBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn planted_jobs(count: usize) -> Vec<BatchJob> {
        let mut rng = StdRng::seed_from_u64(77);
        (0..count)
            .map(|i| BatchJob {
                name: format!("planted-{i}"),
                formula: planted_3sat(12, Some(30), &mut rng).unwrap().formula,
                seed: None,
            })
            .collect()
    }

    fn record(name: &str, solved: bool, valence: f64, steps: u64, runtime: f64) -> BatchRecord {
        BatchRecord {
            name: name.to_string(),
            n: 3,
            m: 5,
            seed: None,
            solved,
            best_valence: valence,
            steps,
            runtime_sec: runtime,
            error: None,
        }
    }

    #[test]
    fn batch_results_do_not_depend_on_scheduling() {
        let config = SearchConfigBuilder::new()
            .max_iterations(2_000)
            .seed(Some(10))
            .build()
            .unwrap();

        let first = run(planted_jobs(6), &config, &ProgressReporter::new());
        let second = run(planted_jobs(6), &config, &ProgressReporter::new());

        assert_eq!(first.len(), 6);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.steps, b.steps);
            assert_eq!(a.best_valence, b.best_valence);
        }
        assert_eq!(first[2].seed, Some(12));
    }

    #[test]
    fn rejected_job_does_not_abort_the_batch() {
        let mut jobs = planted_jobs(2);
        jobs.push(BatchJob {
            name: "empty".to_string(),
            formula: Formula::default(),
            seed: Some(1),
        });
        let config = SearchConfigBuilder::new()
            .max_iterations(500)
            .build()
            .unwrap();

        let records = run(jobs, &config, &ProgressReporter::new());
        let empty = records.iter().find(|r| r.name == "empty").unwrap();
        assert!(empty.error.as_deref().unwrap().contains("Empty formula"));
        assert_eq!(empty.seed, Some(1));
        assert_eq!(records.iter().filter(|r| r.error.is_none()).count(), 2);
    }

    #[test]
    fn oversized_instance_becomes_an_error_record() {
        let mut jobs = planted_jobs(1);
        jobs.push(BatchJob {
            name: "huge".to_string(),
            formula: Formula::from_pairs([vec![(usize::MAX / 2, true)]]),
            seed: None,
        });
        let config = SearchConfigBuilder::new()
            .max_iterations(200)
            .build()
            .unwrap();

        let records = run(jobs, &config, &ProgressReporter::new());
        assert_eq!(records.len(), 2);
        assert!(records[0].error.is_none());
        assert!(records[1].error.as_deref().unwrap().contains("variables"));
    }

    #[test]
    fn summary_aggregates_valid_records() {
        let mut failed = record("bad", false, 0.0, 0, 0.0);
        failed.error = Some("Empty formula".to_string());
        let records = vec![
            record("a", true, 1.0, 10, 0.5),
            record("b", false, 0.8, 30, 1.5),
            failed,
        ];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.instances, 2);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.solved_ratio(), 0.5);
        assert!((summary.valence.mean - 0.9).abs() < 1e-12);
        assert_eq!(summary.valence.min, 0.8);
        assert_eq!(summary.runtime_sec.max, 1.5);
        assert_eq!(summary.steps.mean, 20.0);
        assert_eq!((summary.steps.min, summary.steps.max), (10, 30));
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(summarize(&[]).is_none());
    }
}
