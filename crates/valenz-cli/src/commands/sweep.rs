use crate::cli::SweepArgs;
use crate::config::build_config;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use valenzdrift::core::generator::{clause_count_for, planted_3sat};
use valenzdrift::workflows;
use valenzdrift::workflows::batch::BatchJob;

/// Upper bound of the per-run seeds drawn when no base seed is configured.
const MAX_RUN_SEED: u64 = 1_000_000_000;

#[derive(Debug, Serialize)]
struct SweepRow {
    n: usize,
    m: usize,
    seed: u64,
    solved: bool,
    best_valence: f64,
    steps: u64,
    runtime_sec: f64,
}

/// One planned run: the requested variable count and the seed shared by the
/// generator and the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SweepPoint {
    n: usize,
    seed: u64,
}

pub fn run(args: SweepArgs) -> Result<()> {
    let app_config = build_config(&args.search, args.clauses_per_var)?;
    let runs = args.runs.unwrap_or(DefaultsConfig::default().runs);
    let points = plan(&args.n_range, runs, app_config.search.seed)?;
    info!(
        points = points.len(),
        clauses_per_var = app_config.clauses_per_var,
        "Generating planted instances."
    );

    let jobs = points
        .iter()
        .map(|point| -> Result<BatchJob> {
            let mut rng = StdRng::seed_from_u64(point.seed);
            let num_clauses = clause_count_for(point.n, app_config.clauses_per_var);
            let planted = planted_3sat(point.n, Some(num_clauses), &mut rng)?;
            Ok(BatchJob {
                name: format!("n{}-seed{}", point.n, point.seed),
                formula: planted.formula,
                seed: Some(point.seed),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let reporter = super::progress_reporter(args.progress);
    let records = workflows::batch::run(jobs, &app_config.search, &reporter);

    let mut writer = csv::Writer::from_path(&args.outfile)?;
    for (point, record) in points.iter().zip(&records) {
        if let Some(reason) = &record.error {
            println!("n={} seed={}: skipped ({})", point.n, point.seed, reason);
            continue;
        }
        writer.serialize(SweepRow {
            n: point.n,
            m: record.m,
            seed: point.seed,
            solved: record.solved,
            best_valence: record.best_valence,
            steps: record.steps,
            runtime_sec: record.runtime_sec,
        })?;
        println!(
            "n={} m={} seed={} solved={} valence={:.3} steps={} time={:.2}s",
            point.n,
            record.m,
            point.seed,
            record.solved,
            record.best_valence,
            record.steps,
            record.runtime_sec
        );
    }
    writer.flush()?;
    info!("Sweep results written to {:?}", args.outfile);

    Ok(())
}

/// Expands `START STOP STEP` into runs with their seeds.
///
/// With a base seed every run seed is derived from it, so the whole sweep is
/// reproducible; otherwise seeds come from OS entropy.
fn plan(n_range: &[usize], runs: usize, base_seed: Option<u64>) -> Result<Vec<SweepPoint>> {
    let &[start, stop, step] = n_range else {
        return Err(CliError::Argument(
            "--n-range expects exactly START STOP STEP".to_string(),
        ));
    };
    if step == 0 {
        return Err(CliError::Argument("--n-range STEP must be positive".to_string()));
    }
    if runs == 0 {
        return Err(CliError::Argument("--runs must be positive".to_string()));
    }

    let mut seeds = match base_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok((start..stop)
        .step_by(step)
        .flat_map(|n| std::iter::repeat_n(n, runs))
        .map(|n| SweepPoint {
            n,
            seed: seeds.gen_range(1..=MAX_RUN_SEED),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SearchArgs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn plan_expands_the_half_open_range() {
        let points = plan(&[10, 40, 10], 2, Some(1)).unwrap();
        let ns: Vec<_> = points.iter().map(|p| p.n).collect();
        assert_eq!(ns, vec![10, 10, 20, 20, 30, 30]);
        assert!(points.iter().all(|p| (1..=MAX_RUN_SEED).contains(&p.seed)));
    }

    #[test]
    fn plan_is_reproducible_with_a_base_seed() {
        assert_eq!(plan(&[5, 8, 1], 3, Some(9)).unwrap(), plan(&[5, 8, 1], 3, Some(9)).unwrap());
    }

    #[test]
    fn plan_rejects_degenerate_ranges() {
        assert!(matches!(plan(&[5, 8, 0], 1, None), Err(CliError::Argument(_))));
        assert!(matches!(plan(&[5, 8, 1], 0, None), Err(CliError::Argument(_))));
        assert!(matches!(plan(&[5, 8], 1, None), Err(CliError::Argument(_))));
        assert!(plan(&[8, 5, 1], 1, None).unwrap().is_empty());
    }

    #[test]
    fn sweep_writes_rows_in_plan_order() {
        let dir = tempdir().unwrap();
        let outfile = dir.path().join("sweep.csv");

        run(SweepArgs {
            n_range: vec![8, 16, 4],
            runs: Some(2),
            clauses_per_var: Some(2.0),
            outfile: outfile.clone(),
            search: SearchArgs {
                seed: Some(21),
                max_iterations: Some(20_000),
                ..SearchArgs::default()
            },
            progress: false,
        })
        .unwrap();

        let mut reader = csv::Reader::from_path(outfile).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            vec!["n", "m", "seed", "solved", "best_valence", "steps", "runtime_sec"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let ns: Vec<_> = rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(ns, vec!["8", "8", "12", "12"]);
        assert!(rows.iter().all(|r| r[1] == (r[0].parse::<usize>().unwrap() * 2).to_string()));
    }

    #[test]
    fn too_few_variables_aborts_the_sweep() {
        let dir = tempdir().unwrap();
        let result = run(SweepArgs {
            n_range: vec![2, 3, 1],
            runs: Some(1),
            clauses_per_var: None,
            outfile: dir.path().join("sweep.csv"),
            search: SearchArgs::default(),
            progress: false,
        });
        assert!(matches!(result, Err(CliError::Generator(_))));
    }
}
