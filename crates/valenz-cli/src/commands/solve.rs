use crate::cli::SolveArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use valenzdrift::core::generator::{clause_count_for, planted_3sat};
use valenzdrift::core::io::dimacs::DimacsFile;
use valenzdrift::core::io::traits::FormulaFile;
use valenzdrift::core::models::formula::Formula;
use valenzdrift::workflows;
use valenzdrift::workflows::solve::SolveReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InstanceInfo {
    Random { n: usize, m: usize },
    Dimacs { path: PathBuf, m: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveOutput {
    pub instance: InstanceInfo,
    pub best_valence: f64,
    pub steps: u64,
    pub runtime_sec: f64,
    pub solved: bool,
}

impl SolveOutput {
    fn new(instance: InstanceInfo, report: &SolveReport) -> Self {
        Self {
            instance,
            best_valence: report.result.valence,
            steps: report.result.steps,
            runtime_sec: report.runtime.as_secs_f64(),
            solved: report.result.is_solved(),
        }
    }
}

pub fn run(args: SolveArgs) -> Result<()> {
    if args.clauses.is_some() && args.random.is_none() {
        return Err(CliError::Argument(
            "--clauses only applies to instances generated with --random".to_string(),
        ));
    }
    let app_config = build_config(&args.search, None)?;
    if args.trace_out.is_some() && !app_config.search.record_trace {
        return Err(CliError::Argument(
            "--trace-out needs trace recording, which is disabled".to_string(),
        ));
    }

    let (formula, instance) = load_instance(&args, &app_config)?;
    info!(
        num_vars = formula.num_vars(),
        num_clauses = formula.num_clauses(),
        "Instance ready."
    );

    let reporter = super::progress_reporter(args.progress);
    let report = workflows::solve::run(&formula, &app_config.search, &reporter)?;

    let output = SolveOutput::new(instance, &report);
    let json = serde_json::to_string_pretty(&output)?;
    match &args.json_out {
        Some(path) => {
            std::fs::write(path, &json)?;
            info!("Result written to {:?}", path);
        }
        None => println!("{}", json),
    }

    if let Some(path) = &args.trace_out {
        let trace = report.result.trace.as_deref().unwrap_or_default();
        std::fs::write(path, serde_json::to_string(trace)?)?;
        info!("Valence trace ({} points) written to {:?}", trace.len(), path);
    }

    Ok(())
}

fn load_instance(args: &SolveArgs, app_config: &AppConfig) -> Result<(Formula, InstanceInfo)> {
    if let Some(num_vars) = args.random {
        let mut rng = match app_config.search.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let num_clauses = args
            .clauses
            .unwrap_or_else(|| clause_count_for(num_vars, app_config.clauses_per_var));
        let planted = planted_3sat(num_vars, Some(num_clauses), &mut rng)?;
        let m = planted.formula.num_clauses();
        return Ok((planted.formula, InstanceInfo::Random { n: num_vars, m }));
    }

    let path = args.file.as_ref().ok_or_else(|| {
        CliError::Argument("must supply --random N or a CNF FILE".to_string())
    })?;
    info!("Loading DIMACS instance from {:?}", path);
    let instance = DimacsFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.clone(),
        source: e.into(),
    })?;
    let m = instance.formula.num_clauses();
    Ok((
        instance.formula,
        InstanceInfo::Dimacs {
            path: path.clone(),
            m,
        },
    ))
}
