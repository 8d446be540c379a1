use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use valenzdrift::core::io::dimacs::DimacsFile;
use valenzdrift::core::io::traits::FormulaFile;
use valenzdrift::workflows;
use valenzdrift::workflows::batch::{BatchJob, BatchRecord};

#[derive(Debug, Serialize)]
struct InstanceRow<'a> {
    filename: &'a str,
    n: usize,
    m: usize,
    solved: bool,
    best_valence: f64,
    steps: u64,
    runtime_sec: f64,
}

impl<'a> From<&'a BatchRecord> for InstanceRow<'a> {
    fn from(record: &'a BatchRecord) -> Self {
        Self {
            filename: &record.name,
            n: record.n,
            m: record.m,
            solved: record.solved,
            best_valence: record.best_valence,
            steps: record.steps,
            runtime_sec: record.runtime_sec,
        }
    }
}

pub fn run(args: BatchArgs) -> Result<()> {
    let app_config = build_config(&args.search, None)?;

    let files = collect_cnf_files(&args.indir)?;
    if files.is_empty() {
        warn!("No .cnf files found in {:?}", args.indir);
    }
    info!("Loading {} DIMACS file(s) from {:?}", files.len(), args.indir);
    let jobs = files
        .iter()
        .map(|path| load_job(path))
        .collect::<Result<Vec<_>>>()?;

    let reporter = super::progress_reporter(args.progress);
    let mut records = workflows::batch::run(jobs, &app_config.search, &reporter);
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let mut writer = csv::Writer::from_path(&args.outfile)?;
    for record in &records {
        if let Some(reason) = &record.error {
            println!("{}: skipped ({})", record.name, reason);
            continue;
        }
        writer.serialize(InstanceRow::from(record))?;
        println!(
            "{}: solved={} valence={:.3} steps={} time={:.2}s",
            record.name, record.solved, record.best_valence, record.steps, record.runtime_sec
        );
    }
    writer.flush()?;
    info!("Batch results written to {:?}", args.outfile);

    Ok(())
}

/// All `*.cnf` files directly inside `dir`, sorted by path.
fn collect_cnf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::Argument(format!(
            "Input directory does not exist: {}",
            dir.display()
        )));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cnf") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_job(path: &Path) -> Result<BatchJob> {
    let instance = DimacsFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(BatchJob {
        name,
        formula: instance.formula,
        seed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SearchArgs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn only_cnf_files_are_collected_in_order() {
        let dir = tempdir().unwrap();
        for name in ["b.cnf", "a.cnf", "notes.txt", "c.cnf.bak"] {
            fs::write(dir.path().join(name), "1 0\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.cnf")).unwrap();

        let files = collect_cnf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.cnf", "b.cnf"]);
    }

    #[test]
    fn missing_directory_is_an_argument_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            collect_cnf_files(&dir.path().join("absent")),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn batch_writes_one_row_per_solvable_instance() {
        let dir = tempdir().unwrap();
        let indir = dir.path().join("cnf");
        fs::create_dir(&indir).unwrap();
        fs::write(indir.join("xor.cnf"), "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();
        fs::write(indir.join("unit.cnf"), "p cnf 3 1\n3 0\n").unwrap();
        fs::write(indir.join("empty.cnf"), "c no clauses\n").unwrap();
        let outfile = dir.path().join("results.csv");

        run(BatchArgs {
            indir,
            outfile: outfile.clone(),
            search: SearchArgs {
                seed: Some(4),
                max_iterations: Some(1_000),
                ..SearchArgs::default()
            },
            progress: false,
        })
        .unwrap();

        let content = fs::read_to_string(outfile).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "filename,n,m,solved,best_valence,steps,runtime_sec");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("unit.cnf,3,1,true,1.0,"));
        assert!(lines[2].starts_with("xor.cnf,2,2,true,1.0,"));
    }
}
