use crate::cli::AnalyseArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fmt::{self, Write};
use std::path::Path;
use tracing::info;
use valenzdrift::workflows::batch::{BatchRecord, BatchSummary, summarize};

const TOP_N: usize = 5;

/// One row of a `batch` or `sweep` CSV; identifying columns depend on which
/// command wrote it.
#[derive(Debug, Clone, Deserialize)]
struct ResultRow {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    m: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    solved: bool,
    best_valence: f64,
    steps: u64,
    runtime_sec: f64,
}

impl ResultRow {
    fn label(&self) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        let field = |v: Option<String>| v.unwrap_or_else(|| "?".to_string());
        format!(
            "n={} m={} seed={}",
            field(self.n.map(|v| v.to_string())),
            field(self.m.map(|v| v.to_string())),
            field(self.seed.map(|v| v.to_string()))
        )
    }

    fn to_record(&self) -> BatchRecord {
        BatchRecord {
            name: self.label(),
            n: self.n.unwrap_or(0),
            m: self.m.unwrap_or(0),
            seed: self.seed,
            solved: self.solved,
            best_valence: self.best_valence,
            steps: self.steps,
            runtime_sec: self.runtime_sec,
            error: None,
        }
    }
}

pub fn run(args: AnalyseArgs) -> Result<()> {
    let rows = read_rows(&args.csv)?;
    info!("Read {} result row(s) from {:?}", rows.len(), args.csv);
    print!("{}", render(&rows)?);
    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<ResultRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<ResultRow>, csv::Error>>()
        .map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    Ok(rows)
}

fn render(rows: &[ResultRow]) -> Result<String> {
    let records: Vec<BatchRecord> = rows.iter().map(ResultRow::to_record).collect();
    let summary = summarize(&records)
        .ok_or_else(|| CliError::Argument("the CSV contains no result rows".to_string()))?;

    let mut out = String::new();
    write_report(&mut out, rows, &summary).map_err(|e| CliError::Other(e.into()))?;
    Ok(out)
}

fn write_report(out: &mut impl Write, rows: &[ResultRow], summary: &BatchSummary) -> fmt::Result {
    writeln!(out, "\n===== Batch Summary =====\n")?;
    writeln!(out, "Instances: {}", summary.instances)?;
    writeln!(
        out,
        "Solved: {}/{} ({:.1}%)",
        summary.solved,
        summary.instances,
        100.0 * summary.solved_ratio()
    )?;
    writeln!(out, "Mean valence: {:.4}", summary.valence.mean)?;
    writeln!(
        out,
        "Min/Max valence: {:.4} / {:.4}",
        summary.valence.min, summary.valence.max
    )?;
    writeln!(out, "Mean runtime: {:.3} ms", summary.runtime_sec.mean * 1000.0)?;
    writeln!(
        out,
        "Min/Max runtime: {:.3} / {:.3} ms",
        summary.runtime_sec.min * 1000.0,
        summary.runtime_sec.max * 1000.0
    )?;
    writeln!(out, "Mean steps: {:.0}", summary.steps.mean)?;
    writeln!(out, "Min/Max steps: {} / {}", summary.steps.min, summary.steps.max)?;

    let mut fastest: Vec<&ResultRow> = rows.iter().collect();
    fastest.sort_by(|a, b| a.runtime_sec.total_cmp(&b.runtime_sec));
    writeln!(out, "\nTop {} fastest:", TOP_N)?;
    for row in fastest.iter().take(TOP_N) {
        writeln!(
            out,
            "  {:<32} {:>12.3} ms  solved={}",
            row.label(),
            row.runtime_sec * 1000.0,
            row.solved
        )?;
    }

    let mut strongest: Vec<&ResultRow> = rows.iter().collect();
    strongest.sort_by(|a, b| b.best_valence.total_cmp(&a.best_valence));
    writeln!(out, "\nTop {} highest valence:", TOP_N)?;
    for row in strongest.iter().take(TOP_N) {
        writeln!(
            out,
            "  {:<32} {:>8.4}  solved={}",
            row.label(),
            row.best_valence,
            row.solved
        )?;
    }
    writeln!(out, "\n===== End of Summary =====\n")
}
