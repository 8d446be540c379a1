use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Valenz-Drift Contributors",
    version,
    about = "Valenz-Drift CLI - A stochastic local-search SAT solver driven by clause valence and semantic drift.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used by `batch` and `sweep`.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single DIMACS file or a generated planted 3-SAT instance.
    Solve(SolveArgs),
    /// Solve every `.cnf` file in a directory and write a CSV report.
    Batch(BatchArgs),
    /// Sweep planted 3-SAT instances over a range of variable counts.
    Sweep(SweepArgs),
    /// Summarize a CSV produced by `batch` or `sweep`.
    Analyse(AnalyseArgs),
}

/// Search settings shared by every solving subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the iteration budget per instance.
    #[arg(long = "max-iter", value_name = "INT")]
    pub max_iterations: Option<u64>,

    /// Override the probability of a local (clause-targeted) move.
    #[arg(long, value_name = "FLOAT")]
    pub p_local: Option<f64>,

    /// Seed the random generator for reproducible runs.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Do not record the best-valence trace.
    #[arg(long)]
    pub no_trace: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.p-local=0.3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `solve` subcommand.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Path to a DIMACS CNF file.
    #[arg(value_name = "FILE", required_unless_present = "random", conflicts_with = "random")]
    pub file: Option<PathBuf>,

    /// Generate a planted satisfiable 3-SAT instance with N variables.
    #[arg(long, value_name = "N")]
    pub random: Option<usize>,

    /// Override the clause count of the generated instance.
    #[arg(long, value_name = "M", requires = "random", conflicts_with = "file")]
    pub clauses: Option<usize>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Write the result JSON to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Write the best-valence trace as a JSON array.
    #[arg(long, value_name = "PATH")]
    pub trace_out: Option<PathBuf>,

    /// Show a progress bar while solving.
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing `.cnf` files.
    #[arg(long, required = true, value_name = "DIR")]
    pub indir: PathBuf,

    /// Path for the result CSV.
    #[arg(long, required = true, value_name = "PATH")]
    pub outfile: PathBuf,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Show a progress bar over the instances.
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Variable counts to sweep, as a half-open range.
    #[arg(
        long,
        required = true,
        num_args = 3,
        value_names = ["START", "STOP", "STEP"]
    )]
    pub n_range: Vec<usize>,

    /// Independent runs per variable count.
    #[arg(long, value_name = "INT")]
    pub runs: Option<usize>,

    /// Clause-to-variable ratio of the generated instances.
    #[arg(long, value_name = "FLOAT")]
    pub clauses_per_var: Option<f64>,

    /// Path for the result CSV.
    #[arg(long, required = true, value_name = "PATH")]
    pub outfile: PathBuf,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Show a progress bar over the instances.
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for the `analyse` subcommand.
#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// CSV file written by `batch` or `sweep`.
    #[arg(required = true, value_name = "CSV")]
    pub csv: PathBuf,
}
