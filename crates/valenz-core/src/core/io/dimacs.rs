use crate::core::io::traits::FormulaFile;
use crate::core::models::formula::{Clause, Formula};
use crate::core::models::literal::Literal;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A parsed DIMACS file.
///
/// The counts from the `p cnf` header are informational only; the formula
/// derives its own variable count from the clauses that were actually read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimacsInstance {
    pub declared_vars: Option<usize>,
    pub declared_clauses: Option<usize>,
    pub formula: Formula,
}

/// Lenient DIMACS CNF reader and writer.
///
/// Line policy:
/// - blank lines and lines starting with `c` or `%` are ignored
/// - a line starting with `p` is read as the header; a malformed header
///   leaves the declared counts unset
/// - every other line is a whitespace-separated list of signed integers;
///   `0` tokens are dropped, and a line with any token that does not parse
///   as an integer is skipped without error
pub struct DimacsFile;

impl DimacsFile {
    pub fn parse_str(input: &str) -> DimacsInstance {
        let mut instance = DimacsInstance::default();
        let mut clauses = Vec::new();
        for (line_no, line) in input.lines().enumerate() {
            Self::consume_line(line_no + 1, line, &mut instance, &mut clauses);
        }
        instance.formula = Formula::new(clauses);
        instance
    }

    fn consume_line(
        line_no: usize,
        raw: &str,
        instance: &mut DimacsInstance,
        clauses: &mut Vec<Clause>,
    ) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') || line.starts_with('%') {
            return;
        }
        if line.starts_with('p') {
            let (vars, clause_count) = parse_header(line);
            instance.declared_vars = vars;
            instance.declared_clauses = clause_count;
            return;
        }
        if !line.chars().any(|ch| ch.is_ascii_digit() || ch == '-') {
            return;
        }

        let parsed: Result<Vec<i64>, _> = line.split_whitespace().map(str::parse::<i64>).collect();
        let Ok(values) = parsed else {
            trace!(line = line_no, "Skipping malformed clause line.");
            return;
        };

        let clause: Clause = values.into_iter().filter_map(Literal::from_dimacs).collect();
        if !clause.is_empty() {
            clauses.push(clause);
        }
    }
}

fn parse_header(line: &str) -> (Option<usize>, Option<usize>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [_, _, vars, clauses] => (vars.parse().ok(), clauses.parse().ok()),
        _ => (None, None),
    }
}

impl FormulaFile for DimacsFile {
    type Instance = DimacsInstance;
    type Error = DimacsError;

    fn read_from(reader: &mut impl BufRead) -> Result<DimacsInstance, DimacsError> {
        let mut instance = DimacsInstance::default();
        let mut clauses = Vec::new();
        let mut line = String::new();
        let mut line_no = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            line_no += 1;
            Self::consume_line(line_no, &line, &mut instance, &mut clauses);
        }
        instance.formula = Formula::new(clauses);
        debug!(
            clauses = instance.formula.num_clauses(),
            vars = instance.formula.num_vars(),
            "Read DIMACS instance."
        );
        Ok(instance)
    }

    fn write_to(formula: &Formula, writer: &mut impl Write) -> Result<(), DimacsError> {
        writeln!(writer, "p cnf {} {}", formula.num_vars(), formula.num_clauses())?;
        for clause in formula.clauses() {
            for lit in clause.literals() {
                write!(writer, "{} ", lit)?;
            }
            writeln!(writer, "0")?;
        }
        Ok(())
    }
}
