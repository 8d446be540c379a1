use crate::core::models::formula::Formula;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing CNF file formats.
///
/// Implementors handle format-specific parsing and serialization; the
/// path-based helpers are provided on top of the reader/writer primitives.
pub trait FormulaFile {
    /// The parsed representation, usually the formula plus header metadata.
    type Instance;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads an instance from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Instance, Self::Error>;

    /// Writes a formula to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(formula: &Formula, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads an instance from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Instance, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a formula to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(formula: &Formula, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(formula, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
