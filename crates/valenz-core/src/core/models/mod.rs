//! In-memory representation of CNF formulas and truth assignments.
//!
//! - [`literal::Literal`] – a zero-based variable paired with a polarity
//! - [`formula::Clause`] / [`formula::Formula`] – disjunctions and their conjunction
//! - [`assignment::Assignment`] – one boolean per variable, index-addressed

pub mod assignment;
pub mod formula;
pub mod literal;
