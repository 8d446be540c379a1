//! Reading and writing CNF instances.

pub mod dimacs;
pub mod traits;
