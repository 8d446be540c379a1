//! # Engine Module
//!
//! The stateful search layer. A [`search::Solver`] owns a formula's
//! [`index::VariableIndex`], a seeded random generator, and the injected
//! objective, global drift and memory hook; each call to
//! [`search::Solver::solve`] creates a fresh [`state::SearchState`] and runs it
//! to completion.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Iteration budget, local-move probability, seed
//! - **Indexing** ([`index`], [`unsat`]) - Variable-to-clause index and the live unsatisfied set
//! - **Mutation** ([`drift`]) - Local and semantic drift operators
//! - **Search** ([`search`], [`state`]) - The iteration loop and its terminal results
//! - **Extension** ([`memory`]) - The write-only per-iteration memory hook
//! - **Progress Monitoring** ([`progress`]) - Passive progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! A solve is strictly sequential. Parallelism happens one level up, across
//! independent solves.

pub mod config;
pub mod drift;
pub mod error;
pub mod index;
pub mod memory;
pub mod progress;
pub mod search;
pub mod state;
pub mod unsat;
