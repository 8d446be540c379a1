//! # Valenz-Drift Core Library
//!
//! A stochastic local-search engine for Boolean satisfiability. The search
//! climbs the *valence* of an assignment, the fraction of clauses it
//! satisfies, by alternating two mutation operators: a targeted flip inside an
//! unsatisfied clause (local drift) and a valence-scaled multi-flip over the
//! whole assignment (semantic drift). It is an anytime heuristic: it never
//! proves unsatisfiability and reports the best assignment found within an
//! iteration budget.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless formula models, DIMACS I/O, the
//!   planted instance generator and the valence objective.
//!
//! - **[`engine`]: The Search.** The variable index, the incrementally
//!   maintained unsatisfied-clause set, the drift operators, the memory hook
//!   and the search loop itself.
//!
//! - **[`workflows`]: The Public API.** Timed single solves and parallel
//!   batches of independent solves.

pub mod core;
pub mod engine;
pub mod workflows;
