//! # Core Module
//!
//! Stateless building blocks shared by the search engine and its callers.
//!
//! ## Architecture
//!
//! - **Formula Representation** ([`models`]) - Literals, clauses, formulas and assignments
//! - **File I/O** ([`io`]) - Lenient DIMACS reading and writing
//! - **Instance Generation** ([`generator`]) - Planted random 3-SAT instances
//! - **Scoring** ([`objective`]) - The valence objective and the pluggable [`objective::Objective`] trait
//!
//! Nothing in this module owns mutable search state; everything here can be
//! called at arbitrary points and from any thread.

pub mod generator;
pub mod io;
pub mod models;
pub mod objective;
