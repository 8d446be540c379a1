//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] and [`crate::engine`]
//! layers together.
//!
//! - **Single Solve** ([`solve`]) - Index, search and time one formula
//! - **Batch** ([`batch`]) - Independent solves over many formulas, plus summary statistics

pub mod batch;
pub mod solve;
