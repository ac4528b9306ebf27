//! Task management for QualiTasks.
//!
//! This module covers the task aggregate and its scheduling rules: creating
//! and mutating task records, filtering them across multiple fields, and
//! aggregating a snapshot into the three daily-plan buckets (`today`,
//! `this_week`, `yesterday`) with carry-over marking. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
