//! Logistics task tracking.
//!
//! Tasks are created open, grouped by assignee or category for the daily
//! board, completed once, and deleted permanently. Snapshots and the
//! activity journal are exported as spreadsheets. The module follows
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
