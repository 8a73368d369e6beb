//! Adapter implementations for task ports.

pub mod memory;
pub mod spreadsheet;
pub mod sqlite;
