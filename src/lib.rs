//! Workboard: a daily logistics task board.
//!
//! Tasks are recorded with an assignee and a category, shown grouped on a
//! web board, completed once, and deleted permanently. Snapshots of the
//! store and an activity journal are exported as `.xlsx` workbooks, on
//! demand and on a timer.
//!
//! # Architecture
//!
//! The task core follows hexagonal architecture principles:
//!
//! - **Domain**: task values and lifecycle rules with no infrastructure
//!   dependencies
//! - **Ports**: trait interfaces for the store, the journal, and workbook
//!   encoding
//! - **Adapters**: in-memory and `SQLite` stores, the `.xlsx` encoder
//!
//! # Modules
//!
//! - [`task`]: task domain, ports, adapters, and services
//! - [`web`]: axum router, HTML board, and JSON API
//! - [`config`]: command-line and environment configuration
//! - [`scheduler`]: periodic export loop
//! - [`app`]: server bootstrap
//! - [`telemetry`]: tracing subscriber setup

pub mod app;
pub mod config;
pub mod scheduler;
pub mod task;
pub mod telemetry;
pub mod web;
