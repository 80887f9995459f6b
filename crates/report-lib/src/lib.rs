//! Reporting library for control-plane resource inventories
//!
//! This crate provides the core functionality for:
//! - Authenticated access to the control-plane REST API
//! - Cluster resolution (static lists and endpoint discovery)
//! - Per-cluster resource fetching and detail lookup
//! - Comparison and summary report construction
//! - Spreadsheet output

pub mod client;
pub mod detail;
pub mod fetcher;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod xlsx;

pub use client::{ClientError, ControlPlaneClient, Credentials};
pub use models::*;
pub use pipeline::{ComparisonSettings, RunOutcome, SummarySettings};
pub use report::{Cell, Table};
