//! Domain types used throughout the report pipeline.
//!
//! This module defines:
//!
//! - the enumerated reporting periods (`MonthKey`, `REPORT_MONTHS`)
//! - per-supplier rows and the per-month `Dataset`
//! - the resolved `ReportConfig`

pub mod types;

pub use types::*;
