//! `procurement-report` library crate.
//!
//! The binary (`procure`) is a thin wrapper around this library so that:
//!
//! - loading, metrics and PDF export are testable without a terminal
//! - the TUI and the plain CLI share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod tui;
