//! Input/output helpers.
//!
//! - per-month CSV ingest + validation (`ingest`)
//! - PDF rendering (`pdf`)
//! - writing documents and JSON snapshots (`export`)

pub mod export;
pub mod ingest;
pub mod pdf;

pub use export::*;
pub use ingest::*;
pub use pdf::*;
