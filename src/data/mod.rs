//! Data acquisition for the report months.

pub mod loader;

pub use loader::{CsvDirectory, DataLoader, DatasetSource, resolve_month};
