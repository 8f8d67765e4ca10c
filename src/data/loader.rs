//! Month-keyed dataset loading with per-month memoization.
//!
//! The loader owns its cache: each month is read from the source at most
//! once per loader instance, and every later request for that month gets the
//! same `Arc<Dataset>`. Failed loads are not cached, so fixing a broken file
//! and re-selecting the month works without a restart.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{Dataset, MonthKey, REPORT_MONTHS};
use crate::error::AppError;
use crate::io::ingest::load_dataset_csv;

/// Where month datasets come from.
pub trait DatasetSource {
    /// Read the dataset for `month` from storage.
    fn read_month(&self, month: MonthKey) -> Result<Dataset, AppError>;
}

/// A directory of `<month lowercased>.csv` files, e.g. `data/dec 2025.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, month: MonthKey) -> PathBuf {
        self.root.join(format!("{}.csv", month.file_stem()))
    }
}

impl DatasetSource for CsvDirectory {
    fn read_month(&self, month: MonthKey) -> Result<Dataset, AppError> {
        load_dataset_csv(&self.path_for(month), month)
    }
}

pub struct DataLoader<S = CsvDirectory> {
    source: S,
    cache: HashMap<MonthKey, Arc<Dataset>>,
}

impl<S: DatasetSource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the dataset for a month label such as `"Nov 2025"`.
    ///
    /// Labels outside the enumerated report months fail with `NotFound`.
    pub fn load(&mut self, label: &str) -> Result<Arc<Dataset>, AppError> {
        let month = resolve_month(label)?;
        self.load_month(month)
    }

    /// Load the dataset for an already-resolved month, reading storage only on
    /// the first request.
    pub fn load_month(&mut self, month: MonthKey) -> Result<Arc<Dataset>, AppError> {
        if let Some(cached) = self.cache.get(&month) {
            tracing::trace!(%month, "dataset cache hit");
            return Ok(Arc::clone(cached));
        }

        let dataset = Arc::new(self.source.read_month(month)?);
        tracing::info!(%month, rows = dataset.len(), "loaded month dataset");
        self.cache.insert(month, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Whether `month` has already been loaded.
    pub fn is_cached(&self, month: MonthKey) -> bool {
        self.cache.contains_key(&month)
    }
}

/// Resolve a label to one of the enumerated months.
pub fn resolve_month(label: &str) -> Result<MonthKey, AppError> {
    MonthKey::parse(label).ok_or_else(|| {
        let valid = REPORT_MONTHS
            .iter()
            .map(MonthKey::label)
            .collect::<Vec<_>>()
            .join(", ");
        AppError::not_found(format!("Unknown report month '{}'. Valid months: {valid}.", label.trim()))
    })
}
