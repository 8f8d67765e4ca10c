//! Shared "month selection" pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! month label -> cached dataset -> metrics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::sync::Arc;

use crate::data::{DataLoader, DatasetSource};
use crate::domain::{Dataset, MonthKey};
use crate::error::AppError;
use crate::report::{MetricsSummary, summarize};

/// Everything the front-ends display for one month.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub month: MonthKey,
    pub dataset: Arc<Dataset>,
    pub metrics: MetricsSummary,
}

/// Resolve a month label and build its view.
pub fn build_report<S: DatasetSource>(loader: &mut DataLoader<S>, label: &str) -> Result<ReportView, AppError> {
    let month = crate::data::resolve_month(label)?;
    build_report_for(loader, month)
}

/// Build the view for an already-resolved month.
pub fn build_report_for<S: DatasetSource>(
    loader: &mut DataLoader<S>,
    month: MonthKey,
) -> Result<ReportView, AppError> {
    let dataset = loader.load_month(month)?;
    let metrics = summarize(&dataset);
    Ok(ReportView {
        month,
        dataset,
        metrics,
    })
}
