//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - loaded from the per-month CSV files
//! - rendered by the TUI and the text/PDF reports
//! - dumped as JSON snapshots for scripting

use std::path::PathBuf;

use chrono::Month;
use serde::Serialize;

/// One reporting period.
///
/// Month keys are never generated at runtime; the set of valid periods is the
/// fixed [`REPORT_MONTHS`] list and callers select from it by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

/// The enumerated report months, newest first.
pub const REPORT_MONTHS: [MonthKey; 3] = [
    MonthKey::new(2025, Month::December),
    MonthKey::new(2025, Month::November),
    MonthKey::new(2025, Month::October),
];

impl MonthKey {
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Resolve a user-supplied label (e.g. `"nov 2025"`) to one of the
    /// enumerated months. Matching ignores case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let wanted = label.trim();
        REPORT_MONTHS
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
    }

    /// Display label, `Mon YYYY`.
    pub fn label(&self) -> String {
        let name = self.month.name();
        format!("{} {}", &name[..3], self.year)
    }

    /// File stem of the month's data file (`"dec 2025"` for Dec 2025).
    pub fn file_stem(&self) -> String {
        self.label().to_lowercase()
    }

    /// Download name for the exported report.
    pub fn report_file_name(&self) -> String {
        format!("{}_report.pdf", self.label())
    }

    /// Position in [`REPORT_MONTHS`].
    pub fn index(&self) -> Option<usize> {
        REPORT_MONTHS.iter().position(|m| m == self)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// One supplier row of a month's dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierRecord {
    pub supplier: String,
    /// On-time-in-full delivery percentage, expected in `0..=100`.
    pub otif_pct: f64,
    pub savings_usd: f64,
    pub cycle_days: f64,
}

/// Ordered supplier records for one month.
///
/// A dataset is read-only once loaded; it is shared between the chart, the
/// metrics and the PDF export through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    month: MonthKey,
    records: Vec<SupplierRecord>,
}

impl Dataset {
    pub fn new(month: MonthKey, records: Vec<SupplierRecord>) -> Self {
        Self { month, records }
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn records(&self) -> &[SupplierRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolved report configuration.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory holding one `<month>.csv` per report month.
    pub data_dir: PathBuf,
    /// Illustrative image shown in the narrative section.
    pub image_path: PathBuf,
    pub image_caption: String,
    /// Video shown in the media section.
    pub video_path: PathBuf,
    /// Where exported PDFs are written.
    pub out_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            image_path: PathBuf::from("images/process_map.png"),
            image_caption: "Procurement Flow".to_string(),
            video_path: PathBuf::from("videos/demo.mp4"),
            out_dir: PathBuf::from("."),
        }
    }
}
