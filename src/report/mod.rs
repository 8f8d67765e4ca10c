//! Report content: narrative copy, metrics and formatted terminal output.

pub mod format;
pub mod metrics;

use std::path::Path;

pub use format::*;
pub use metrics::*;

use crate::domain::{MonthKey, ReportConfig};

/// Application title shown in the TUI header and the text report.
pub const REPORT_TITLE: &str = "Procurement GT Monthly Reports";

/// Fixed activity summary shown for every month.
pub const NARRATIVE_BULLETS: [&str; 3] = [
    "Investigated foreign imports and tariff codes.",
    "Mitigated wastes: customs delays and overstocking.",
    "Tracked duties paid via the integrated system.",
];

/// The "Duties Summary" section. Independent of the month's data.
#[derive(Debug, Clone)]
pub struct Narrative<'a> {
    pub heading: String,
    pub bullets: &'static [&'static str],
    pub image_path: &'a Path,
    pub image_caption: &'a str,
}

impl<'a> Narrative<'a> {
    pub fn new(month: MonthKey, config: &'a ReportConfig) -> Self {
        Self {
            heading: format!("{month} Activities"),
            bullets: &NARRATIVE_BULLETS,
            image_path: &config.image_path,
            image_caption: &config.image_caption,
        }
    }
}
