//! Plain-text rendering of a month's report for the `show` subcommand.
//!
//! Formatting lives in one place so output changes stay localized and the
//! TUI and PDF code can share the same column layout helpers.

use crate::app::pipeline::ReportView;
use crate::domain::{MonthKey, REPORT_MONTHS, ReportConfig, SupplierRecord};
use crate::report::{Narrative, REPORT_TITLE};

/// Column headers used by the text table and the PDF table.
pub const TABLE_HEADERS: [&str; 4] = ["Supplier", "OTIF %", "Savings USD", "Cycle Days"];

/// Format the full report: narrative, supplier table, metrics and media.
pub fn format_report(view: &ReportView, config: &ReportConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {REPORT_TITLE} - {} ===\n\n", view.month));

    let narrative = Narrative::new(view.month, config);
    out.push_str(&format!("{}\n", narrative.heading));
    for bullet in narrative.bullets {
        out.push_str(&format!("- {bullet}\n"));
    }
    out.push_str(&format!(
        "[image] {} ({})\n\n",
        narrative.image_path.display(),
        narrative.image_caption
    ));

    out.push_str("Supplier performance:\n");
    if view.dataset.is_empty() {
        out.push_str("(no suppliers reported)\n");
    } else {
        out.push_str(&format_supplier_table(view.dataset.records()));
    }
    out.push('\n');

    out.push_str(&format!("Total Savings : {}\n", view.metrics.total_savings_display()));
    out.push_str(&format!("Avg Cycle Time: {}\n", view.metrics.avg_cycle_display()));
    out.push('\n');

    out.push_str(&format!("[video] {}\n", config.video_path.display()));

    out
}

/// Format the supplier rows as an aligned table.
pub fn format_supplier_table(rows: &[SupplierRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>8} {:>14} {:>10}",
        TABLE_HEADERS[0], TABLE_HEADERS[1], TABLE_HEADERS[2], TABLE_HEADERS[3]
    ));
    out.push('\n');
    out.push_str(&format!("{:-<24} {:-<8} {:-<14} {:-<10}", "", "", "", ""));
    out.push('\n');

    for r in rows {
        let [supplier, otif, savings, cycle] = table_cells(r);
        out.push_str(&format!(
            "{:<24} {:>8} {:>14} {:>10}",
            truncate(&supplier, 24),
            otif,
            savings,
            cycle
        ));
        out.push('\n');
    }

    out
}

/// Cell text for one supplier row, in [`TABLE_HEADERS`] order.
pub fn table_cells(r: &SupplierRecord) -> [String; 4] {
    [
        r.supplier.clone(),
        format!("{:.1}", r.otif_pct),
        format!("{:.2}", r.savings_usd),
        format!("{:.1}", r.cycle_days),
    ]
}

/// One month label per line, marking the default (newest) month.
pub fn format_month_list() -> String {
    let mut out = String::new();
    for (i, month) in REPORT_MONTHS.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        out.push_str(&format!("{}{marker}\n", month.label()));
    }
    out
}

/// Default month shown on startup.
pub fn default_month() -> MonthKey {
    REPORT_MONTHS[0]
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Dataset;
    use crate::report::summarize;

    fn view(records: Vec<SupplierRecord>) -> ReportView {
        let dataset = Arc::new(Dataset::new(REPORT_MONTHS[1], records));
        let metrics = summarize(&dataset);
        ReportView {
            month: REPORT_MONTHS[1],
            dataset,
            metrics,
        }
    }

    #[test]
    fn report_contains_all_sections() {
        let txt = format_report(
            &view(vec![SupplierRecord {
                supplier: "Acme Freight".to_string(),
                otif_pct: 92.5,
                savings_usd: 12000.0,
                cycle_days: 4.0,
            }]),
            &ReportConfig::default(),
        );

        assert!(txt.starts_with("=== Procurement GT Monthly Reports - Nov 2025 ===\n"));
        assert!(txt.contains("Nov 2025 Activities\n"));
        assert!(txt.contains("[image] images/process_map.png (Procurement Flow)\n"));
        assert!(txt.contains("Acme Freight"));
        assert!(txt.contains("12000.00"));
        assert!(txt.contains("Total Savings : $12,000.00\n"));
        assert!(txt.contains("Avg Cycle Time: 4.0 days\n"));
        assert!(txt.contains("[video] videos/demo.mp4\n"));
    }

    #[test]
    fn empty_month_still_formats() {
        let txt = format_report(&view(Vec::new()), &ReportConfig::default());
        assert!(txt.contains("(no suppliers reported)"));
        assert!(txt.contains("Avg Cycle Time: N/A\n"));
    }

    #[test]
    fn month_list_marks_default() {
        assert_eq!(format_month_list(), "Dec 2025 (default)\nNov 2025\nOct 2025\n");
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
