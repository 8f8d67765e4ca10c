//! Summary metrics shown under the supplier chart.

use serde::Serialize;

use crate::domain::Dataset;

/// Displayed when a metric is undefined (average over zero suppliers).
pub const NOT_AVAILABLE: &str = "N/A";

/// Aggregates derived from one month's dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub total_savings: f64,
    /// Mean cycle time in days; `None` for an empty dataset.
    pub avg_cycle_days: Option<f64>,
}

impl MetricsSummary {
    /// `"4.0 days"`, or `"N/A"` when there is nothing to average.
    pub fn avg_cycle_display(&self) -> String {
        match self.avg_cycle_days {
            Some(v) => format!("{v:.1} days"),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn total_savings_display(&self) -> String {
        format_usd(self.total_savings)
    }
}

/// Compute total savings and average cycle time.
pub fn summarize(dataset: &Dataset) -> MetricsSummary {
    let records = dataset.records();
    let total_savings = records.iter().map(|r| r.savings_usd).sum();
    let avg_cycle_days = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.cycle_days).sum::<f64>() / records.len() as f64)
    };

    MetricsSummary {
        total_savings,
        avg_cycle_days,
    }
}

/// Format a currency amount with thousands separators, e.g. `$12,345.50`.
pub fn format_usd(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let cents = (v.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac:02}")
}
