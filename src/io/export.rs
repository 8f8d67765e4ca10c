//! Write report outputs to disk or stdout.
//!
//! - PDF documents are written atomically (temp file + rename)
//! - JSON snapshots are meant for scripts and spreadsheets

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::pipeline::ReportView;
use crate::domain::SupplierRecord;
use crate::error::AppError;
use crate::io::pdf::ReportDocument;
use crate::report::MetricsSummary;

/// Save a rendered document under `dir` using its download name.
///
/// The bytes go to a hidden `.part` file first and are renamed into place, so
/// a failed write never leaves a truncated PDF behind.
pub fn save_document(dir: &Path, doc: &ReportDocument) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::usage(format!("Failed to create output dir '{}': {e}", dir.display())))?;

    let path = dir.join(&doc.file_name);
    let tmp = dir.join(format!(".{}.part", doc.file_name));

    if let Err(e) = fs::write(&tmp, &doc.bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::usage(format!("Failed to write '{}': {e}", tmp.display())));
    }
    fs::rename(&tmp, &path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        AppError::usage(format!("Failed to move report into '{}': {e}", path.display()))
    })?;

    tracing::info!(path = %path.display(), bytes = doc.bytes.len(), "saved report");
    Ok(path)
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    month: String,
    suppliers: &'a [SupplierRecord],
    metrics: &'a MetricsSummary,
}

/// Write a month's dataset and metrics as pretty-printed JSON.
pub fn write_snapshot_json<W: Write>(mut out: W, view: &ReportView) -> Result<(), AppError> {
    let snapshot = Snapshot {
        month: view.month.label(),
        suppliers: view.dataset.records(),
        metrics: &view.metrics,
    };
    serde_json::to_writer_pretty(&mut out, &snapshot)
        .map_err(|e| AppError::usage(format!("Failed to write JSON snapshot: {e}")))?;
    writeln!(out).map_err(|e| AppError::usage(format!("Failed to write JSON snapshot: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Dataset, REPORT_MONTHS};
    use crate::io::pdf::PDF_CONTENT_TYPE;
    use crate::report::summarize;

    #[test]
    fn save_document_leaves_only_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ReportDocument {
            file_name: "Dec 2025_report.pdf".to_string(),
            content_type: PDF_CONTENT_TYPE,
            bytes: b"%PDF-1.3 test".to_vec(),
        };

        let path = save_document(&dir.path().join("out"), &doc).unwrap();
        assert_eq!(fs::read(&path).unwrap(), doc.bytes);

        let names: Vec<_> = fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["Dec 2025_report.pdf".to_string()]);
    }

    #[test]
    fn snapshot_json_shape() {
        let month = REPORT_MONTHS[0];
        let dataset = Arc::new(Dataset::new(
            month,
            vec![SupplierRecord {
                supplier: "A".to_string(),
                otif_pct: 90.0,
                savings_usd: 100.0,
                cycle_days: 5.0,
            }],
        ));
        let view = ReportView {
            month,
            metrics: summarize(&dataset),
            dataset,
        };

        let mut buf = Vec::new();
        write_snapshot_json(&mut buf, &view).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["month"], "Dec 2025");
        assert_eq!(v["suppliers"][0]["supplier"], "A");
        assert_eq!(v["metrics"]["total_savings"], 100.0);
        assert_eq!(v["metrics"]["avg_cycle_days"], 5.0);
    }
}
