//! CSV ingest for the per-month supplier files.
//!
//! Each report month has one CSV with a header row and one row per supplier:
//!
//! ```text
//! Supplier,OTIF %,Savings USD,Cycle Days
//! Acme Freight,92.5,12000,4
//! ```
//!
//! Header matching ignores case, surrounding whitespace and a UTF-8 BOM; extra
//! columns are ignored. Any structural or row-level problem fails the whole
//! load: a half-read month would silently understate the totals.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Dataset, MonthKey, SupplierRecord};
use crate::error::AppError;

pub const COL_SUPPLIER: &str = "Supplier";
pub const COL_OTIF: &str = "OTIF %";
pub const COL_SAVINGS: &str = "Savings USD";
pub const COL_CYCLE: &str = "Cycle Days";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SUPPLIER, COL_OTIF, COL_SAVINGS, COL_CYCLE];

/// Load a month's dataset from a CSV file on disk.
pub fn load_dataset_csv(path: &Path, month: MonthKey) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data_unavailable(format!(
            "Data for {month} is unavailable: failed to open '{}': {e}",
            path.display()
        ))
    })?;
    read_dataset(file, month, &path.display().to_string())
}

/// Parse a month's dataset from any CSV reader.
///
/// `source` is only used to make error messages point at the right file.
pub fn read_dataset<R: Read>(input: R, month: MonthKey, source: &str) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::data_unavailable(format!("Failed to read CSV headers from '{source}': {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map, source)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, lines are 1-based.
        let line = idx + 2;

        let record = result
            .map_err(|e| AppError::data_unavailable(format!("{source}:{line}: CSV parse error: {e}")))?;

        // Fully blank lines (e.g. a trailing separator row) carry no supplier.
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = parse_row(&record, &header_map)
            .map_err(|msg| AppError::data_unavailable(format!("{source}:{line}: {msg}")))?;

        if !(0.0..=100.0).contains(&row.otif_pct) {
            tracing::warn!(
                source,
                line,
                supplier = %row.supplier,
                otif = row.otif_pct,
                "OTIF percentage outside 0-100"
            );
        }
        records.push(row);
    }

    tracing::debug!(source, %month, rows = records.len(), "parsed supplier dataset");
    Ok(Dataset::new(month, records))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM; if we
    // don't strip it, the `Supplier` column is reported as missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>, source: &str) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !header_map.contains_key(&normalize_header_name(col)))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let list = missing
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::data_unavailable(format!(
        "'{source}' is missing required column(s): {list}"
    )))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SupplierRecord, String> {
    let supplier = get_required(record, header_map, COL_SUPPLIER)?.to_string();
    let otif_pct = parse_f64(get_required(record, header_map, COL_OTIF)?, COL_OTIF)?;
    let savings_usd = parse_f64(get_required(record, header_map, COL_SAVINGS)?, COL_SAVINGS)?;
    let cycle_days = parse_f64(get_required(record, header_map, COL_CYCLE)?, COL_CYCLE)?;

    if cycle_days < 0.0 {
        return Err(format!("Negative `{COL_CYCLE}` value ({cycle_days}) for supplier '{supplier}'."));
    }

    Ok(SupplierRecord {
        supplier,
        otif_pct,
        savings_usd,
        cycle_days,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(&normalize_header_name(name))
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid `{name}` value '{s}': expected a finite number.")),
    }
}
