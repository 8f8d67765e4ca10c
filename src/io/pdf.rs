//! PDF export of a month's report.
//!
//! The document uses the built-in Helvetica faces so no font files need to be
//! shipped. Text for built-in fonts is written in WinAnsi (Windows-1252)
//! encoding, which silently drops anything it cannot map, so such text is
//! rejected up front instead of producing a document with missing glyphs.

use std::io::{BufWriter, Cursor};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::domain::{Dataset, MonthKey};
use crate::error::AppError;
use crate::report::{TABLE_HEADERS, summarize, table_cells, truncate};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;
const ROW_HEIGHT_MM: f64 = 7.0;
const TITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 11.0;
/// Left edge of each table column, in [`TABLE_HEADERS`] order.
const COLUMN_X_MM: [f64; 4] = [MARGIN_MM, 95.0, 125.0, 165.0];
const SUPPLIER_MAX_CHARS: usize = 34;

/// A rendered report, ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `dataset` for `month` into a PDF.
///
/// The first page carries the title line `Procurement Report: <month>`,
/// followed by the supplier table and the summary metrics. The table
/// continues on further pages when it does not fit.
pub fn export_pdf(month: MonthKey, dataset: &Dataset) -> Result<ReportDocument, AppError> {
    let title = format!("Procurement Report: {month}");
    let lines = body_lines(month, dataset);
    ensure_winansi(&title)?;
    for line in &lines {
        for cell in line.cells() {
            ensure_winansi(cell)?;
        }
    }

    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::pdf(format!("Failed to load PDF font: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::pdf(format!("Failed to load PDF font: {e}")))?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    let title_x = ((PAGE_WIDTH_MM - text_width_mm(&title, TITLE_SIZE)) / 2.0).max(MARGIN_MM);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
    layer.use_text(title.clone(), TITLE_SIZE, Mm(title_x), Mm(y), &fonts.bold);
    y -= ROW_HEIGHT_MM * 2.0;

    let mut pages = 1usize;
    for line in &lines {
        if y < MARGIN_MM {
            layer = new_page(&doc, pages + 1);
            pages += 1;
            y = PAGE_HEIGHT_MM - MARGIN_MM;
            if matches!(line, Line::Row(_)) {
                draw_line(&layer, &fonts, &Line::Header, y);
                y -= ROW_HEIGHT_MM;
            }
        }
        draw_line(&layer, &fonts, line, y);
        y -= ROW_HEIGHT_MM;
    }

    let mut writer = BufWriter::new(Cursor::new(Vec::new()));
    doc.save(&mut writer)
        .map_err(|e| AppError::pdf(format!("Failed to assemble PDF for {month}: {e}")))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::pdf(format!("Failed to flush PDF for {month}: {e}")))?
        .into_inner();

    tracing::info!(%month, pages, bytes = bytes.len(), "rendered PDF report");

    Ok(ReportDocument {
        file_name: month.report_file_name(),
        content_type: PDF_CONTENT_TYPE,
        bytes,
    })
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// One line of the document body below the title.
enum Line {
    Text(String),
    Header,
    Row([String; 4]),
    Blank,
}

impl Line {
    fn cells(&self) -> Vec<&str> {
        match self {
            Line::Text(s) => vec![s.as_str()],
            Line::Header => TABLE_HEADERS.to_vec(),
            Line::Row(cells) => cells.iter().map(String::as_str).collect(),
            Line::Blank => Vec::new(),
        }
    }
}

fn body_lines(month: MonthKey, dataset: &Dataset) -> Vec<Line> {
    let metrics = summarize(dataset);
    let mut lines = vec![
        Line::Text(format!("Generated: {}", chrono::Local::now().format("%Y-%m-%d"))),
        Line::Text(format!("Suppliers reported for {month}: {}", dataset.len())),
        Line::Blank,
    ];

    if dataset.is_empty() {
        lines.push(Line::Text("No supplier data for this month.".to_string()));
    } else {
        lines.push(Line::Header);
        for record in dataset.records() {
            let mut cells = table_cells(record);
            cells[0] = truncate(&cells[0], SUPPLIER_MAX_CHARS);
            lines.push(Line::Row(cells));
        }
    }

    lines.push(Line::Blank);
    lines.push(Line::Text(format!("Total Savings: {}", metrics.total_savings_display())));
    lines.push(Line::Text(format!("Avg Cycle Time: {}", metrics.avg_cycle_display())));
    lines
}

fn draw_line(layer: &PdfLayerReference, fonts: &Fonts, line: &Line, y: f64) {
    match line {
        Line::Text(text) => layer.use_text(text.clone(), BODY_SIZE, Mm(MARGIN_MM), Mm(y), &fonts.regular),
        Line::Header => {
            for (x, cell) in COLUMN_X_MM.iter().zip(TABLE_HEADERS) {
                layer.use_text(cell, BODY_SIZE, Mm(*x), Mm(y), &fonts.bold);
            }
        }
        Line::Row(cells) => {
            for (x, cell) in COLUMN_X_MM.iter().zip(cells) {
                layer.use_text(cell.clone(), BODY_SIZE, Mm(*x), Mm(y), &fonts.regular);
            }
        }
        Line::Blank => {}
    }
}

fn new_page(doc: &PdfDocumentReference, number: usize) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Page {number}"));
    doc.get_page(page).get_layer(layer)
}

/// Characters Windows-1252 places in `0x80..=0x9F`, where Latin-1 has C1
/// control codes.
const WINANSI_EXTRAS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–', '—', '˜',
    '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

fn is_winansi(c: char) -> bool {
    !c.is_control() && (u32::from(c) <= 0xFF || WINANSI_EXTRAS.contains(&c))
}

fn ensure_winansi(text: &str) -> Result<(), AppError> {
    match text.chars().find(|c| !is_winansi(*c)) {
        None => Ok(()),
        Some(c) => Err(AppError::pdf(format!(
            "Cannot encode U+{:04X} in {text:?}: PDF text must be WinAnsi (Windows-1252).",
            u32::from(c)
        ))),
    }
}

/// Rough Helvetica width: half an em per character.
fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    const MM_PER_PT: f64 = 25.4 / 72.0;
    text.chars().count() as f64 * size_pt * 0.5 * MM_PER_PT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{REPORT_MONTHS, SupplierRecord};
    use crate::error::ErrorKind;

    fn record(supplier: &str) -> SupplierRecord {
        SupplierRecord {
            supplier: supplier.to_string(),
            otif_pct: 88.0,
            savings_usd: 1500.0,
            cycle_days: 4.0,
        }
    }

    #[test]
    fn output_is_a_pdf_named_after_the_month() {
        let month = REPORT_MONTHS[0];
        let doc = export_pdf(month, &Dataset::new(month, vec![record("A"), record("B")])).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.file_name, "Dec 2025_report.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }

    #[test]
    fn empty_dataset_still_exports() {
        let month = REPORT_MONTHS[2];
        let doc = export_pdf(month, &Dataset::new(month, Vec::new())).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_tables_paginate() {
        let month = REPORT_MONTHS[1];
        let records = (0..120).map(|i| record(&format!("Supplier {i}"))).collect();
        let doc = export_pdf(month, &Dataset::new(month, records)).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn winansi_names_are_accepted() {
        let month = REPORT_MONTHS[0];
        assert!(export_pdf(month, &Dataset::new(month, vec![record("Müller Logística")])).is_ok());
        assert!(export_pdf(month, &Dataset::new(month, vec![record("Œuvre “Tools” €")])).is_ok());
    }

    #[test]
    fn unencodable_text_fails_with_pdf_error() {
        let month = REPORT_MONTHS[0];
        let err = export_pdf(month, &Dataset::new(month, vec![record("東京 Supply")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PdfGeneration);
        assert!(err.message().contains("WinAnsi"), "{err}");
    }

    #[test]
    fn c1_control_codes_are_rejected() {
        let month = REPORT_MONTHS[0];
        for name in ["Acme\u{0085}Ltd", "Beta\u{009F}", "Tab\tCo"] {
            let err = export_pdf(month, &Dataset::new(month, vec![record(name)])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PdfGeneration, "{name:?}");
        }
        assert!(is_winansi('ÿ'));
        assert!(is_winansi('™'));
        assert!(!is_winansi('\u{0080}'));
    }
}
