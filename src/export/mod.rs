//! Export formatters: plain text, checklist CSV, structured documents, SVG

pub mod checklist_csv;
pub mod document;
pub mod docx;
pub mod files;
pub mod svg;
pub mod text;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ChecklistItem, MandalaResult};

pub use checklist_csv::checklist_csv;
pub use document::{Block, Document, DocumentEncoder, Run, checklist_document, report_document};
pub use docx::DocxEncoder;
pub use svg::{dashboard_svg, grid_svg};
pub use text::plain_text;

/// Save the checklist as `<dimension>_任務檢核表.csv` in `dir`
pub fn save_checklist_csv(dir: &Path, dimension: &str, items: &[ChecklistItem]) -> Result<PathBuf> {
    let csv = checklist_csv(items);
    files::write_export(dir, &files::checklist_csv_name(dimension), csv.as_bytes())
}

/// Encode and save the checklist document. Nothing is written if encoding fails.
pub fn save_checklist_document(
    dir: &Path,
    encoder: &dyn DocumentEncoder,
    topic: &str,
    dimension: &str,
    items: &[ChecklistItem],
) -> Result<PathBuf> {
    let bytes = encoder.encode(&checklist_document(topic, dimension, items))?;
    files::write_export(dir, &files::checklist_docx_name(dimension), &bytes)
}

/// Encode and save the full report document. Nothing is written if encoding fails.
pub fn save_report_document(
    dir: &Path,
    encoder: &dyn DocumentEncoder,
    topic: &str,
    result: &MandalaResult,
) -> Result<PathBuf> {
    let bytes = encoder.encode(&report_document(topic, result))?;
    files::write_export(dir, &files::report_docx_name(topic), &bytes)
}
