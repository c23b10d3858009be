//! Download-style file naming and scoped writes

use std::io::Write;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;

use crate::error::{MandalaError, Result};

static INVALID_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).unwrap());

/// Replace characters that are not allowed in file names with `_`
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned = INVALID_FILE_CHARS.replace_all(name.trim(), "_");
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.into_owned()
    }
}

pub fn checklist_csv_name(dimension: &str) -> String {
    format!("{}_任務檢核表.csv", sanitize_file_stem(dimension))
}

pub fn checklist_docx_name(dimension: &str) -> String {
    format!("{}_任務檢核表.docx", sanitize_file_stem(dimension))
}

pub fn report_docx_name(topic: &str) -> String {
    format!("{}_曼陀羅思考報告.docx", sanitize_file_stem(topic))
}

/// Write `bytes` to `dir/file_name` through a temporary file in the same
/// directory. The temporary is removed on any failure; the target only
/// appears once the write completed.
pub fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = dir.join(file_name);
    let export_err = |what: &str, e: std::io::Error| MandalaError::ExportFailure {
        message: format!("{} {}: {}", what, target.display(), e),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| export_err("cannot stage", e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| export_err("cannot write", e))?;
    tmp.persist(&target)
        .map_err(|e| export_err("cannot save", e.error))?;

    tracing::info!("exported {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_names() {
        assert_eq!(checklist_csv_name("財務"), "財務_任務檢核表.csv");
        assert_eq!(checklist_docx_name("財務"), "財務_任務檢核表.docx");
        assert_eq!(report_docx_name("開店"), "開店_曼陀羅思考報告.docx");
    }

    #[test]
    fn test_sanitize_replaces_separators() {
        assert_eq!(sanitize_file_stem("a/b\\c:d?"), "a_b_c_d_");
        assert_eq!(sanitize_file_stem("   "), "untitled");
    }

    #[test]
    fn test_write_export_creates_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), "out.csv", b"hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_export_missing_dir_is_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            write_export(&missing, "out.csv", b"x"),
            Err(MandalaError::ExportFailure { .. })
        ));
    }
}
