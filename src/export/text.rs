//! Plain-text report used for clipboard copy

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::models::MandalaResult;

pub const REPORT_TITLE_PREFIX: &str = "曼陀羅思考報告：";
pub const CORE_CONCEPT_LABEL: &str = "核心概念：";
pub const DIMENSIONS_HEADER: &str = "【八大面向】";
pub const SUB_GRIDS_HEADER: &str = "【細部展開】";
pub const SUMMARY_HEADER: &str = "【總結】";
pub const ACTIONS_HEADER: &str = "【行動建議】";
pub const SUB_GRID_MARKER: &str = "■ ";
pub const BULLET: &str = "- ";

/// Collapse line breaks inside a field to single spaces so every value stays on
/// its own line of the report
fn one_line(field: &str) -> Cow<'_, str> {
    if !field.contains(['\r', '\n']) {
        return Cow::Borrowed(field);
    }
    let joined = field
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(joined)
}

/// Render the full report. Sections are separated by one blank line and the
/// output always ends with a newline. Line breaks inside a field become a
/// single space.
pub fn plain_text(topic: &str, result: &MandalaResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{REPORT_TITLE_PREFIX}{}", one_line(topic));
    let _ = writeln!(out, "{CORE_CONCEPT_LABEL}{}", one_line(&result.core_concept));
    out.push('\n');

    let _ = writeln!(out, "{DIMENSIONS_HEADER}");
    for (i, dim) in result.main_dimensions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, one_line(dim));
    }
    out.push('\n');

    let _ = writeln!(out, "{SUB_GRIDS_HEADER}");
    for (i, grid) in result.sub_grids.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{SUB_GRID_MARKER}{}", one_line(&grid.title));
        for item in &grid.items {
            let _ = writeln!(out, "{BULLET}{}", one_line(item));
        }
    }
    out.push('\n');

    let _ = writeln!(out, "{SUMMARY_HEADER}");
    let _ = writeln!(out, "{}", one_line(&result.summary));
    out.push('\n');

    let _ = writeln!(out, "{ACTIONS_HEADER}");
    for action in &result.actions {
        let _ = writeln!(out, "{BULLET}{}", one_line(action));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubGrid, fixtures::sample_result};

    #[test]
    fn test_fixed_fixture_is_byte_exact() {
        let result = MandalaResult {
            core_concept: "C".to_string(),
            main_dimensions: vec!["A".to_string(), "B".to_string()],
            sub_grids: vec![
                SubGrid {
                    title: "A".to_string(),
                    items: vec!["a1".to_string()],
                },
                SubGrid {
                    title: "B".to_string(),
                    items: vec!["b1".to_string(), "b2".to_string()],
                },
            ],
            summary: "S".to_string(),
            actions: vec!["X".to_string()],
        };
        let expected = "曼陀羅思考報告：T\n核心概念：C\n\n【八大面向】\n1. A\n2. B\n\n【細部展開】\n■ A\n- a1\n\n■ B\n- b1\n- b2\n\n【總結】\nS\n\n【行動建議】\n- X\n";
        assert_eq!(plain_text("T", &result), expected);
    }

    #[test]
    fn test_empty_actions_keeps_header() {
        let mut result = sample_result();
        result.actions.clear();
        let text = plain_text("T", &result);
        assert!(text.ends_with("【行動建議】\n"));
        assert!(!text.split("【行動建議】").nth(1).unwrap().contains(BULLET));
    }

    #[test]
    fn test_line_breaks_inside_fields_are_flattened() {
        let mut result = sample_result();
        result.actions = vec!["a\n- b".to_string()];
        result.summary = "first\r\n\r\nsecond".to_string();
        let text = plain_text("T", &result);
        assert!(text.contains("【總結】\nfirst second\n"));
        assert!(text.ends_with("【行動建議】\n- a - b\n"));
    }

    #[test]
    fn test_one_line_borrows_when_clean() {
        assert!(matches!(one_line("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_dimensions_are_numbered_in_order() {
        let text = plain_text("T", &sample_result());
        assert!(text.contains("1. D1\n2. D2\n"));
        assert!(text.contains("8. D8\n"));
    }
}
