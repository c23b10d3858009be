// Checklist CSV export

use crate::models::ChecklistItem;

pub const UTF8_BOM: &str = "\u{feff}";
pub const CSV_HEADER: &str = "任務名稱,狀態,重要性 (1-5),任務說明";
pub const STATUS_DONE: &str = "已完成";
pub const STATUS_PENDING: &str = "待執行";

pub fn status_label(completed: bool) -> &'static str {
    if completed { STATUS_DONE } else { STATUS_PENDING }
}

/// Wrap in double quotes, doubling any embedded quote
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// BOM, bare header row, then one row per item. Text fields are always quoted
/// (even when they look numeric); importance is written unquoted.
pub fn checklist_csv(items: &[ChecklistItem]) -> String {
    let mut out = String::with_capacity(64 * (items.len() + 1));
    out.push_str(UTF8_BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for item in items {
        let row = [
            quote(&item.task),
            quote(status_label(item.completed())),
            item.importance.to_string(),
            quote(&item.description),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
