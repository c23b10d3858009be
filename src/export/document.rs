//! Structured document model shared by the report and checklist exports.
//!
//! Builders here decide block order and text; encoders (see `docx`) decide bytes.

use serde::Serialize;

use crate::dashboard::compose_dashboard;
use crate::error::Result;
use crate::export::checklist_csv::status_label;
use crate::export::text::{
    ACTIONS_HEADER, CORE_CONCEPT_LABEL, DIMENSIONS_HEADER, REPORT_TITLE_PREFIX, SUB_GRIDS_HEADER,
    SUMMARY_HEADER,
};
use crate::models::{ChecklistItem, MandalaResult};

pub const ACCENT_COLOR: &str = "4F46E5";
pub const MUTED_COLOR: &str = "6B7280";
pub const STAR_COLOR: &str = "F59E0B";
pub const DONE_COLOR: &str = "16A34A";
const GRID_OVERVIEW_HEADER: &str = "九宮格總覽";
const EMPTY_CHECKLIST_TEXT: &str = "（尚無任務）";

/// A styled span of text inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub color: Option<String>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            color: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Heading { level: u8, text: String },
    Paragraph { runs: Vec<Run> },
    Bullet { runs: Vec<Run> },
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![Run::plain(text)],
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Block::Bullet {
            runs: vec![Run::plain(text)],
        }
    }

    /// Concatenated visible text, styling dropped
    pub fn text(&self) -> String {
        match self {
            Block::Title { text } | Block::Heading { text, .. } => text.clone(),
            Block::Paragraph { runs } | Block::Bullet { runs } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    fn new(title: String) -> Self {
        Self {
            blocks: vec![Block::Title {
                text: title.clone(),
            }],
            title,
        }
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Encodes a document into a binary file format
pub trait DocumentEncoder {
    fn encode(&self, document: &Document) -> Result<Vec<u8>>;
}

/// Full Mandala report: title, core concept, dimensions, 9x9 overview,
/// sub-grids, summary, actions
pub fn report_document(topic: &str, result: &MandalaResult) -> Document {
    let mut doc = Document::new(format!("{REPORT_TITLE_PREFIX}{topic}"));
    doc.push(Block::Paragraph {
        runs: vec![
            Run::bold(CORE_CONCEPT_LABEL).colored(ACCENT_COLOR),
            Run::plain(&result.core_concept),
        ],
    });

    doc.push(Block::heading(1, strip_brackets(DIMENSIONS_HEADER)));
    for (i, dim) in result.main_dimensions.iter().enumerate() {
        doc.push(Block::bullet(format!("{}. {}", i + 1, dim)));
    }

    doc.push(Block::heading(1, GRID_OVERVIEW_HEADER));
    for row in compose_dashboard(topic, result).matrix() {
        doc.push(Block::Paragraph {
            runs: vec![Run::plain(row.join(" | ")).colored(MUTED_COLOR)],
        });
    }

    doc.push(Block::heading(1, strip_brackets(SUB_GRIDS_HEADER)));
    for grid in &result.sub_grids {
        doc.push(Block::heading(2, &grid.title));
        for item in &grid.items {
            doc.push(Block::bullet(item));
        }
    }

    doc.push(Block::heading(1, strip_brackets(SUMMARY_HEADER)));
    doc.push(Block::paragraph(&result.summary));

    doc.push(Block::heading(1, strip_brackets(ACTIONS_HEADER)));
    for action in &result.actions {
        doc.push(Block::bullet(action));
    }
    doc
}

/// Checklist for one dimension, one heading plus rating/status/description per task
pub fn checklist_document(topic: &str, dimension: &str, items: &[ChecklistItem]) -> Document {
    let mut doc = Document::new(format!("{dimension} 任務檢核表"));
    doc.push(Block::Paragraph {
        runs: vec![Run::plain(format!("主題：{topic}")).colored(MUTED_COLOR)],
    });

    if items.is_empty() {
        doc.push(Block::paragraph(EMPTY_CHECKLIST_TEXT));
        return doc;
    }

    for (i, item) in items.iter().enumerate() {
        doc.push(Block::heading(2, format!("{}. {}", i + 1, item.task)));
        doc.push(Block::Paragraph {
            runs: vec![
                Run::bold("重要性："),
                Run::plain(item.star_rating()).colored(STAR_COLOR),
            ],
        });
        let status = Run::plain(status_label(item.completed()));
        doc.push(Block::Paragraph {
            runs: vec![
                Run::bold("狀態："),
                if item.completed() {
                    status.colored(DONE_COLOR)
                } else {
                    status
                },
            ],
        });
        doc.push(Block::bullet(&item.description));
    }
    doc
}

fn strip_brackets(header: &str) -> &str {
    header.trim_start_matches('【').trim_end_matches('】')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_result;

    #[test]
    fn test_report_block_order() {
        let doc = report_document("TOPIC", &sample_result());
        let headings: Vec<String> = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { level: 1, .. }))
            .map(Block::text)
            .collect();
        assert_eq!(
            headings,
            vec!["八大面向", "九宮格總覽", "細部展開", "總結", "行動建議"]
        );
        assert_eq!(doc.blocks[0].text(), "曼陀羅思考報告：TOPIC");
        assert_eq!(doc.blocks[1].text(), "核心概念：Core");
        assert_eq!(doc.blocks.last().unwrap().text(), "Act two");
    }

    #[test]
    fn test_report_overview_matches_dashboard() {
        let doc = report_document("TOPIC", &sample_result());
        let start = doc
            .blocks
            .iter()
            .position(|b| b.text() == "九宮格總覽")
            .unwrap();
        let middle_row = doc.blocks[start + 5].text();
        assert!(middle_row.contains("D4 | TOPIC | D5"));
    }

    #[test]
    fn test_checklist_stars_and_status() {
        let mut items = vec![
            ChecklistItem::new("Plan", "Write plan", 4),
            ChecklistItem::new("Ship", "Ship it", 2),
        ];
        items[0].is_completed = Some(true);
        let doc = checklist_document("Cafe", "Finance", &items);
        let texts: Vec<String> = doc.blocks.iter().map(Block::text).collect();
        assert_eq!(texts[0], "Finance 任務檢核表");
        assert_eq!(texts[1], "主題：Cafe");
        assert_eq!(texts[2], "1. Plan");
        assert_eq!(texts[3], "重要性：★★★★☆");
        assert_eq!(texts[4], "狀態：已完成");
        assert_eq!(texts[5], "Write plan");
        assert_eq!(texts[7], "重要性：★★☆☆☆");
        assert_eq!(texts[8], "狀態：待執行");
    }

    #[test]
    fn test_empty_checklist_document_is_valid() {
        let doc = checklist_document("Cafe", "Finance", &[]);
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[2].text(), EMPTY_CHECKLIST_TEXT);
    }
}
