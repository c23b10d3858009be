//! Request construction for the Mandala and checklist generation calls

use serde::Serialize;
use serde_json::Value;

use crate::schemas::{checklist_schema, mandala_schema};

pub const CHECKLIST_MIN_TASKS: usize = 6;
pub const CHECKLIST_MAX_TASKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Mandala,
    Checklist,
}

/// Prompt text plus the JSON schema the model must answer with
#[derive(Debug, Clone, Serialize)]
pub struct StructuredRequest {
    pub kind: RequestKind,
    pub prompt: String,
    pub schema: Value,
}

/// Main generation request: topic → 8 dimensions × 8 items
pub fn build_mandala_prompt(topic: &str) -> StructuredRequest {
    let prompt = format!(
        "你是一位擅長「曼陀羅思考法」的顧問。請針對主題「{topic}」進行九宮格展開：\n\
         1. 用一句話寫出核心概念 (coreConcept)。\n\
         2. 列出 8 個彼此不重疊的主要面向 (mainDimensions)，剛好 8 個。\n\
         3. 針對每個面向依相同順序建立子九宮格 (subGrids)，title 為該面向名稱，items 剛好 8 個具體項目。\n\
         4. 寫一段整體總結 (summary)。\n\
         5. 提供數個可立即執行的行動建議 (actions)。\n\
         請使用繁體中文，每個項目保持簡短，並只輸出符合結構的 JSON。"
    );
    StructuredRequest {
        kind: RequestKind::Mandala,
        prompt,
        schema: mandala_schema(),
    }
}

/// Checklist request for one dimension of a topic
pub fn build_checklist_prompt(topic: &str, dimension: &str) -> StructuredRequest {
    let prompt = format!(
        "主題是「{topic}」，請聚焦在面向「{dimension}」。\n\
         請列出 {CHECKLIST_MIN_TASKS} 到 {CHECKLIST_MAX_TASKS} 個具體、可執行的任務。\n\
         每個任務包含：task (任務名稱)、description (一句話說明如何執行)、\
         importance (重要性，1 到 5 的整數，5 為最重要)。\n\
         請使用繁體中文，並以 JSON 陣列輸出。"
    );
    StructuredRequest {
        kind: RequestKind::Checklist,
        prompt,
        schema: checklist_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_prompt_mentions_inputs_and_bounds() {
        let req = build_checklist_prompt("開咖啡店", "財務規劃");
        assert_eq!(req.kind, RequestKind::Checklist);
        assert!(req.prompt.contains("開咖啡店"));
        assert!(req.prompt.contains("財務規劃"));
        assert!(req.prompt.contains("6 到 10"));
        assert!(req.prompt.contains("importance"));
        assert_eq!(req.schema["type"], "ARRAY");
    }

    #[test]
    fn test_mandala_prompt_carries_schema() {
        let req = build_mandala_prompt("學習 Rust");
        assert_eq!(req.kind, RequestKind::Mandala);
        assert!(req.prompt.contains("學習 Rust"));
        assert_eq!(req.schema["type"], "OBJECT");
    }
}
