//! Response schemas sent with structured generation requests

use once_cell::sync::Lazy;
use serde_json::{Value, json};

static MANDALA_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let eight_strings = json!({
        "type": "ARRAY",
        "items": {"type": "STRING"},
        "minItems": 8,
        "maxItems": 8
    });
    json!({
        "type": "OBJECT",
        "properties": {
            "coreConcept": {"type": "STRING", "description": "One-sentence restatement of the topic"},
            "mainDimensions": eight_strings,
            "subGrids": {
                "type": "ARRAY",
                "minItems": 8,
                "maxItems": 8,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "items": eight_strings
                    },
                    "required": ["title", "items"]
                }
            },
            "summary": {"type": "STRING"},
            "actions": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["coreConcept", "mainDimensions", "subGrids", "summary", "actions"]
    })
});

static CHECKLIST_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "task": {"type": "STRING"},
                "description": {"type": "STRING"},
                "importance": {"type": "INTEGER", "minimum": 1, "maximum": 5}
            },
            "required": ["task", "description", "importance"]
        }
    })
});

/// Schema for the 9x9 Mandala breakdown
pub fn mandala_schema() -> Value {
    MANDALA_SCHEMA.clone()
}

/// Schema for a per-dimension task list
pub fn checklist_schema() -> Value {
    CHECKLIST_SCHEMA.clone()
}
