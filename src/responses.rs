//! Parsing of model JSON text into typed results

use serde_json::Value;

use crate::error::{MandalaError, Result};
use crate::models::{ChecklistItem, MandalaResult};

/// Drop a surrounding markdown code fence if the model added one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and validate the main generation payload
pub fn parse_mandala(text: &str) -> Result<MandalaResult> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(MandalaError::EmptyResponse {
            message: "generation returned no JSON".to_string(),
        });
    }
    let result: MandalaResult = serde_json::from_str(body)?;
    result.validate()?;
    Ok(result)
}

/// Parse a checklist payload. Any array length is accepted.
pub fn parse_checklist(text: &str) -> Result<Vec<ChecklistItem>> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(MandalaError::EmptyResponse {
            message: "checklist returned no JSON".to_string(),
        });
    }
    let value: Value = serde_json::from_str(body)?;
    let array = match value {
        Value::Array(_) => value,
        // Some models wrap the list as {"tasks": [...]}
        Value::Object(map) => match map.into_iter().find(|(_, v)| v.is_array()) {
            Some((_, v)) => v,
            None => {
                return Err(MandalaError::MalformedResponse {
                    message: "checklist object carried no array".to_string(),
                });
            }
        },
        other => {
            return Err(MandalaError::MalformedResponse {
                message: format!("expected a JSON array, got {}", other),
            });
        }
    };
    let mut items: Vec<ChecklistItem> = serde_json::from_value(array)?;
    for item in &mut items {
        item.is_completed = None;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandala_json() -> String {
        let grids: Vec<Value> = (1..=8)
            .map(|i| {
                serde_json::json!({
                    "title": format!("D{i}"),
                    "items": (1..=8).map(|j| format!("D{i}-{j}")).collect::<Vec<_>>()
                })
            })
            .collect();
        serde_json::json!({
            "coreConcept": "core",
            "mainDimensions": (1..=8).map(|i| format!("D{i}")).collect::<Vec<_>>(),
            "subGrids": grids,
            "summary": "sum",
            "actions": ["a1"]
        })
        .to_string()
    }

    #[test]
    fn test_parse_valid_mandala() {
        let result = parse_mandala(&mandala_json()).unwrap();
        assert_eq!(result.main_dimensions.len(), 8);
        assert_eq!(result.sub_grids[7].items[7], "D8-8");
    }

    #[test]
    fn test_fenced_payload_is_accepted() {
        let fenced = format!("```json\n{}\n```", mandala_json());
        assert!(parse_mandala(&fenced).is_ok());
    }

    #[test]
    fn test_malformed_json_is_malformed_response() {
        assert!(matches!(
            parse_mandala("{\"coreConcept\": "),
            Err(MandalaError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_wrong_cardinality_is_malformed_response() {
        let mut v: Value = serde_json::from_str(&mandala_json()).unwrap();
        v["mainDimensions"].as_array_mut().unwrap().pop();
        assert!(matches!(
            parse_mandala(&v.to_string()),
            Err(MandalaError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_blank_payload_is_empty_response() {
        assert!(matches!(
            parse_checklist("  \n"),
            Err(MandalaError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_checklist_any_length_and_wrapped() {
        let items = parse_checklist(
            r#"{"tasks":[{"task":"t","description":"d","importance":"4","isCompleted":true}]}"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].importance, 4);
        assert_eq!(items[0].is_completed, None);
    }

    #[test]
    fn test_checklist_missing_field_is_malformed() {
        assert!(matches!(
            parse_checklist(r#"[{"task":"t","importance":3}]"#),
            Err(MandalaError::MalformedResponse { .. })
        ));
    }
}
