//! Custom deserializers for tolerant parsing of model output.
//!
//! Models occasionally emit `"4"` or `4.0` where the schema asks for an integer.
//! These helpers accept those shapes while keeping the Rust types strict.

use serde::{Deserialize, Deserializer};

/// Deserializes a checklist importance rating.
///
/// # Accepted Formats
///
/// * **Integer**: `3`
/// * **Float**: `3.0` → 3 (rounded)
/// * **String numeric**: `"3"` → 3
///
/// Values outside 1-5 are kept as parsed (saturating at 0 and 255); display code
/// clamps them.
///
/// # Errors
///
/// Returns an error for non-numeric strings, booleans, arrays, objects and null.
pub fn de_importance<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let v = serde_json::Value::deserialize(deserializer)?;
    let val = match v {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("invalid numeric for importance"))?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            D::Error::custom(format!("importance '{}' is not a number", s.trim()))
        })?,
        other => {
            return Err(D::Error::custom(format!(
                "importance must be a number, got {}",
                other
            )));
        }
    };
    let rounded = val.round();
    if !rounded.is_finite() {
        return Err(D::Error::custom("non-finite importance"));
    }
    Ok(rounded.clamp(0.0, u8::MAX as f64) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "de_importance")]
        importance: u8,
    }

    fn parse(json: &str) -> Result<u8, serde_json::Error> {
        serde_json::from_str::<Probe>(json).map(|p| p.importance)
    }

    #[test]
    fn test_accepts_numeric_shapes() {
        assert_eq!(parse(r#"{"importance":4}"#).unwrap(), 4);
        assert_eq!(parse(r#"{"importance":2.6}"#).unwrap(), 3);
        assert_eq!(parse(r#"{"importance":" 5 "}"#).unwrap(), 5);
        assert_eq!(parse(r#"{"importance":-3}"#).unwrap(), 0);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(parse(r#"{"importance":"high"}"#).is_err());
        assert!(parse(r#"{"importance":true}"#).is_err());
        assert!(parse(r#"{"importance":null}"#).is_err());
    }
}
