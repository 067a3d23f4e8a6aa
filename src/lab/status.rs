//! Interpretation of the boolean-like field returned by the lab sensors.
//!
//! The sensors are not consistent about how they report their state, so the
//! field may be a JSON boolean, a number or a word.

use serde_json::Value;

use crate::lab::LabError;

/// Reads `field` from a sensor JSON body and interprets it as a boolean.
///
/// # Errors
///
/// Returns [`LabError::Malformed`] if the body is not an object, if the field
/// is missing or if its value is not boolean-like.
pub fn parse_status(body: &Value, field: &str) -> Result<bool, LabError> {
    let Some(value) = body.get(field) else {
        return Err(LabError::Malformed(format!("missing field `{field}`")));
    };

    as_bool(value).ok_or_else(|| {
        LabError::Malformed(format!("field `{field}` is not boolean-like: {value}"))
    })
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" | "occupied" | "open" => Some(true),
            "false" | "off" | "no" | "0" | "empty" | "closed" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_status_bool() {
        assert!(parse_status(&json!({"state": true}), "state").unwrap());
        assert!(!parse_status(&json!({"state": false}), "state").unwrap());
    }

    #[test]
    fn test_parse_status_number() {
        assert!(parse_status(&json!({"state": 1}), "state").unwrap());
        assert!(parse_status(&json!({"state": 3}), "state").unwrap());
        assert!(!parse_status(&json!({"state": 0}), "state").unwrap());
    }

    #[test]
    fn test_parse_status_words() {
        assert!(parse_status(&json!({"state": "ON"}), "state").unwrap());
        assert!(parse_status(&json!({"state": " occupied "}), "state").unwrap());
        assert!(!parse_status(&json!({"state": "off"}), "state").unwrap());
        assert!(!parse_status(&json!({"state": "Closed"}), "state").unwrap());
    }

    #[test]
    fn test_parse_status_custom_field() {
        assert!(parse_status(&json!({"connected": true, "state": false}), "connected").unwrap());
    }

    #[test]
    fn test_parse_status_missing_field() {
        let result = parse_status(&json!({"other": true}), "state");
        assert!(matches!(result, Err(LabError::Malformed(reason)) if reason.contains("missing")));
    }

    #[test]
    fn test_parse_status_not_boolean_like() {
        assert!(parse_status(&json!({"state": "maybe"}), "state").is_err());
        assert!(parse_status(&json!({"state": null}), "state").is_err());
        assert!(parse_status(&json!({"state": [true]}), "state").is_err());
    }

    #[test]
    fn test_parse_status_not_an_object() {
        assert!(parse_status(&json!([true]), "state").is_err());
        assert!(parse_status(&json!("on"), "state").is_err());
    }
}
