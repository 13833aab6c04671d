//! Extraction of the server's error message from FastAPI-style bodies.

use serde_json::Value;

/// Pulls the human-readable message out of an error body.
///
/// Handles `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "..."}, ...]}`; returns `None` for anything else.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let message = match value.get("detail")? {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => return None,
        other => other.to_string(),
    };

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Este horario ya está reservado"}"#).as_deref(),
            Some("Este horario ya está reservado")
        );
    }

    #[test]
    fn test_validation_list_detail() {
        let body = r#"{"detail": [
            {"loc": ["body", "time"], "msg": "invalid time format", "type": "value_error"},
            {"loc": ["body", "date"], "msg": "field required", "type": "missing"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("invalid time format; field required")
        );
    }

    #[test]
    fn test_missing_or_unparseable_detail() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": null}"#), None);
        assert_eq!(extract_detail(r#"{"detail": "   "}"#), None);
    }
}
