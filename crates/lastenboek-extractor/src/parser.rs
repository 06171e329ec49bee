//! Parse and validate the model's JSON response

use crate::error::ExtractorError;
use lastenboek_domain::{ExtractedFields, FIELD_NAMES};
use serde_json::{Map, Value};

/// Parse a model response into extracted fields
///
/// The content must be a single JSON object whose keys are exactly the five
/// schema fields. The four text fields must be strings or `null`;
/// `extractionConfidence` must be a number. Values are otherwise taken as-is.
///
/// # Errors
///
/// Returns [`ExtractorError::SchemaViolation`] for anything else, including
/// empty content and markdown-wrapped JSON.
pub fn parse_model_response(content: &str) -> Result<ExtractedFields, ExtractorError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::SchemaViolation(
            "empty model response".to_string(),
        ));
    }

    let json: Value = serde_json::from_str(trimmed)
        .map_err(|e| ExtractorError::SchemaViolation(format!("JSON parse error: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::SchemaViolation("Expected JSON object".to_string()))?;

    check_keys(obj)?;

    Ok(ExtractedFields {
        architect: optional_string(obj, "architect")?,
        client: optional_string(obj, "client")?,
        date: optional_string(obj, "date")?,
        address: optional_string(obj, "address")?,
        extraction_confidence: obj
            .get("extractionConfidence")
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ExtractorError::SchemaViolation(
                    "'extractionConfidence' must be a number".to_string(),
                )
            })?,
    })
}

/// Require the key set to equal the schema exactly
fn check_keys(obj: &Map<String, Value>) -> Result<(), ExtractorError> {
    let missing: Vec<&str> = FIELD_NAMES
        .iter()
        .copied()
        .filter(|name| !obj.contains_key(*name))
        .collect();

    let unexpected: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|key| !FIELD_NAMES.contains(key))
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    let mut problems = Vec::new();
    if !missing.is_empty() {
        problems.push(format!("missing keys [{}]", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        problems.push(format!("unexpected keys [{}]", unexpected.join(", ")));
    }
    Err(ExtractorError::SchemaViolation(problems.join("; ")))
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, ExtractorError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(ExtractorError::SchemaViolation(format!(
            "'{}' must be a string or null, got {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(content: &str) -> String {
        match parse_model_response(content) {
            Err(ExtractorError::SchemaViolation(msg)) => msg,
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_response() {
        let response = r#"{
            "architect": "Jane Doe",
            "client": "Stad Antwerpen",
            "date": "2023-05-17",
            "address": "Grote Markt 1, 2000 Antwerpen",
            "extractionConfidence": 0.92
        }"#;

        let fields = parse_model_response(response).unwrap();
        assert_eq!(fields.architect.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.client.as_deref(), Some("Stad Antwerpen"));
        assert_eq!(fields.date.as_deref(), Some("2023-05-17"));
        assert_eq!(fields.address.as_deref(), Some("Grote Markt 1, 2000 Antwerpen"));
        assert_eq!(fields.extraction_confidence, 0.92);
    }

    #[test]
    fn test_parse_nulls() {
        let response = r#"{"architect":"Jane Doe","client":null,"date":null,"address":null,"extractionConfidence":0.8}"#;
        let fields = parse_model_response(response).unwrap();
        assert_eq!(fields.architect.as_deref(), Some("Jane Doe"));
        assert!(fields.client.is_none());
        assert!(fields.date.is_none());
        assert!(fields.address.is_none());
    }

    #[test]
    fn test_integer_confidence() {
        let response = r#"{"architect":null,"client":null,"date":null,"address":null,"extractionConfidence":1}"#;
        assert_eq!(parse_model_response(response).unwrap().extraction_confidence, 1.0);
    }

    #[test]
    fn test_values_are_not_normalized() {
        let response = r#"{"architect":"  X  ","client":"","date":"17 mei 2023","address":null,"extractionConfidence":7.5}"#;
        let fields = parse_model_response(response).unwrap();
        assert_eq!(fields.architect.as_deref(), Some("  X  "));
        assert_eq!(fields.client.as_deref(), Some(""));
        assert_eq!(fields.date.as_deref(), Some("17 mei 2023"));
        assert_eq!(fields.extraction_confidence, 7.5);
    }

    #[test]
    fn test_surrounding_whitespace_allowed() {
        let response = "\n  {\"architect\":null,\"client\":null,\"date\":null,\"address\":null,\"extractionConfidence\":0.1}  \n";
        assert!(parse_model_response(response).is_ok());
    }

    #[test]
    fn test_missing_address() {
        let msg = violation(r#"{"architect":null,"client":null,"date":null,"extractionConfidence":0.5}"#);
        assert!(msg.contains("missing keys [address]"));
    }

    #[test]
    fn test_extra_key() {
        let msg = violation(
            r#"{"architect":null,"client":null,"date":null,"address":null,"extractionConfidence":0.5,"notes":"x"}"#,
        );
        assert!(msg.contains("unexpected keys [notes]"));
    }

    #[test]
    fn test_missing_and_extra() {
        let msg = violation(r#"{"architect":null,"client":null,"date":null,"adres":null,"extractionConfidence":0.5}"#);
        assert!(msg.contains("missing keys [address]"));
        assert!(msg.contains("unexpected keys [adres]"));
    }

    #[test]
    fn test_invalid_json() {
        let msg = violation("This is not JSON");
        assert!(msg.contains("JSON parse error"));
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(violation("   "), "empty model response");
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(violation("[]"), "Expected JSON object");
        assert_eq!(violation("\"text\""), "Expected JSON object");
    }

    #[test]
    fn test_markdown_wrapped_json_rejected() {
        let response = "```json\n{\"architect\":null,\"client\":null,\"date\":null,\"address\":null,\"extractionConfidence\":0.5}\n```";
        violation(response);
    }

    #[test]
    fn test_wrong_types() {
        let msg = violation(r#"{"architect":42,"client":null,"date":null,"address":null,"extractionConfidence":0.5}"#);
        assert!(msg.contains("'architect' must be a string or null"));

        let msg = violation(r#"{"architect":null,"client":null,"date":null,"address":null,"extractionConfidence":"high"}"#);
        assert!(msg.contains("extractionConfidence"));

        violation(r#"{"architect":null,"client":null,"date":null,"address":null,"extractionConfidence":null}"#);
    }
}
