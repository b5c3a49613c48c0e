// Input Validation Module
// Argument checks run before any simulated delay, plus the library error type.

use serde_json::{Map, Value};

/// Errors returned by the simulator itself.
///
/// A simulated failure (`simulate_error`, injected errors) is *not* one of
/// these; it comes back as an `Ok` response carrying a failure status.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Malformed argument value, e.g. an empty URL
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    /// Optional mapping argument of the wrong JSON type
    #[error("{argument} must be a mapping or absent, got {found}")]
    TypeArgument {
        argument: &'static str,
        found: String,
    },
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to decode response body: {0}")]
    Decode(serde_json::Error),
}

/// Name of a JSON value's variant, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A URL must contain something other than whitespace
pub fn validate_url(url: &str) -> Result<(), SimError> {
    if url.trim().is_empty() {
        return Err(SimError::Validation {
            field: "url",
            reason: "URL must be a non-empty string".to_string(),
        });
    }
    Ok(())
}

/// Accept an absent argument or a JSON object; absent becomes `{}`
pub fn validate_mapping(
    argument: &'static str,
    value: Option<Value>,
) -> Result<Map<String, Value>, SimError> {
    match value {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(SimError::TypeArgument {
            argument,
            found: value_kind(&other).to_string(),
        }),
    }
}

/// Headers are a mapping whose values are all strings
pub fn validate_headers(value: Option<Value>) -> Result<Map<String, Value>, SimError> {
    let headers = validate_mapping("headers", value)?;
    if let Some((name, bad)) = headers.iter().find(|(_, v)| !v.is_string()) {
        return Err(SimError::TypeArgument {
            argument: "headers",
            found: format!("{} value for header {:?}", value_kind(bad), name),
        });
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("/users").is_ok());
        assert!(validate_url("https://example.com").is_ok());
        assert!(matches!(
            validate_url(""),
            Err(SimError::Validation { field: "url", .. })
        ));
        assert!(matches!(
            validate_url("  \t\n"),
            Err(SimError::Validation { field: "url", .. })
        ));
    }

    #[test]
    fn test_validate_mapping_absent_is_empty() {
        let map = validate_mapping("params", None).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_validate_mapping_rejects_non_objects() {
        for bad in [json!(null), json!(1), json!("q=1"), json!([1, 2]), json!(true)] {
            let err = validate_mapping("params", Some(bad)).unwrap_err();
            assert!(matches!(
                err,
                SimError::TypeArgument {
                    argument: "params",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_validate_headers_requires_string_values() {
        let ok = validate_headers(Some(json!({"Accept": "text/plain"}))).unwrap();
        assert_eq!(ok["Accept"], "text/plain");

        let err = validate_headers(Some(json!({"X-Retries": 3}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "headers must be a mapping or absent, got number value for header \"X-Retries\""
        );
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!({})), "object");
        assert_eq!(value_kind(&json!([])), "array");
        assert_eq!(value_kind(&json!(1.5)), "number");
    }
}
