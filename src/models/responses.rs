//! Response DTOs for the cache client
//!
//! Defines the structure of incoming HTTP response bodies.

use serde_json::Value;

use crate::error::{ClientError, Result};

/// Response body returned by POST /cache in JSON mode
///
/// Only `output` is read; any other fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResponse {
    /// Result of the command, of any JSON type
    pub output: Value,
}

impl CommandResponse {
    /// Decodes a full response body.
    ///
    /// Fails if the body is not JSON, is not an object, or has no `output`
    /// field. An explicit `"output": null` is a valid response.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ClientError::Decode(format!("Response is not valid JSON: {}", e)))?;

        match value {
            Value::Object(mut map) => match map.remove("output") {
                Some(output) => Ok(Self { output }),
                None => Err(ClientError::Decode(
                    "Response has no 'output' field".to_string(),
                )),
            },
            other => Err(ClientError::Decode(format!(
                "Response is not a JSON object: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_string_output() {
        let resp = CommandResponse::from_body(br#"{"output": "Int(1)"}"#).unwrap();
        assert_eq!(resp.output, json!("Int(1)"));
    }

    #[test]
    fn test_from_body_ignores_extra_fields() {
        let resp = CommandResponse::from_body(br#"{"output": [1, 2], "took_ms": 3}"#).unwrap();
        assert_eq!(resp.output, json!([1, 2]));
    }

    #[test]
    fn test_from_body_null_output() {
        let resp = CommandResponse::from_body(br#"{"output": null}"#).unwrap();
        assert_eq!(resp.output, Value::Null);
    }

    #[test]
    fn test_from_body_not_json() {
        let err = CommandResponse::from_body(b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_from_body_missing_output() {
        let err = CommandResponse::from_body(br#"{"result": 1}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_from_body_not_object() {
        let err = CommandResponse::from_body(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
