//! Decoding of the opaque JSON documents exposed by the deal and report views.

use serde_json::Value;

use crate::error::CoreError;

/// Normalise a stored document into a JSON value.
///
/// Views normally yield JSONB, but producers have been seen writing the
/// document as a JSON-encoded string. Such strings are decoded; a string
/// that is not valid JSON is a hard error rather than being passed through.
pub fn decode_document(raw: Value) -> Result<Value, CoreError> {
    match raw {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| CoreError::MalformedPayload(format!("invalid JSON document: {e}"))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn objects_pass_through() {
        let doc = json!({"model": "Galaxy S24"});
        assert_eq!(decode_document(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn encoded_strings_are_decoded() {
        let raw = Value::String(r#"{"model":"iPhone 15","upfront":0}"#.to_string());
        assert_eq!(
            decode_document(raw).unwrap(),
            json!({"model": "iPhone 15", "upfront": 0})
        );
    }

    #[test]
    fn malformed_strings_surface_an_error() {
        let raw = Value::String("{not json".to_string());
        assert_matches!(decode_document(raw), Err(CoreError::MalformedPayload(_)));
    }
}
