//! Record codec
//!
//! Converts inbound payloads to and from the canonical byte-encoded form
//! stored in a [`DataRecord`](crate::domain::DataRecord)'s `data` field.
//! Structured payloads are JSON-serialized then base64-encoded; raw text
//! payloads are base64-encoded directly. The codec performs no I/O.

use crate::domain::{GatewayError, Result};
use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

/// Encodes a structured JSON value
pub fn encode_from_value(value: &Value) -> Result<String> {
    let text = serde_json::to_string(value)?;
    Ok(general_purpose::STANDARD.encode(text.as_bytes()))
}

/// Encodes a raw text payload
pub fn encode_from_str(text: &str) -> String {
    general_purpose::STANDARD.encode(text.as_bytes())
}

/// Decodes an encoded payload back to text
pub fn decode_to_str(encoded: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| GatewayError::Encoding(format!("Invalid base64 payload: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GatewayError::Encoding(format!("Payload is not valid UTF-8: {e}")))
}

/// Decodes an encoded payload back to a structured JSON value
///
/// Text that does not parse as JSON is returned as a JSON string, matching
/// the raw-text encode path.
pub fn decode_to_value(encoded: &str) -> Result<Value> {
    let text = decode_to_str(encoded)?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
