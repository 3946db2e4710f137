//! Domain error types
//!
//! This module defines the error hierarchy for Conduit. All errors are
//! domain-specific and don't expose third-party types. Every workflow stage
//! failure maps to exactly one variant so the controller can funnel it
//! through the error stage.

use thiserror::Error;

/// Main Conduit error type
///
/// This is the primary error type used throughout the application.
/// It wraps stage-specific failures and provides context for error handling.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors raised by protocol hook implementations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transformation errors raised by protocol hook implementations
    #[error("Transformation error: {0}")]
    Transform(String),

    /// Durable queue write errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// HTTP forwarding errors
    #[error("Transmit error: {0}")]
    Transmit(String),

    /// Pub/sub publish or subscribe errors
    #[error("Synchronization error: {0}")]
    Synchronization(String),

    /// Payload encoding/decoding errors
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Workflow transition attempted from a disallowed source state
    ///
    /// This signals a programming error in the stage sequence, not a
    /// business failure of the message being processed.
    #[error("Invalid workflow transition '{transition}' from state '{from}'")]
    InvalidTransition {
        transition: &'static str,
        from: &'static str,
    },

    /// Terminal workflow failure surfaced to the caller
    ///
    /// The message body is the serialized error record archived on the
    /// exception topic, enabling operators to locate the payload for
    /// replay or inspection.
    #[error("{0}")]
    WorkflowFailure(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from reqwest errors; only the transmit stage issues HTTP calls
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transmit(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = GatewayError::InvalidTransition {
            transition: "transmit",
            from: "parse",
        };
        assert_eq!(
            err.to_string(),
            "Invalid workflow transition 'transmit' from state 'parse'"
        );
    }

    #[test]
    fn test_workflow_failure_passes_message_through() {
        let err = GatewayError::WorkflowFailure("{\"id\":\"abc\"}".to_string());
        assert_eq!(err.to_string(), "{\"id\":\"abc\"}");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GatewayError = io_err.into();
        assert!(matches!(err, GatewayError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GatewayError = json_err.into();
        assert!(matches!(err, GatewayError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GatewayError = toml_err.into();
        assert!(matches!(err, GatewayError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_gateway_error_implements_std_error() {
        let err = GatewayError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
