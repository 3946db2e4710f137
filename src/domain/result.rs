//! Result type alias for Conduit
//!
//! This module provides a convenient Result type alias that uses GatewayError
//! as the error type.

use super::errors::GatewayError;

/// Result type alias for Conduit operations
///
/// This is a convenience type alias that uses `GatewayError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use conduit::domain::result::Result;
/// use conduit::domain::errors::GatewayError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GatewayError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GatewayError>;
