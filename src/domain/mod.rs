//! Domain models and types for Conduit.
//!
//! This module contains the core domain models, types, and business rules
//! for the gateway pipeline:
//!
//! - **Durable records** ([`DataRecord`], [`ErrorRecord`]): the canonical
//!   representations written to the durable queue
//! - **Workflow message** ([`Message`]): the stage-to-stage payload sum type
//! - **Error types** ([`GatewayError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, GatewayError>`]:
//!
//! ```rust
//! use conduit::domain::{GatewayError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(GatewayError::Validation("missing resourceType".to_string()))
//! }
//! ```

pub mod errors;
pub mod message;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::GatewayError;
pub use message::Message;
pub use record::{utc_now_seconds, DataRecord, ErrorRecord};
pub use result::Result;
