//! Protocol extension points
//!
//! The validate and transform stages are intentionally empty in the base
//! workflow. Concrete protocol variants (HL7v2, FHIR, DICOM, ...) implement
//! [`ProtocolHooks`] to add rule checking and format conversion; the default
//! methods are no-ops so the base pipeline runs unchanged without them.

use crate::domain::{Message, Result};
use async_trait::async_trait;

/// Capability interface for protocol-specific validation and transformation
///
/// Implementations must only inspect or rewrite the message; stage ordering
/// is owned by the workflow controller, which invokes these hooks in the
/// validate and transform states.
#[async_trait]
pub trait ProtocolHooks: Send + Sync {
    /// Check the raw inbound payload against protocol rules
    ///
    /// # Errors
    ///
    /// Return [`GatewayError::Validation`](crate::domain::GatewayError) to
    /// abort the workflow and route the message to the error stage.
    async fn validate(&self, _message: &Message) -> Result<()> {
        Ok(())
    }

    /// Convert the payload from one form or protocol to another
    /// (e.g. HL7v2 to FHIR, or FHIR R3 to R4)
    ///
    /// # Errors
    ///
    /// Return [`GatewayError::Transform`](crate::domain::GatewayError) to
    /// abort the workflow and route the message to the error stage.
    async fn transform(&self, message: Message) -> Result<Message> {
        Ok(message)
    }
}

/// The base workflow's no-op hooks
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

#[async_trait]
impl ProtocolHooks for NoopHooks {}
