//! Durable queue abstraction
//!
//! This module defines the trait that durable queue adapters must implement
//! to work with Conduit. The queue is an append-only, asynchronously
//! acknowledged storage channel (e.g. a log-structured broker); the pipeline
//! issues writes and awaits the delivery result, but retry and duplicate
//! semantics belong to the adapter.

use crate::domain::Result;
use async_trait::async_trait;

/// Default topic for archived processing failures
pub const EXCEPTION_TOPIC: &str = "LFH_EXCEPTION";

/// Default topic for records replicated from peer gateway instances
pub const REPLAY_TOPIC: &str = "LFH_SYNC";

/// Result of a single durable write, consumed exactly once by the caller
/// that issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    /// Where the payload landed (e.g. `topic:partition:offset`)
    pub location: String,

    /// Delivery status reported by the broker
    pub status: String,
}

/// Durable queue client trait
///
/// Implementations must be safe for concurrent use by multiple in-flight
/// workflow instances sharing one handle.
#[async_trait]
pub trait DurableQueue: Send + Sync {
    /// Append a payload to a topic and await its delivery result
    ///
    /// # Errors
    ///
    /// Returns an error if the write is not acknowledged.
    async fn produce(&self, topic: &str, payload: Vec<u8>) -> Result<DeliveryResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_result_equality() {
        let a = DeliveryResult {
            location: "FHIR-R4:0:1".into(),
            status: "delivered".into(),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_topics() {
        assert_eq!(EXCEPTION_TOPIC, "LFH_EXCEPTION");
        assert_eq!(REPLAY_TOPIC, "LFH_SYNC");
    }
}
