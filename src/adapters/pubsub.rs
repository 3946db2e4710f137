//! Publish/subscribe abstraction
//!
//! This module defines the trait that pub/sub adapters must implement for
//! the synchronization channel. Publishes are fire-and-forget broadcasts;
//! no subscriber acknowledgment is awaited. Subscriptions deliver raw
//! payload bytes over an mpsc channel so the subscriber task owns its own
//! receive loop.

use crate::domain::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Default subject used for cross-instance record synchronization
pub const SYNC_SUBJECT: &str = "EVENTS.sync";

/// Pub/sub client trait
///
/// Implementations must be safe for concurrent use by multiple in-flight
/// workflow instances sharing one handle.
#[async_trait]
pub trait PubSubChannel: Send + Sync {
    /// Broadcast a payload on a subject
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be handed to the channel.
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<()>;

    /// Subscribe to a subject, receiving every broadcast payload
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription cannot be established.
    async fn subscribe(&self, subject: &str) -> Result<mpsc::Receiver<Vec<u8>>>;
}
