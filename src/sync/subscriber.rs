//! Synchronization subscriber
//!
//! A standing listener on the sync subject, started once at process
//! initialization and independent of any single workflow instance. Every
//! broadcast from a peer gateway is archived verbatim to the replay topic;
//! broadcasts that originated locally are echoes of this instance's own
//! publishes and are discarded, so an instance never stores its own records
//! twice.

use crate::adapters::pubsub::PubSubChannel;
use crate::adapters::queue::{DeliveryResult, DurableQueue};
use crate::domain::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Consumes sync broadcasts from all gateway instances
pub struct SyncSubscriber {
    queue: Arc<dyn DurableQueue>,
    instance_id: String,
    replay_topic: String,
}

impl SyncSubscriber {
    pub fn new(
        queue: Arc<dyn DurableQueue>,
        instance_id: impl Into<String>,
        replay_topic: impl Into<String>,
    ) -> Self {
        Self {
            queue,
            instance_id: instance_id.into(),
            replay_topic: replay_topic.into(),
        }
    }

    /// Handle one received broadcast
    ///
    /// Decodes the payload, compares the record's `instance_id` against the
    /// local one, and archives the raw bytes unmodified to the replay topic
    /// when the record came from a peer. Returns `None` for discarded
    /// echoes, `Some(DeliveryResult)` for archived records; the delivery
    /// result is diagnostic only.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not decode or the archive
    /// write fails.
    pub async fn handle_broadcast(&self, payload: &[u8]) -> Result<Option<DeliveryResult>> {
        let record: Value = serde_json::from_slice(payload)?;
        let origin = record.get("instance_id").and_then(Value::as_str);

        if origin == Some(self.instance_id.as_str()) {
            tracing::debug!(
                instance_id = %self.instance_id,
                "Discarding local sync echo"
            );
            return Ok(None);
        }

        let delivery = self
            .queue
            .produce(&self.replay_topic, payload.to_vec())
            .await?;

        tracing::debug!(
            origin_instance = origin.unwrap_or("unknown"),
            replay_topic = %self.replay_topic,
            location = %delivery.location,
            "Archived remote record for replay"
        );

        Ok(Some(delivery))
    }

    /// Receive loop over a subscription to `subject`
    ///
    /// Runs until the pub/sub channel closes. Per-message failures are
    /// logged and do not stop the loop.
    pub async fn listen(&self, pubsub: Arc<dyn PubSubChannel>, subject: &str) -> Result<()> {
        let mut receiver = pubsub.subscribe(subject).await?;
        tracing::info!(subject = %subject, "Synchronization subscriber started");

        while let Some(payload) = receiver.recv().await {
            if let Err(e) = self.handle_broadcast(&payload).await {
                tracing::error!(error = %e, "Failed to handle sync broadcast");
            }
        }

        tracing::info!(subject = %subject, "Synchronization subscriber stopped");
        Ok(())
    }
}

/// Spawn the standing synchronization subscriber
///
/// Call once at process initialization, after the queue and pub/sub clients
/// are constructed.
pub fn start_sync_subscriber(
    subscriber: SyncSubscriber,
    pubsub: Arc<dyn PubSubChannel>,
    subject: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = subscriber.listen(pubsub, &subject).await {
            tracing::error!(error = %e, subject = %subject, "Synchronization subscriber failed");
        }
    })
}
