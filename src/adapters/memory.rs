//! In-process queue and pub/sub adapters
//!
//! These adapters implement the collaborator traits against in-memory
//! storage. They back local development and the test suite, where a real
//! broker is not available. Delivery locations follow the
//! `memory:<topic>:<offset>` convention so records remain inspectable.

use crate::adapters::pubsub::PubSubChannel;
use crate::adapters::queue::{DeliveryResult, DurableQueue};
use crate::domain::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// In-memory durable queue
///
/// Appends payloads per topic and acknowledges immediately. Topics can be
/// marked as failing to exercise persistence-failure paths.
#[derive(Default)]
pub struct MemoryQueue {
    topics: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    failing_topics: Mutex<HashSet<String>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `topic` fail
    pub fn fail_topic(&self, topic: impl Into<String>) {
        if let Ok(mut failing) = self.failing_topics.lock() {
            failing.insert(topic.into());
        }
    }

    /// Payloads appended to `topic`, in write order
    pub fn messages(&self, topic: &str) -> Vec<Vec<u8>> {
        self.topics
            .lock()
            .map(|topics| topics.get(topic).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Number of payloads appended to `topic`
    pub fn len(&self, topic: &str) -> usize {
        self.messages(topic).len()
    }

    /// True if nothing was appended to `topic`
    pub fn is_empty(&self, topic: &str) -> bool {
        self.len(topic) == 0
    }
}

#[async_trait]
impl DurableQueue for MemoryQueue {
    async fn produce(&self, topic: &str, payload: Vec<u8>) -> Result<DeliveryResult> {
        let failing = self
            .failing_topics
            .lock()
            .map(|set| set.contains(topic))
            .unwrap_or(false);
        if failing {
            return Err(GatewayError::Persistence(format!(
                "Simulated delivery failure on topic '{topic}'"
            )));
        }

        let mut topics = self
            .topics
            .lock()
            .map_err(|_| GatewayError::Persistence("Queue lock poisoned".to_string()))?;
        let entries = topics.entry(topic.to_string()).or_default();
        let offset = entries.len();
        entries.push(payload);

        tracing::debug!(topic = %topic, offset = offset, "Appended payload to in-memory queue");

        Ok(DeliveryResult {
            location: format!("memory:{topic}:{offset}"),
            status: "delivered".to_string(),
        })
    }
}

/// In-memory pub/sub channel
///
/// Broadcasts payloads to every live subscriber of a subject and keeps a
/// publish log for inspection. Subscribers with closed receivers are
/// dropped on the next publish.
#[derive(Default)]
pub struct MemoryPubSub {
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<Vec<u8>>>>>,
    published: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryPubSub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads published to `subject`, in publish order
    pub fn published(&self, subject: &str) -> Vec<Vec<u8>> {
        self.published
            .lock()
            .map(|log| {
                log.iter()
                    .filter(|(s, _)| s == subject)
                    .map(|(_, payload)| payload.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl PubSubChannel for MemoryPubSub {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<()> {
        if let Ok(mut log) = self.published.lock() {
            log.push((subject.to_string(), payload.clone()));
        }

        let senders: Vec<mpsc::Sender<Vec<u8>>> = self
            .subscribers
            .lock()
            .map(|subs| subs.get(subject).cloned().unwrap_or_default())
            .unwrap_or_default();

        let mut live = Vec::with_capacity(senders.len());
        for sender in senders {
            if sender.send(payload.clone()).await.is_ok() {
                live.push(sender);
            }
        }

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.insert(subject.to_string(), live);
        }

        Ok(())
    }

    async fn subscribe(&self, subject: &str) -> Result<mpsc::Receiver<Vec<u8>>> {
        let (tx, rx) = mpsc::channel(64);
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| GatewayError::Synchronization("Subscriber lock poisoned".to_string()))?;
        subs.entry(subject.to_string()).or_default().push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_queue_produce_and_inspect() {
        let queue = MemoryQueue::new();
        let result = queue.produce("FHIR-R4", b"one".to_vec()).await.unwrap();
        assert_eq!(result.location, "memory:FHIR-R4:0");
        assert_eq!(result.status, "delivered");

        let result = queue.produce("FHIR-R4", b"two".to_vec()).await.unwrap();
        assert_eq!(result.location, "memory:FHIR-R4:1");
        assert_eq!(queue.len("FHIR-R4"), 2);
        assert!(queue.is_empty("HL7v2"));
    }

    #[tokio::test]
    async fn test_memory_queue_failing_topic() {
        let queue = MemoryQueue::new();
        queue.fail_topic("FHIR-R4");

        let result = queue.produce("FHIR-R4", b"payload".to_vec()).await;
        assert!(matches!(result, Err(GatewayError::Persistence(_))));
        assert!(queue.is_empty("FHIR-R4"));

        // Other topics still accept writes
        assert!(queue.produce("LFH_EXCEPTION", b"err".to_vec()).await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_pubsub_broadcast() {
        let pubsub = MemoryPubSub::new();
        let mut rx_a = pubsub.subscribe("EVENTS.sync").await.unwrap();
        let mut rx_b = pubsub.subscribe("EVENTS.sync").await.unwrap();

        pubsub
            .publish("EVENTS.sync", b"record".to_vec())
            .await
            .unwrap();

        assert_eq!(rx_a.recv().await.unwrap(), b"record");
        assert_eq!(rx_b.recv().await.unwrap(), b"record");
        assert_eq!(pubsub.published("EVENTS.sync").len(), 1);
    }

    #[tokio::test]
    async fn test_memory_pubsub_subjects_are_isolated() {
        let pubsub = MemoryPubSub::new();
        let mut rx = pubsub.subscribe("EVENTS.sync").await.unwrap();

        pubsub.publish("EVENTS.other", b"x".to_vec()).await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
