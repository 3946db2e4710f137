//! External integrations
//!
//! This module holds the seams to the gateway's collaborators: the durable
//! queue, the pub/sub synchronization channel, and the downstream HTTP
//! client. The queue and pub/sub clients are trait objects constructed at
//! process start and injected into every workflow instance; the in-memory
//! implementations back local development and tests.

pub mod http;
pub mod memory;
pub mod pubsub;
pub mod queue;

pub use http::build_transmit_client;
pub use memory::{MemoryPubSub, MemoryQueue};
pub use pubsub::{PubSubChannel, SYNC_SUBJECT};
pub use queue::{DeliveryResult, DurableQueue, EXCEPTION_TOPIC, REPLAY_TOPIC};
