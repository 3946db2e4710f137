//! Cross-instance record synchronization
//!
//! The publish half lives in the workflow's synchronize stage; this module
//! holds the consuming half, the standing subscriber that archives peer
//! records for replay.

pub mod subscriber;

pub use subscriber::{start_sync_subscriber, SyncSubscriber};
