//! Stage-sequenced workflow engine
//!
//! This module contains the transaction pipeline: the state machine that
//! enforces stage ordering ([`state`]), the protocol extension points
//! ([`hooks`]), the caller-supplied reply carrier ([`response`]), and the
//! controller that drives one message through the stages ([`core`]).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use conduit::adapters::{MemoryPubSub, MemoryQueue};
//! use conduit::workflow::CoreWorkflow;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> conduit::domain::Result<()> {
//! let queue = Arc::new(MemoryQueue::new());
//! let pubsub = Arc::new(MemoryPubSub::new());
//!
//! let mut workflow = CoreWorkflow::builder(json!({"resourceType": "Patient"}), "http://gw/fhir")
//!     .data_format("FHIR-R4")
//!     .instance_id("gw-1")
//!     .queue(queue)
//!     .pubsub(pubsub)
//!     .build()?;
//!
//! let record = workflow.run(None).await?;
//! println!("Stored at {}", record["storage_location"]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod hooks;
pub mod response;
pub mod state;

pub use self::core::{CoreWorkflow, CoreWorkflowBuilder};
pub use hooks::{NoopHooks, ProtocolHooks};
pub use response::{ResponseCarrier, EXCLUDED_HEADERS, MESSAGE_ID_HEADER};
pub use state::{Transition, WorkflowState};
