// Conduit - Health Data Gateway Pipeline
// Copyright (c) 2025 Conduit Contributors
// Licensed under the MIT License

//! # Conduit - Health Data Gateway Pipeline
//!
//! Conduit is the transaction pipeline of a health-data interoperability
//! gateway: it accepts an inbound clinical message, drives it through a
//! fixed sequence of processing stages, and guarantees that any failure is
//! captured to a durable error channel rather than silently lost.
//!
//! ## Overview
//!
//! Each inbound message runs through:
//!
//! - **validate** / **transform**: protocol extension points, no-ops in
//!   the base workflow
//! - **persist**: wrap the payload into a canonical [`DataRecord`] and
//!   write it to the durable queue
//! - **transmit**: optionally forward the decoded payload to a downstream
//!   HTTP consumer, rewriting the caller's response
//! - **synchronize**: broadcast the finalized record to peer gateway
//!   instances
//!
//! Any stage failure is archived to a fixed exception topic as an
//! [`ErrorRecord`] and surfaced to the caller. A standing
//! [`SyncSubscriber`](sync::SyncSubscriber) archives records broadcast by
//! peer instances for replay, discarding this instance's own echoes.
//!
//! ## Architecture
//!
//! - [`workflow`] - The stage-sequenced engine: state machine, controller,
//!   protocol hooks, response carrier
//! - [`sync`] - Cross-instance synchronization subscriber
//! - [`adapters`] - Collaborator seams (durable queue, pub/sub, HTTP)
//! - [`encoding`] - The record payload codec
//! - [`domain`] - Records, messages, and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conduit::adapters::{MemoryPubSub, MemoryQueue};
//! use conduit::workflow::{CoreWorkflow, ResponseCarrier};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> conduit::domain::Result<()> {
//!     let queue = Arc::new(MemoryQueue::new());
//!     let pubsub = Arc::new(MemoryPubSub::new());
//!
//!     let mut workflow =
//!         CoreWorkflow::builder(json!({"resourceType": "Patient"}), "http://gw/fhir")
//!             .data_format("FHIR-R4")
//!             .instance_id("gw-1")
//!             .queue(queue)
//!             .pubsub(pubsub)
//!             .build()?;
//!
//!     let mut response = ResponseCarrier::new();
//!     let record = workflow.run(Some(&mut response)).await?;
//!     println!("Stored at {}", record["storage_location"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with
//! [`domain::GatewayError`]. A workflow failure carries the serialized
//! error record so operators can locate the archived payload:
//!
//! ```rust,no_run
//! use conduit::domain::GatewayError;
//!
//! # async fn example(workflow: &mut conduit::workflow::CoreWorkflow) {
//! match workflow.run(None).await {
//!     Ok(record) => println!("stored: {}", record["id"]),
//!     Err(GatewayError::WorkflowFailure(error_record)) => {
//!         eprintln!("archived failure: {error_record}");
//!     }
//!     Err(e) => eprintln!("unrecoverable: {e}"),
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod encoding;
pub mod logging;
pub mod sync;
pub mod workflow;

pub use domain::{DataRecord, ErrorRecord, GatewayError, Message};
