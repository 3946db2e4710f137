//! Base workflow controller
//!
//! [`CoreWorkflow`] drives one inbound message through the fixed stage
//! sequence validate → transform → persist → transmit → synchronize,
//! checking the transition guard table at every stage entry. Any stage
//! failure short-circuits to the error stage, which archives the failure on
//! the exception topic and surfaces the serialized error record to the
//! caller. Stages within one instance never overlap; each awaits its
//! collaborator before the next begins.

use crate::adapters::pubsub::{PubSubChannel, SYNC_SUBJECT};
use crate::adapters::queue::{DurableQueue, EXCEPTION_TOPIC};
use crate::domain::record::utc_now_seconds;
use crate::domain::{DataRecord, ErrorRecord, GatewayError, Message, Result};
use crate::encoding;
use crate::workflow::hooks::{NoopHooks, ProtocolHooks};
use crate::workflow::response::{is_excluded_header, ResponseCarrier, MESSAGE_ID_HEADER};
use crate::workflow::state::{Transition, WorkflowState};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// One workflow instance per inbound message
///
/// Owned exclusively by the request-handling path that created it. The
/// queue, pub/sub, and HTTP collaborators are shared read-only handles;
/// everything else is instance state.
pub struct CoreWorkflow {
    message: Message,
    data_format: Option<String>,
    origin_url: String,
    instance_id: String,
    transmit_target: Option<String>,
    do_sync: bool,
    exception_topic: String,
    sync_subject: String,
    start_time: Option<DateTime<Utc>>,
    use_response: bool,
    state: WorkflowState,
    queue: Arc<dyn DurableQueue>,
    pubsub: Arc<dyn PubSubChannel>,
    http: Client,
    hooks: Arc<dyn ProtocolHooks>,
}

impl CoreWorkflow {
    /// Start building a workflow for an inbound payload
    pub fn builder(message: Value, origin_url: impl Into<String>) -> CoreWorkflowBuilder {
        CoreWorkflowBuilder::new(message, origin_url)
    }

    /// Current state of the instance
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The message as it stands after the stages run so far
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// True once the transmit stage has rewritten the response carrier;
    /// the transport layer returns the carrier verbatim instead of the
    /// data record
    pub fn response_used(&self) -> bool {
        self.use_response
    }

    /// Run the workflow through the full stage sequence
    ///
    /// On success, returns the finalized message (the data record mapping).
    /// On any stage failure, the error stage archives the failure and this
    /// method returns [`GatewayError::WorkflowFailure`] whose message is
    /// the serialized error record. A failure while archiving propagates
    /// uncaught; there is no error stage for the error stage.
    pub async fn run(&mut self, response: Option<&mut ResponseCarrier>) -> Result<Value> {
        self.start_time = Some(Utc::now());

        tracing::info!(
            origin_url = %self.origin_url,
            data_format = self.data_format.as_deref().unwrap_or("unspecified"),
            "Running workflow"
        );

        match self.execute_stages(response).await {
            Ok(()) => Ok(serde_json::to_value(&self.message)?),
            Err(err) => {
                let serialized = self.handle_error(err).await?;
                Err(GatewayError::WorkflowFailure(serialized))
            }
        }
    }

    async fn execute_stages(&mut self, response: Option<&mut ResponseCarrier>) -> Result<()> {
        self.validate().await?;
        self.transform().await?;
        self.persist().await?;
        self.transmit(response).await?;
        self.synchronize().await?;
        Ok(())
    }

    /// Validate stage: protocol rule checking via the configured hooks
    pub async fn validate(&mut self) -> Result<()> {
        self.state = self.state.apply(Transition::Validate)?;
        self.hooks.validate(&self.message).await
    }

    /// Transform stage: format conversion via the configured hooks
    pub async fn transform(&mut self) -> Result<()> {
        self.state = self.state.apply(Transition::Transform)?;
        let current = self.message.clone();
        self.message = self.hooks.transform(current).await?;
        Ok(())
    }

    /// Persist stage: wrap the raw payload into a data record and write it
    /// to the durable queue under the `data_format` topic
    ///
    /// Replaces the workflow message with the finalized record; later
    /// stages read and write through the record, not the original payload.
    pub async fn persist(&mut self) -> Result<()> {
        self.state = self.state.apply(Transition::Persist)?;

        let raw = self.message.as_raw().ok_or_else(|| {
            GatewayError::Persistence("Persist requires the raw inbound payload".to_string())
        })?;

        let encoded = match raw {
            Value::String(text) => encoding::encode_from_str(text),
            other => encoding::encode_from_value(other)?,
        };

        let topic = self.data_format.clone().ok_or_else(|| {
            GatewayError::Validation("data_format is required to persist a message".to_string())
        })?;

        let mut record = DataRecord::new(
            self.instance_id.clone(),
            self.origin_url.clone(),
            self.data_format.clone(),
            encoded,
            self.transmit_target.clone(),
        );

        let payload = serde_json::to_vec(&record)?;
        let storage_start = Instant::now();
        let delivery = self.queue.produce(&topic, payload).await?;
        record.elapsed_storage_seconds = storage_start.elapsed().as_secs_f64();

        let started = self.start_time.unwrap_or(record.creation_timestamp);
        record.elapsed_total_seconds = (Utc::now() - started)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();

        record.storage_location = delivery.location;
        record.storage_status = delivery.status;

        tracing::debug!(
            record_id = %record.id,
            topic = %topic,
            storage_location = %record.storage_location,
            elapsed_storage_seconds = record.elapsed_storage_seconds,
            "Persisted data record"
        );

        self.message = Message::Record(record);
        Ok(())
    }

    /// Transmit stage: forward the decoded payload to the downstream target
    ///
    /// A no-op unless both a transmit target and a response carrier are
    /// present. On success the carrier receives the downstream status,
    /// body, and headers (minus transport-framing headers) plus the
    /// record-id header, and is marked used.
    pub async fn transmit(&mut self, response: Option<&mut ResponseCarrier>) -> Result<()> {
        self.state = self.state.apply(Transition::Transmit)?;

        let (target, carrier) = match (&self.transmit_target, response) {
            (Some(target), Some(carrier)) => (target.clone(), carrier),
            _ => return Ok(()),
        };

        let record = self.message.as_record_mut().ok_or_else(|| {
            GatewayError::Transmit("Transmit requires the finalized data record".to_string())
        })?;

        let text = encoding::decode_to_str(&record.data)?;
        let resource: Value = serde_json::from_str(&text)?;

        let transmit_start = Instant::now();
        record.transmit_timestamp = Some(utc_now_seconds());

        let result = self.http.post(&target).json(&resource).send().await;
        record.elapsed_transmit_seconds = Some(transmit_start.elapsed().as_secs_f64());

        let downstream = match result {
            Ok(downstream) => downstream,
            Err(e) => {
                tracing::error!(target = %target, error = %e, "Downstream transmit failed");
                return Err(e.into());
            }
        };

        let status = downstream.status();
        let headers = downstream.headers().clone();
        let body = downstream.text().await?;

        carrier.status_code = status.as_u16();
        carrier.body = body;

        // Merge downstream headers, keeping the gateway's own framing headers
        for (name, value) in headers.iter() {
            if is_excluded_header(name.as_str()) {
                continue;
            }
            if let Ok(value) = value.to_str() {
                carrier.set_header(name.as_str(), value);
            }
        }
        carrier.set_header(MESSAGE_ID_HEADER, record.id.to_string());

        tracing::debug!(
            record_id = %record.id,
            target = %target,
            status = status.as_u16(),
            "Transmitted record downstream"
        );

        self.use_response = true;
        Ok(())
    }

    /// Synchronize stage: broadcast the finalized record to peer instances
    ///
    /// Fire-and-forget; no subscriber acknowledgment is awaited.
    pub async fn synchronize(&mut self) -> Result<()> {
        self.state = self.state.apply(Transition::Sync)?;

        if !self.do_sync {
            return Ok(());
        }

        let payload = serde_json::to_vec(&self.message)?;
        self.pubsub.publish(&self.sync_subject, payload).await?;

        tracing::debug!(subject = %self.sync_subject, "Published record for synchronization");
        Ok(())
    }

    /// Error stage: archive the failure and the message at time of failure
    ///
    /// Returns the serialized error record. A durable-write failure here
    /// propagates as-is; the caller must treat it as an unrecoverable
    /// request failure.
    pub async fn handle_error(&mut self, error: GatewayError) -> Result<String> {
        self.state = self.state.apply(Transition::Error)?;

        tracing::error!(error = %error, state = %self.state, "Workflow stage failed");

        let data = serde_json::to_value(&self.message)?;
        let mut record = ErrorRecord::new(error.to_string(), data);

        let payload = serde_json::to_vec(&record)?;
        let delivery = self.queue.produce(&self.exception_topic, payload).await?;
        record.storage_location = Some(delivery.location);

        tracing::debug!(
            record_id = %record.id,
            storage_location = record.storage_location.as_deref().unwrap_or(""),
            "Archived error record"
        );

        Ok(serde_json::to_string(&record)?)
    }
}

/// Builder for [`CoreWorkflow`]
///
/// The queue and pub/sub collaborators and the instance id are required;
/// everything else has a sensible default.
pub struct CoreWorkflowBuilder {
    message: Value,
    origin_url: String,
    data_format: Option<String>,
    instance_id: Option<String>,
    transmit_target: Option<String>,
    do_sync: bool,
    exception_topic: String,
    sync_subject: String,
    queue: Option<Arc<dyn DurableQueue>>,
    pubsub: Option<Arc<dyn PubSubChannel>>,
    http: Option<Client>,
    hooks: Arc<dyn ProtocolHooks>,
}

impl CoreWorkflowBuilder {
    fn new(message: Value, origin_url: impl Into<String>) -> Self {
        Self {
            message,
            origin_url: origin_url.into(),
            data_format: None,
            instance_id: None,
            transmit_target: None,
            do_sync: true,
            exception_topic: EXCEPTION_TOPIC.to_string(),
            sync_subject: SYNC_SUBJECT.to_string(),
            queue: None,
            pubsub: None,
            http: None,
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Tag identifying the payload shape; doubles as the persistence topic
    pub fn data_format(mut self, data_format: impl Into<String>) -> Self {
        self.data_format = Some(data_format.into());
        self
    }

    /// Identifier of the owning gateway instance
    pub fn instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// Downstream URL for the transmit stage
    pub fn transmit_target(mut self, target: impl Into<String>) -> Self {
        self.transmit_target = Some(target.into());
        self
    }

    /// Gate for the synchronization publisher (defaults to true)
    pub fn do_sync(mut self, do_sync: bool) -> Self {
        self.do_sync = do_sync;
        self
    }

    /// Override the exception topic
    pub fn exception_topic(mut self, topic: impl Into<String>) -> Self {
        self.exception_topic = topic.into();
        self
    }

    /// Override the synchronization subject
    pub fn sync_subject(mut self, subject: impl Into<String>) -> Self {
        self.sync_subject = subject.into();
        self
    }

    /// Durable queue collaborator (required)
    pub fn queue(mut self, queue: Arc<dyn DurableQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Pub/sub collaborator (required)
    pub fn pubsub(mut self, pubsub: Arc<dyn PubSubChannel>) -> Self {
        self.pubsub = Some(pubsub);
        self
    }

    /// Shared transmit HTTP client
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Protocol hooks for the validate/transform extension points
    pub fn hooks(mut self, hooks: Arc<dyn ProtocolHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Build the workflow instance in the initial `parse` state
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a required collaborator is missing.
    pub fn build(self) -> Result<CoreWorkflow> {
        let queue = self.queue.ok_or_else(|| {
            GatewayError::Configuration("Workflow requires a durable queue client".to_string())
        })?;
        let pubsub = self.pubsub.ok_or_else(|| {
            GatewayError::Configuration("Workflow requires a pub/sub client".to_string())
        })?;
        let instance_id = self.instance_id.ok_or_else(|| {
            GatewayError::Configuration("Workflow requires a gateway instance id".to_string())
        })?;

        Ok(CoreWorkflow {
            message: Message::Raw(self.message),
            data_format: self.data_format,
            origin_url: self.origin_url,
            instance_id,
            transmit_target: self.transmit_target,
            do_sync: self.do_sync,
            exception_topic: self.exception_topic,
            sync_subject: self.sync_subject,
            start_time: None,
            use_response: false,
            state: WorkflowState::Parse,
            queue,
            pubsub,
            http: self.http.unwrap_or_default(),
            hooks: self.hooks,
        })
    }
}
