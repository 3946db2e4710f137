//! Durable record models
//!
//! This module defines the canonical representations written to the durable
//! queue: [`DataRecord`] for successfully processed messages and
//! [`ErrorRecord`] for failed processing attempts. Timestamps are UTC at
//! second precision, serialized as `YYYY-MM-DD HH:MM:SSZ` so records written
//! by peer gateway instances compare and replay cleanly.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Second-precision UTC timestamp format used by all durable records
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Returns the current UTC time truncated to second precision
pub fn utc_now_seconds() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde adapter for second-precision timestamps
pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)?;
        Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
    }

    /// Variant for `Option<DateTime<Utc>>` fields
    pub mod option {
        use super::TIMESTAMP_FORMAT;
        use chrono::{DateTime, NaiveDateTime, Utc};
        use serde::{self, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(ts) => serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(raw) => {
                    let naive = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
                        .map_err(serde::de::Error::custom)?;
                    Ok(Some(DateTime::from_naive_utc_and_offset(naive, Utc)))
                }
                None => Ok(None),
            }
        }
    }
}

/// Canonical, durable representation of a successfully processed message
///
/// Created by the persistence stage. The identity, timestamps, and payload
/// are fixed at creation; timing and delivery fields are stamped after the
/// durable write is acknowledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    /// Globally unique record identifier
    pub id: Uuid,

    /// Identifier of the gateway instance that originated this record
    pub instance_id: String,

    /// When the record was created
    #[serde(with = "timestamp")]
    pub creation_timestamp: DateTime<Utc>,

    /// When the record was handed to the durable queue
    #[serde(with = "timestamp")]
    pub store_timestamp: DateTime<Utc>,

    /// The ingesting endpoint
    pub origin_url: String,

    /// Tag identifying the payload shape (e.g. clinical message standard)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,

    /// Encoded payload
    pub data: String,

    /// Optional downstream forwarding target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmit_target: Option<String>,

    /// When forwarding to the downstream target began
    #[serde(with = "timestamp::option", default, skip_serializing_if = "Option::is_none")]
    pub transmit_timestamp: Option<DateTime<Utc>>,

    /// Wall-clock seconds spent in the durable write
    pub elapsed_storage_seconds: f64,

    /// Wall-clock seconds from workflow start through the durable write
    pub elapsed_total_seconds: f64,

    /// Wall-clock seconds spent forwarding downstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_transmit_seconds: Option<f64>,

    /// Delivery location reported by the durable queue
    pub storage_location: String,

    /// Delivery status reported by the durable queue
    pub storage_status: String,
}

impl DataRecord {
    /// Creates a new record with a fresh id and current second-precision
    /// timestamps; timing and delivery fields start empty and are stamped
    /// by the persistence stage after the write is acknowledged.
    pub fn new(
        instance_id: impl Into<String>,
        origin_url: impl Into<String>,
        data_format: Option<String>,
        data: String,
        transmit_target: Option<String>,
    ) -> Self {
        let now = utc_now_seconds();
        Self {
            id: Uuid::new_v4(),
            instance_id: instance_id.into(),
            creation_timestamp: now,
            store_timestamp: now,
            origin_url: origin_url.into(),
            data_format,
            data,
            transmit_target,
            transmit_timestamp: None,
            elapsed_storage_seconds: 0.0,
            elapsed_total_seconds: 0.0,
            elapsed_transmit_seconds: None,
            storage_location: String::new(),
            storage_status: String::new(),
        }
    }
}

/// Durable representation of a failed processing attempt
///
/// Created by the error stage. Write-once, except for `storage_location`
/// which is stamped once the record itself is durably written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Globally unique record identifier
    pub id: Uuid,

    /// When the failure was captured
    #[serde(with = "timestamp")]
    pub error_timestamp: DateTime<Utc>,

    /// Stringified error that aborted the workflow
    pub error_message: String,

    /// The workflow message at time of failure, structurally decoded
    pub data: serde_json::Value,

    /// Delivery location of this record on the exception topic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
}

impl ErrorRecord {
    /// Captures a failure with a fresh id and the current timestamp
    pub fn new(error_message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            error_timestamp: utc_now_seconds(),
            error_message: error_message.into(),
            data,
            storage_location: None,
        }
    }
}
