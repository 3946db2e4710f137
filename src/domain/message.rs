//! Workflow message sum type
//!
//! The message owned by a workflow instance changes shape as it moves through
//! the stages: it starts as the raw inbound payload and becomes the canonical
//! [`DataRecord`] once persistence completes. [`Message`] makes that contract
//! explicit so each stage can state which variant it requires instead of
//! shape-checking at runtime.

use super::record::DataRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload carried by a workflow instance, stage to stage
///
/// Serialized untagged: a raw payload serializes as itself, a finalized
/// record serializes as the record mapping. This keeps the bytes on the
/// sync subject and the exception topic identical for either variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Finalized record produced by the persistence stage
    Record(DataRecord),

    /// Raw inbound payload, exactly as submitted to the gateway
    Raw(Value),
}

impl Message {
    /// Returns the finalized record, if persistence has completed
    pub fn as_record(&self) -> Option<&DataRecord> {
        match self {
            Message::Record(record) => Some(record),
            Message::Raw(_) => None,
        }
    }

    /// Mutable access to the finalized record, if persistence has completed
    pub fn as_record_mut(&mut self) -> Option<&mut DataRecord> {
        match self {
            Message::Record(record) => Some(record),
            Message::Raw(_) => None,
        }
    }

    /// Returns the raw payload, if persistence has not yet run
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Message::Raw(value) => Some(value),
            Message::Record(_) => None,
        }
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::Raw(value)
    }
}

impl From<DataRecord> for Message {
    fn from(record: DataRecord) -> Self {
        Message::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_message_serializes_as_payload() {
        let message = Message::Raw(json!({"resourceType": "Patient"}));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"resourceType": "Patient"}));
    }

    #[test]
    fn test_record_message_serializes_as_mapping() {
        let record = DataRecord::new("gw-1", "http://localhost/fhir", None, "e30=".into(), None);
        let id = record.id;
        let message = Message::Record(record);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["instance_id"], "gw-1");
    }

    #[test]
    fn test_variant_accessors() {
        let mut message = Message::Raw(json!("MSH|^~\\&|"));
        assert!(message.as_raw().is_some());
        assert!(message.as_record().is_none());

        let record = DataRecord::new("gw-1", "http://localhost/hl7", None, "TVNI".into(), None);
        message = Message::Record(record);
        assert!(message.as_raw().is_none());
        assert!(message.as_record_mut().is_some());
    }
}
