//! Response carrier
//!
//! The mutable reply the gateway sends back over its inbound transport. When
//! the transmit stage forwards the record downstream, it rewrites this
//! carrier with the downstream status, body, and headers so the submitter
//! sees the downstream reply instead of the raw data record.

use std::collections::HashMap;

/// Header that carries the data record id back to the submitter
pub const MESSAGE_ID_HEADER: &str = "LinuxForHealth-MessageId";

/// Transport-framing headers that must reflect the gateway's own reply,
/// never the downstream's
pub const EXCLUDED_HEADERS: [&str; 3] = ["Content-Length", "Content-Language", "Date"];

/// Caller-supplied, mutable reply carrier
#[derive(Debug, Clone, Default)]
pub struct ResponseCarrier {
    /// Reply body
    pub body: String,

    /// Reply status code
    pub status_code: u16,

    /// Reply headers
    pub headers: HashMap<String, String>,
}

impl ResponseCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a header
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// True if a downstream header must not be merged onto the carrier
pub fn is_excluded_header(name: &str) -> bool {
    EXCLUDED_HEADERS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}
