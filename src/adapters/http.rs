//! Transmit HTTP client construction
//!
//! Builds the `reqwest` client used by the transmit stage. The client is
//! constructed once at process start and shared read-only by every in-flight
//! workflow instance.

use crate::config::TransmitConfig;
use crate::domain::{GatewayError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Build the shared transmit client from configuration
///
/// Certificate verification is controlled by `tls_verify`; disabling it is
/// only appropriate for development gateways talking to self-signed
/// downstream endpoints.
///
/// # Errors
///
/// Returns an error if the underlying TLS backend cannot be initialized.
pub fn build_transmit_client(config: &TransmitConfig) -> Result<Client> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(30));

    if !config.tls_verify {
        tracing::warn!("TLS certificate verification is disabled for the transmit stage");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| GatewayError::Configuration(format!("Failed to build HTTP client: {e}")))
}
