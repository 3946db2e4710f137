//! Logging and observability
//!
//! Structured logging via `tracing`, with console output and optional
//! rotating JSON file output.
//!
//! # Example
//!
//! ```no_run
//! use conduit::config::LoggingConfig;
//! use conduit::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Gateway started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
