//! Configuration schema types
//!
//! This module defines the configuration structure for Conduit.

use serde::{Deserialize, Serialize};

/// Main Conduit configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConduitConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Gateway identity settings
    pub gateway: GatewayConfig,

    /// Durable queue and pub/sub channel naming
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Transmit stage settings
    #[serde(default)]
    pub transmit: TransmitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConduitConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.gateway.validate()?;
        self.messaging.validate()?;
        self.transmit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Gateway identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Identifier distinguishing this gateway process from peers.
    /// Used by the synchronization subscriber to discard self-echoes.
    pub instance_id: String,

    /// Whether finished records are broadcast to peer instances by default
    #[serde(default = "default_true")]
    pub sync_enabled: bool,
}

impl GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.instance_id.trim().is_empty() {
            return Err("gateway.instance_id cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Topic and subject naming for the durable queue and pub/sub channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Durable topic for archived processing failures
    #[serde(default = "default_exception_topic")]
    pub exception_topic: String,

    /// Durable topic for records replicated from peer instances
    #[serde(default = "default_replay_topic")]
    pub replay_topic: String,

    /// Pub/sub subject used for both the publish and subscribe paths
    #[serde(default = "default_sync_subject")]
    pub sync_subject: String,
}

impl MessagingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.exception_topic.trim().is_empty() {
            return Err("messaging.exception_topic cannot be empty".to_string());
        }
        if self.replay_topic.trim().is_empty() {
            return Err("messaging.replay_topic cannot be empty".to_string());
        }
        if self.sync_subject.trim().is_empty() {
            return Err("messaging.sync_subject cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            exception_topic: default_exception_topic(),
            replay_topic: default_replay_topic(),
            sync_subject: default_sync_subject(),
        }
    }
}

/// Transmit stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmitConfig {
    /// Request timeout for downstream POSTs, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Whether to verify downstream TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl TransmitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("transmit.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rotating file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily or hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_exception_topic() -> String {
    crate::adapters::queue::EXCEPTION_TOPIC.to_string()
}

fn default_replay_topic() -> String {
    crate::adapters::queue::REPLAY_TOPIC.to_string()
}

fn default_sync_subject() -> String {
    crate::adapters::pubsub::SYNC_SUBJECT.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ConduitConfig {
        ConduitConfig {
            application: ApplicationConfig::default(),
            gateway: GatewayConfig {
                instance_id: "gw-1".to_string(),
                sync_enabled: true,
            },
            messaging: MessagingConfig::default(),
            transmit: TransmitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_messaging_defaults() {
        let config = base_config();
        assert_eq!(config.messaging.exception_topic, "LFH_EXCEPTION");
        assert_eq!(config.messaging.replay_topic, "LFH_SYNC");
        assert_eq!(config.messaging.sync_subject, "EVENTS.sync");
    }

    #[test]
    fn test_empty_instance_id_rejected() {
        let mut config = base_config();
        config.gateway.instance_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = base_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.transmit.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = base_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_toml_parses_with_defaults() {
        let toml_content = r#"
[gateway]
instance_id = "gw-1"
"#;
        let config: ConduitConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert!(config.gateway.sync_enabled);
        assert!(config.transmit.tls_verify);
    }
}
