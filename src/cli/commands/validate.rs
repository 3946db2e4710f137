//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Conduit configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Instance Id: {}", config.gateway.instance_id);
                println!("  Sync Enabled: {}", config.gateway.sync_enabled);
                println!("  Exception Topic: {}", config.messaging.exception_topic);
                println!("  Replay Topic: {}", config.messaging.replay_topic);
                println!("  Sync Subject: {}", config.messaging.sync_subject);
                println!("  Transmit Timeout: {}s", config.transmit.timeout_seconds);
                println!("  TLS Verification: {}", config.transmit.tls_verify);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("definitely-missing.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
