//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "conduit.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Conduit configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Give each gateway process a unique gateway.instance_id");
                println!("  3. Validate configuration: conduit validate-config");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Conduit Configuration File
# Stage-sequenced transaction pipeline for health-data gateways

[application]
log_level = "info"

[gateway]
# Unique per gateway process; peers use it to discard sync echoes
instance_id = "${CONDUIT_INSTANCE_ID}"
sync_enabled = true

[messaging]
exception_topic = "LFH_EXCEPTION"
replay_topic = "LFH_SYNC"
sync_subject = "EVENTS.sync"

[transmit]
timeout_seconds = 30
# Disable only for development gateways with self-signed downstreams
tls_verify = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
