//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use conduit::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("CONDUIT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CONDUIT_GATEWAY_INSTANCE_ID");
    std::env::remove_var("CONDUIT_GATEWAY_SYNC_ENABLED");
    std::env::remove_var("CONDUIT_MESSAGING_EXCEPTION_TOPIC");
    std::env::remove_var("CONDUIT_MESSAGING_REPLAY_TOPIC");
    std::env::remove_var("CONDUIT_MESSAGING_SYNC_SUBJECT");
    std::env::remove_var("CONDUIT_TRANSMIT_TIMEOUT_SECONDS");
    std::env::remove_var("CONDUIT_TRANSMIT_TLS_VERIFY");
    std::env::remove_var("TEST_CONDUIT_INSTANCE");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[gateway]
instance_id = "gw-east-1"
sync_enabled = false

[messaging]
exception_topic = "DEAD_LETTER"
replay_topic = "REPLAY"
sync_subject = "EVENTS.replication"

[transmit]
timeout_seconds = 10
tls_verify = false

[logging]
local_enabled = true
local_path = "/tmp/conduit"
local_rotation = "hourly"
"#;

    let file = write_config(toml_content);
    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.gateway.instance_id, "gw-east-1");
    assert!(!config.gateway.sync_enabled);
    assert_eq!(config.messaging.exception_topic, "DEAD_LETTER");
    assert_eq!(config.messaging.replay_topic, "REPLAY");
    assert_eq!(config.messaging.sync_subject, "EVENTS.replication");
    assert_eq!(config.transmit.timeout_seconds, 10);
    assert!(!config.transmit.tls_verify);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/conduit");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[gateway]\ninstance_id = \"gw-solo\"\n");
    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(config.gateway.sync_enabled);
    assert_eq!(config.messaging.exception_topic, "LFH_EXCEPTION");
    assert_eq!(config.messaging.replay_topic, "LFH_SYNC");
    assert_eq!(config.messaging.sync_subject, "EVENTS.sync");
    assert_eq!(config.transmit.timeout_seconds, 30);
    assert!(config.transmit.tls_verify);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CONDUIT_INSTANCE", "gw-from-env");

    let file = write_config("[gateway]\ninstance_id = \"${TEST_CONDUIT_INSTANCE}\"\n");
    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.gateway.instance_id, "gw-from-env");
    std::env::remove_var("TEST_CONDUIT_INSTANCE");
}

#[test]
fn test_missing_env_var_fails() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[gateway]\ninstance_id = \"${TEST_CONDUIT_UNSET_VAR}\"\n");
    let result = load_config(file.path());

    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("TEST_CONDUIT_UNSET_VAR"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CONDUIT_GATEWAY_INSTANCE_ID", "gw-override");
    std::env::set_var("CONDUIT_GATEWAY_SYNC_ENABLED", "false");
    std::env::set_var("CONDUIT_TRANSMIT_TIMEOUT_SECONDS", "5");

    let file = write_config("[gateway]\ninstance_id = \"gw-file\"\n");
    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.gateway.instance_id, "gw-override");
    assert!(!config.gateway.sync_enabled);
    assert_eq!(config.transmit.timeout_seconds, 5);
    cleanup_env_vars();
}

#[test]
fn test_empty_instance_id_fails_validation() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[gateway]\ninstance_id = \"  \"\n");
    let result = load_config(file.path());

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("instance_id cannot be empty"));
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "verbose"

[gateway]
instance_id = "gw-east-1"
"#;
    let file = write_config(toml_content);
    let result = load_config(file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("log_level"));
}

#[test]
fn test_zero_timeout_fails_validation() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[gateway]
instance_id = "gw-east-1"

[transmit]
timeout_seconds = 0
"#;
    let file = write_config(toml_content);
    let result = load_config(file.path());

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("timeout_seconds"));
}

#[test]
fn test_missing_config_file() {
    let result = load_config("/nonexistent/path/conduit.toml");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}
