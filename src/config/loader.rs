//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ConduitConfig;
use crate::domain::errors::GatewayError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ConduitConfig
/// 4. Applies environment variable overrides (CONDUIT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use conduit::config::load_config;
///
/// let config = load_config("conduit.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ConduitConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GatewayError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GatewayError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ConduitConfig = toml::from_str(&contents)
        .map_err(|e| GatewayError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        GatewayError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GatewayError::Configuration(format!("Invalid substitution regex: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GatewayError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CONDUIT_* prefix
///
/// Environment variables follow the pattern: CONDUIT_<SECTION>_<KEY>
/// For example: CONDUIT_GATEWAY_INSTANCE_ID, CONDUIT_TRANSMIT_TLS_VERIFY
fn apply_env_overrides(config: &mut ConduitConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CONDUIT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Gateway overrides
    if let Ok(val) = std::env::var("CONDUIT_GATEWAY_INSTANCE_ID") {
        config.gateway.instance_id = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_GATEWAY_SYNC_ENABLED") {
        config.gateway.sync_enabled = val.parse().unwrap_or(true);
    }

    // Messaging overrides
    if let Ok(val) = std::env::var("CONDUIT_MESSAGING_EXCEPTION_TOPIC") {
        config.messaging.exception_topic = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_MESSAGING_REPLAY_TOPIC") {
        config.messaging.replay_topic = val;
    }
    if let Ok(val) = std::env::var("CONDUIT_MESSAGING_SYNC_SUBJECT") {
        config.messaging.sync_subject = val;
    }

    // Transmit overrides
    if let Ok(val) = std::env::var("CONDUIT_TRANSMIT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.transmit.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("CONDUIT_TRANSMIT_TLS_VERIFY") {
        config.transmit.tls_verify = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CONDUIT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CONDUIT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CONDUIT_TEST_VAR", "gw-primary");
        let input = "instance_id = \"${CONDUIT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "instance_id = \"gw-primary\"\n");
        std::env::remove_var("CONDUIT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CONDUIT_MISSING_VAR");
        let input = "instance_id = \"${CONDUIT_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# id = \"${CONDUIT_UNSET_IN_COMMENT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("CONDUIT_UNSET_IN_COMMENT"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[gateway]
instance_id = "gw-test"

[transmit]
timeout_seconds = 15
tls_verify = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.gateway.instance_id, "gw-test");
        assert_eq!(config.transmit.timeout_seconds, 15);
        assert!(!config.transmit.tls_verify);
    }
}
