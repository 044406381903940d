//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `ACARYA` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use acarya_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod assistant;
mod discovery;
mod error;
mod server;

pub use assistant::AssistantConfig;
pub use discovery::DiscoveryConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the chat relay. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, static assets)
    #[serde(default)]
    pub server: ServerConfig,

    /// Dialog assistant service configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Document search service configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `ACARYA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ACARYA__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `ACARYA__ASSISTANT__API_KEY=...` -> `assistant.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ACARYA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistant.validate()?;
        self.discovery.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("ACARYA__ASSISTANT__API_KEY", "assistant-iam-key");
        env::set_var("ACARYA__DISCOVERY__API_KEY", "discovery-iam-key");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("ACARYA__ASSISTANT__API_KEY");
        env::remove_var("ACARYA__DISCOVERY__API_KEY");
        env::remove_var("ACARYA__SERVER__PORT");
        env::remove_var("ACARYA__SERVER__ENVIRONMENT");
        env::remove_var("ACARYA__ASSISTANT__WORKSPACE_NAME");
        env::remove_var("ACARYA__DISCOVERY__COLLECTION_NAME");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.assistant.has_api_key());
        assert!(config.discovery.has_api_key());
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_custom_names() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ACARYA__ASSISTANT__WORKSPACE_NAME", "Support Bot");
        env::set_var("ACARYA__DISCOVERY__COLLECTION_NAME", "support-docs");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.assistant.workspace_name, "Support Bot");
        assert_eq!(config.discovery.collection_name, "support-docs");
    }

    #[test]
    fn test_validation_fails_without_keys() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }
}
