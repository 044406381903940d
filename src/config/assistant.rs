//! Dialog assistant service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the dialog assistant service.
///
/// The assistant interprets each chat turn against a predefined conversation
/// graph. One workspace, matched or created by name at startup, hosts that
/// graph for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Service endpoint base URL
    #[serde(default = "default_url")]
    pub url: String,

    /// IAM API key for the service instance
    pub api_key: Option<Secret<String>>,

    /// API version date sent with every request
    #[serde(default = "default_version")]
    pub version: String,

    /// Name of the workspace validated or created at startup
    #[serde(default = "default_workspace_name")]
    pub workspace_name: String,

    /// Optional JSON workspace skeleton used when the workspace must be created
    pub workspace_file: Option<String>,
}

impl AssistantConfig {
    /// Exposes the API key (for making requests)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some_and(|k| !k.is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ACARYA__ASSISTANT__API_KEY"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidServiceUrl("assistant.url"));
        }
        if self.workspace_name.trim().is_empty() {
            return Err(ValidationError::EmptyWorkspaceName);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            version: default_version(),
            workspace_name: default_workspace_name(),
            workspace_file: None,
        }
    }
}

fn default_url() -> String {
    "https://gateway.watsonplatform.net/assistant/api".to_string()
}

fn default_version() -> String {
    "2018-09-20".to_string()
}

fn default_workspace_name() -> String {
    "Acarya Trial ChatBot".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_config_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.version, "2018-09-20");
        assert_eq!(config.workspace_name, "Acarya Trial ChatBot");
        assert!(config.url.starts_with("https://"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = AssistantConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_empty_api_key() {
        let config = AssistantConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_workspace_name() {
        let config = AssistantConfig {
            api_key: Some(Secret::new("iam-key".to_string())),
            workspace_name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyWorkspaceName)
        ));
    }

    #[test]
    fn test_validation_bad_url() {
        let config = AssistantConfig {
            api_key: Some(Secret::new("iam-key".to_string())),
            url: "gateway.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidServiceUrl(_))
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AssistantConfig {
            api_key: Some(Secret::new("iam-key".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
