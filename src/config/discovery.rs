//! Document search service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the document search service.
///
/// Startup resolves an environment and a collection (matched or created by
/// name) and optionally ingests a seed document set; queries then run against
/// that collection for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Service endpoint base URL
    #[serde(default = "default_url")]
    pub url: String,

    /// IAM API key for the service instance
    pub api_key: Option<Secret<String>>,

    /// API version date sent with every request
    #[serde(default = "default_version")]
    pub version: String,

    /// Name of the environment to use; absent means the first writable one
    pub environment_name: Option<String>,

    /// Name of the collection validated or created at startup
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Optional directory of JSON seed documents to ingest into the collection
    pub documents_dir: Option<String>,
}

impl DiscoveryConfig {
    /// Exposes the API key (for making requests)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some_and(|k| !k.is_empty())
    }

    /// Validate discovery configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ACARYA__DISCOVERY__API_KEY"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidServiceUrl("discovery.url"));
        }
        if self.collection_name.trim().is_empty() {
            return Err(ValidationError::EmptyCollectionName);
        }
        Ok(())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            version: default_version(),
            environment_name: None,
            collection_name: default_collection_name(),
            documents_dir: None,
        }
    }
}

fn default_url() -> String {
    "https://gateway.watsonplatform.net/discovery/api".to_string()
}

fn default_version() -> String {
    "2018-10-15".to_string()
}

fn default_collection_name() -> String {
    "Acarya Trial ChatBot".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_config_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.version, "2018-10-15");
        assert_eq!(config.collection_name, "Acarya Trial ChatBot");
        assert!(config.environment_name.is_none());
        assert!(config.documents_dir.is_none());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = DiscoveryConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_empty_collection_name() {
        let config = DiscoveryConfig {
            api_key: Some(Secret::new("iam-key".to_string())),
            collection_name: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyCollectionName)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = DiscoveryConfig {
            api_key: Some(Secret::new("iam-key".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
