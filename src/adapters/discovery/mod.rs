//! Discovery Client - document search service integration.
//!
//! Connects to the search service's environment, collection, document and
//! query APIs. Same authentication scheme as the assistant client: HTTP basic
//! with the `apikey` username, version date as a query parameter.
//!
//! Setup resolves an environment (by name, or the first writable one),
//! matches the configured collection by name (creating it when absent), and
//! ingests the seed document set when the collection holds fewer documents
//! than the set.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::domain::{QueryDefaults, QueryResult};
use crate::ports::{SearchService, ServiceError};

use super::error_from_response;

/// Search service client backed by the discovery v1 HTTP API.
pub struct DiscoveryClient {
    config: DiscoveryConfig,
    client: Client,
}

impl DiscoveryClient {
    /// Creates a new client for the configured service instance.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn environments_url(&self) -> String {
        format!("{}/v1/environments", self.config.url)
    }

    fn collections_url(&self, environment_id: &str) -> String {
        format!("{}/collections", self.environment_url(environment_id))
    }

    fn environment_url(&self, environment_id: &str) -> String {
        format!("{}/v1/environments/{}", self.config.url, environment_id)
    }

    fn collection_url(&self, defaults: &QueryDefaults) -> String {
        format!(
            "{}/collections/{}",
            self.environment_url(&defaults.environment_id),
            defaults.collection_id
        )
    }

    fn documents_url(&self, defaults: &QueryDefaults) -> String {
        format!("{}/documents", self.collection_url(defaults))
    }

    fn query_url(&self, defaults: &QueryDefaults) -> String {
        format!("{}/query", self.collection_url(defaults))
    }

    /// Sends a request with authentication and version, failing on non-2xx.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let response = request
            .basic_auth("apikey", self.config.api_key())
            .query(&[("version", self.config.version.as_str())])
            .send()
            .await
            .map_err(|e| ServiceError::network(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Sends a GET request and decodes the JSON response.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ServiceError> {
        self.send(self.client.get(url))
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::parse(e.to_string()))
    }

    /// Picks the environment queries will run in.
    async fn resolve_environment(&self) -> Result<String, ServiceError> {
        let listing: EnvironmentListing = self.get_json(self.environments_url()).await?;

        let found = match &self.config.environment_name {
            Some(name) => listing.environments.iter().find(|e| &e.name == name),
            None => listing.environments.iter().find(|e| !e.read_only),
        };

        match found {
            Some(environment) => Ok(environment.environment_id.clone()),
            None => Err(ServiceError::setup(match &self.config.environment_name {
                Some(name) => format!("environment '{name}' not found"),
                None => "no writable environment available".to_string(),
            })),
        }
    }

    /// Matches the configured collection by name, creating it when absent.
    async fn resolve_collection(&self, environment_id: &str) -> Result<String, ServiceError> {
        let name = &self.config.collection_name;
        let listing: CollectionListing = self.get_json(self.collections_url(environment_id)).await?;

        if let Some(found) = listing.collections.iter().find(|c| &c.name == name) {
            info!(collection_id = %found.collection_id, %name, "validated existing collection");
            return Ok(found.collection_id.clone());
        }

        let created: CreatedCollection = self
            .send(
                self.client
                    .post(self.collections_url(environment_id))
                    .json(&json!({ "name": name })),
            )
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::parse(e.to_string()))?;

        info!(collection_id = %created.collection_id, %name, "created collection");
        Ok(created.collection_id)
    }

    /// Ingests the seed document set unless the collection already holds it.
    async fn ensure_documents(&self, defaults: &QueryDefaults) -> Result<(), ServiceError> {
        let Some(dir) = &self.config.documents_dir else {
            return Ok(());
        };

        let files = list_json_files(Path::new(dir)).await?;
        if files.is_empty() {
            debug!(%dir, "no seed documents to ingest");
            return Ok(());
        }

        let detail: CollectionDetail = self.get_json(self.collection_url(defaults)).await?;
        let available = detail.document_counts.available;
        if available >= files.len() as u64 {
            debug!(available, "collection already holds the seed documents");
            return Ok(());
        }

        for path in &files {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                ServiceError::setup(format!("failed to read seed document {}: {e}", path.display()))
            })?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document.json")
                .to_string();

            let part = multipart::Part::bytes(bytes)
                .file_name(file_name.clone())
                .mime_str("application/json")
                .map_err(|e| ServiceError::parse(e.to_string()))?;
            let form = multipart::Form::new().part("file", part);

            self.send(self.client.post(self.documents_url(defaults)).multipart(form))
                .await?;
            info!(document = %file_name, "ingested seed document");
        }
        Ok(())
    }
}

#[async_trait]
impl SearchService for DiscoveryClient {
    async fn setup_collection(&self) -> Result<QueryDefaults, ServiceError> {
        let environment_id = self.resolve_environment().await?;
        let collection_id = self.resolve_collection(&environment_id).await?;

        let defaults = QueryDefaults {
            environment_id,
            collection_id,
        };
        self.ensure_documents(&defaults).await?;
        Ok(defaults)
    }

    async fn query(
        &self,
        defaults: &QueryDefaults,
        natural_language_query: &str,
    ) -> Result<QueryResult, ServiceError> {
        self.send(self.client.get(self.query_url(defaults)).query(&[
            ("natural_language_query", natural_language_query),
            ("passages", "true"),
        ]))
        .await?
        .json()
        .await
        .map_err(|e| ServiceError::parse(e.to_string()))
    }
}

/// JSON files in `dir`, sorted by name for a stable ingestion order.
async fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, ServiceError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ServiceError::setup(format!("failed to read documents dir {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ServiceError::setup(format!("failed to read documents dir {}: {e}", dir.display())))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Deserialize)]
struct EnvironmentListing {
    #[serde(default)]
    environments: Vec<EnvironmentSummary>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentSummary {
    environment_id: String,
    name: String,
    #[serde(default)]
    read_only: bool,
}

#[derive(Debug, Deserialize)]
struct CollectionListing {
    #[serde(default)]
    collections: Vec<CollectionSummary>,
}

#[derive(Debug, Deserialize)]
struct CollectionSummary {
    collection_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedCollection {
    collection_id: String,
}

#[derive(Debug, Deserialize)]
struct CollectionDetail {
    #[serde(default)]
    document_counts: DocumentCounts,
}

#[derive(Debug, Default, Deserialize)]
struct DocumentCounts {
    #[serde(default)]
    available: u64,
}
