//! Assistant Client - dialog service integration.
//!
//! Connects to the assistant's workspace and message APIs. Authentication is
//! HTTP basic with the `apikey` username scheme; the API version date rides
//! along as a query parameter on every call.
//!
//! Setup is create-or-validate: the configured workspace name is matched
//! against the instance's workspace list, and a workspace is only created
//! when no match exists.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::config::AssistantConfig;
use crate::domain::{DialogResponse, MessageRequest, WorkspaceId};
use crate::ports::{DialogService, ServiceError};

use super::error_from_response;

/// Dialog service client backed by the assistant's v1 HTTP API.
pub struct AssistantClient {
    config: AssistantConfig,
    client: Client,
}

impl AssistantClient {
    /// Creates a new client for the configured service instance.
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Builds the workspaces collection URL.
    fn workspaces_url(&self) -> String {
        format!("{}/v1/workspaces", self.config.url)
    }

    /// Builds the message endpoint URL for a workspace.
    fn message_url(&self, workspace_id: &WorkspaceId) -> String {
        format!("{}/v1/workspaces/{}/message", self.config.url, workspace_id)
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

    /// The request body for creating the workspace.
    ///
    /// Uses the configured skeleton file when present (injecting the name if
    /// the skeleton omits one), otherwise a minimal empty workspace.
    async fn create_workspace_body(&self) -> Result<Value, ServiceError> {
        let name = &self.config.workspace_name;

        let Some(path) = &self.config.workspace_file else {
            return Ok(json!({
                "name": name,
                "description": "Created by the chat relay on first start.",
                "language": "en"
            }));
        };

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::setup(format!("failed to read workspace file {path}: {e}")))?;
        let mut body: Value = serde_json::from_str(&raw)
            .map_err(|e| ServiceError::setup(format!("invalid workspace file {path}: {e}")))?;

        if let Some(object) = body.as_object_mut() {
            object
                .entry("name")
                .or_insert_with(|| Value::String(name.clone()));
        }
        Ok(body)
    }
}

#[async_trait]
impl DialogService for AssistantClient {
    async fn setup_workspace(&self) -> Result<WorkspaceId, ServiceError> {
        let name = &self.config.workspace_name;

        let listing: WorkspaceListing = self
            .send(self.client.get(self.workspaces_url()))
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::parse(e.to_string()))?;

        if let Some(found) = listing.workspaces.iter().find(|w| &w.name == name) {
            info!(workspace_id = %found.workspace_id, %name, "validated existing workspace");
            return Ok(WorkspaceId::new(&found.workspace_id));
        }

        let body = self.create_workspace_body().await?;
        let created: CreatedWorkspace = self
            .send(self.client.post(self.workspaces_url()).json(&body))
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::parse(e.to_string()))?;

        info!(workspace_id = %created.workspace_id, %name, "created workspace");
        Ok(WorkspaceId::new(created.workspace_id))
    }

    async fn message(&self, request: &MessageRequest) -> Result<DialogResponse, ServiceError> {
        self.send(
            self.client
                .post(self.message_url(&request.workspace_id))
                .json(request),
        )
        .await?
        .json()
        .await
        .map_err(|e| ServiceError::parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct WorkspaceListing {
    #[serde(default)]
    workspaces: Vec<WorkspaceSummary>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSummary {
    name: String,
    workspace_id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedWorkspace {
    workspace_id: String,
}
