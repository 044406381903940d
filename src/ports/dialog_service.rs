//! Dialog Service Port - Interface to the conversational assistant.

use async_trait::async_trait;

use crate::domain::{DialogResponse, MessageRequest, WorkspaceId};

use super::error::ServiceError;

/// Port for the dialog assistant service.
///
/// Implementations connect to the external service's workspace and message
/// APIs. Setup runs once at process start; `message` runs once per chat turn.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Create-or-validate the configured workspace.
    ///
    /// Matches an existing workspace by name, creating one when absent, and
    /// returns its identifier - the readiness handle every later `message`
    /// call needs. The two paths are indistinguishable to the caller.
    async fn setup_workspace(&self) -> Result<WorkspaceId, ServiceError>;

    /// Send one chat turn and return the service's response.
    async fn message(&self, request: &MessageRequest) -> Result<DialogResponse, ServiceError>;
}
