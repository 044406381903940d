//! Search Service Port - Interface to the document retrieval service.

use async_trait::async_trait;

use crate::domain::{QueryDefaults, QueryResult};

use super::error::ServiceError;

/// Port for the document search service.
///
/// Setup runs once at process start and yields the default query parameters;
/// `query` runs whenever a dialog response requests a lookup.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Create-or-validate the configured collection.
    ///
    /// Resolves an environment, matches the collection by name (creating it
    /// when absent), ingests the seed document set when the collection holds
    /// fewer documents than the set, and returns the parameters future
    /// queries are addressed with.
    async fn setup_collection(&self) -> Result<QueryDefaults, ServiceError>;

    /// Run one natural-language query against the validated collection.
    ///
    /// Passage extraction is always requested; the service returns passages
    /// in relevance order.
    async fn query(
        &self,
        defaults: &QueryDefaults,
        natural_language_query: &str,
    ) -> Result<QueryResult, ServiceError>;
}
