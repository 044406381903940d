//! Search query and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default query parameters resolved during search-service setup.
///
/// This is the search service's readiness handle: it addresses the validated
/// collection and is merged into every query issued on behalf of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefaults {
    pub environment_id: String,
    pub collection_id: String,
}

/// One ranked passage extracted from the indexed documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    #[serde(default)]
    pub passage_text: String,

    #[serde(default)]
    pub passage_score: f64,

    /// Other passage fields (document id, offsets, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A search response, relevance-ranked by the service.
///
/// The relay never re-sorts passages; the service's order is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub passages: Vec<Passage>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
