//! Chat turn and dialog response types.
//!
//! The server is stateless across requests: the client carries the
//! conversation context from one turn to the next, and the dialog service
//! returns an updated context with every response. Both are treated as opaque
//! JSON mappings here, except for the one field the relay acts on - the
//! `action` flag the conversation graph sets when it wants a document lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier of a validated dialog workspace.
///
/// Obtained once at startup and never replaced for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One client chat turn.
///
/// Both fields are optional; an empty body is a valid (if unusual) turn.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatTurn {
    /// Structured input, usually `{ "text": "..." }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Map<String, Value>>,

    /// Conversation context returned by the previous turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

/// One message call to the dialog service.
///
/// The workspace identifier addresses the request (it travels in the URL, not
/// the body); missing client fields default to empty mappings.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    #[serde(skip)]
    pub workspace_id: WorkspaceId,
    pub input: Map<String, Value>,
    pub context: Map<String, Value>,
}

impl MessageRequest {
    /// Builds the service request for a client turn.
    pub fn from_turn(workspace_id: WorkspaceId, turn: ChatTurn) -> Self {
        Self {
            workspace_id,
            input: turn.input.unwrap_or_default(),
            context: turn.context.unwrap_or_default(),
        }
    }
}

/// The text portion of a dialog response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogOutput {
    /// Ordered response lines
    #[serde(default)]
    pub text: Vec<String>,

    /// Other output fields the service returns (intents visited, etc.)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A dialog service response, returned to the client after the merge step.
///
/// Unknown top-level fields (intents, entities, ...) are captured in `extra`
/// so the client sees exactly what the service produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogResponse {
    /// The input the service interpreted, echoed back
    #[serde(default)]
    pub input: Map<String, Value>,

    /// Response text and related output fields
    #[serde(default)]
    pub output: DialogOutput,

    /// Updated conversation context (may carry an `action` flag)
    #[serde(default)]
    pub context: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DialogResponse {
    /// A chat-shaped response carrying a single server-generated line.
    ///
    /// Used for the setup-failure and initialization-in-progress replies,
    /// which must look like ordinary dialog responses to the client.
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            output: DialogOutput {
                text: vec![text.into()],
                extra: Map::new(),
            },
            ..Default::default()
        }
    }

    /// The latest user input text as echoed by the service, or `""`.
    pub fn input_text(&self) -> &str {
        self.input
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Whether the context carries a set `action` flag.
    ///
    /// The conversation graph sets `action` to request a document lookup and
    /// the relay clears it to `{}` afterwards, so the emptiness rules follow
    /// the graph's truthiness contract: absent, `null`, `false`, `""`, `{}`
    /// and `[]` all mean "no lookup requested".
    pub fn action_requested(&self) -> bool {
        match self.context.get("action") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Object(m)) => !m.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        }
    }

    /// Clears the action flag after a lookup was attempted.
    ///
    /// One-shot per request: the graph must set the flag again on a later
    /// turn if it wants another lookup.
    pub fn clear_action(&mut self) {
        self.context
            .insert("action".to_string(), Value::Object(Map::new()));
    }

    /// Appends one line to the response text.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.output.text.push(line.into());
    }
}
