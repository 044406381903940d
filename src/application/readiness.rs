//! Process-wide readiness state for the two external services.
//!
//! Each service has one slot, written exactly once by its setup task and
//! read-only thereafter. Reading a slot before setup completes yields `None`
//! (the service is still pending). Setup failures accumulate into a single
//! error string; once that string is non-empty the process is winding down
//! and every request receives the apology reply until it exits.

use once_cell::sync::OnceCell;
use std::sync::Mutex;

use crate::domain::{QueryDefaults, WorkspaceId};

/// Readiness slots and the accumulated setup error.
#[derive(Debug, Default)]
pub struct Readiness {
    workspace: OnceCell<WorkspaceId>,
    search_defaults: OnceCell<QueryDefaults>,
    setup_error: Mutex<String>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the validated dialog workspace.
    ///
    /// A handle, once recorded, is never replaced; a second write is ignored.
    pub fn record_workspace(&self, workspace_id: WorkspaceId) {
        let _ = self.workspace.set(workspace_id);
    }

    /// The dialog workspace handle, or `None` while setup is pending.
    pub fn workspace(&self) -> Option<&WorkspaceId> {
        self.workspace.get()
    }

    /// Records the validated search query defaults.
    pub fn record_search_defaults(&self, defaults: QueryDefaults) {
        let _ = self.search_defaults.set(defaults);
    }

    /// The search query defaults, or `None` while setup is pending.
    pub fn search_defaults(&self) -> Option<&QueryDefaults> {
        self.search_defaults.get()
    }

    /// Appends one setup failure to the accumulated error text.
    pub fn record_setup_failure(&self, reason: &str) {
        let mut error = self.setup_error.lock().expect("setup error lock poisoned");
        error.push(' ');
        error.push_str(reason);
    }

    /// The accumulated setup error, or `None` while no setup has failed.
    pub fn setup_error(&self) -> Option<String> {
        let error = self.setup_error.lock().expect("setup error lock poisoned");
        if error.is_empty() {
            None
        } else {
            Some(error.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_start_pending() {
        let readiness = Readiness::new();
        assert!(readiness.workspace().is_none());
        assert!(readiness.search_defaults().is_none());
        assert!(readiness.setup_error().is_none());
    }

    #[test]
    fn workspace_recorded_once() {
        let readiness = Readiness::new();
        readiness.record_workspace(WorkspaceId::new("ws-1"));
        assert_eq!(readiness.workspace().unwrap().as_str(), "ws-1");
    }

    #[test]
    fn workspace_never_replaced() {
        let readiness = Readiness::new();
        readiness.record_workspace(WorkspaceId::new("ws-1"));
        readiness.record_workspace(WorkspaceId::new("ws-2"));
        assert_eq!(readiness.workspace().unwrap().as_str(), "ws-1");
    }

    #[test]
    fn search_defaults_recorded_once() {
        let readiness = Readiness::new();
        readiness.record_search_defaults(QueryDefaults {
            environment_id: "env-1".to_string(),
            collection_id: "col-1".to_string(),
        });
        assert_eq!(
            readiness.search_defaults().unwrap().collection_id,
            "col-1"
        );
    }

    #[test]
    fn setup_failures_accumulate() {
        let readiness = Readiness::new();
        readiness.record_setup_failure("Assistant setup failed: no credentials");
        readiness.record_setup_failure("Discovery setup failed: no environment");

        let error = readiness.setup_error().unwrap();
        assert!(error.contains("Assistant setup failed"));
        assert!(error.contains("Discovery setup failed"));
        assert!(error.starts_with(' '));
    }

    #[test]
    fn readiness_is_independent_per_service() {
        let readiness = Readiness::new();
        readiness.record_workspace(WorkspaceId::new("ws-1"));
        assert!(readiness.workspace().is_some());
        assert!(readiness.search_defaults().is_none());
    }
}
