//! Startup coordination for the two external services.
//!
//! Both setup tasks are spawned back-to-back and run independently; there is
//! no ordering between them. Each writes its readiness slot on success. On
//! failure it records the reason and flips the shutdown channel - the entry
//! point, not the task, decides how the process terminates, and requests that
//! race the shutdown receive the apology reply.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::ports::{DialogService, SearchService};

use super::readiness::Readiness;

/// Spawns both setup tasks and returns the shutdown signal receiver.
///
/// The receiver resolves (via `changed`) as soon as either setup fails; it
/// stays silent for the whole process lifetime otherwise.
pub fn spawn_setup_tasks(
    dialog: Arc<dyn DialogService>,
    search: Arc<dyn SearchService>,
    readiness: Arc<Readiness>,
) -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    let tx = Arc::new(tx);

    tokio::spawn(run_dialog_setup(dialog, readiness.clone(), tx.clone()));
    tokio::spawn(run_search_setup(search, readiness, tx));

    rx
}

async fn run_dialog_setup(
    dialog: Arc<dyn DialogService>,
    readiness: Arc<Readiness>,
    shutdown: Arc<watch::Sender<bool>>,
) {
    match dialog.setup_workspace().await {
        Ok(workspace_id) => {
            info!(%workspace_id, "assistant is ready");
            readiness.record_workspace(workspace_id);
        }
        Err(err) => fail(&readiness, &shutdown, &format!("Assistant setup failed: {err}")),
    }
}

async fn run_search_setup(
    search: Arc<dyn SearchService>,
    readiness: Arc<Readiness>,
    shutdown: Arc<watch::Sender<bool>>,
) {
    match search.setup_collection().await {
        Ok(defaults) => {
            info!(collection_id = %defaults.collection_id, "discovery is ready");
            readiness.record_search_defaults(defaults);
        }
        Err(err) => fail(&readiness, &shutdown, &format!("Discovery setup failed: {err}")),
    }
}

/// Records a setup failure and signals the entry point to wind down.
fn fail(readiness: &Readiness, shutdown: &watch::Sender<bool>, reason: &str) {
    error!("{reason}");
    readiness.record_setup_failure(reason);
    error!("aborting due to setup error");
    let _ = shutdown.send(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::{DialogResponse, MessageRequest, QueryDefaults, QueryResult, WorkspaceId};
    use crate::ports::ServiceError;

    struct StubDialog {
        result: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl DialogService for StubDialog {
        async fn setup_workspace(&self) -> Result<WorkspaceId, ServiceError> {
            match self.result {
                Ok(id) => Ok(WorkspaceId::new(id)),
                Err(reason) => Err(ServiceError::setup(reason)),
            }
        }

        async fn message(&self, _request: &MessageRequest) -> Result<DialogResponse, ServiceError> {
            unimplemented!("not exercised by setup tests")
        }
    }

    struct StubSearch {
        result: Result<QueryDefaults, &'static str>,
    }

    #[async_trait]
    impl SearchService for StubSearch {
        async fn setup_collection(&self) -> Result<QueryDefaults, ServiceError> {
            match &self.result {
                Ok(defaults) => Ok(defaults.clone()),
                Err(reason) => Err(ServiceError::setup(*reason)),
            }
        }

        async fn query(
            &self,
            _defaults: &QueryDefaults,
            _natural_language_query: &str,
        ) -> Result<QueryResult, ServiceError> {
            unimplemented!("not exercised by setup tests")
        }
    }

    fn test_defaults() -> QueryDefaults {
        QueryDefaults {
            environment_id: "env-1".to_string(),
            collection_id: "col-1".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_setup_fills_both_slots() {
        let readiness = Arc::new(Readiness::new());
        let mut rx = spawn_setup_tasks(
            Arc::new(StubDialog { result: Ok("ws-1") }),
            Arc::new(StubSearch {
                result: Ok(test_defaults()),
            }),
            readiness.clone(),
        );

        // Give both tasks a chance to run; the channel must stay silent.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert!(readiness.workspace().is_some());
        assert!(readiness.search_defaults().is_some());
        assert!(readiness.setup_error().is_none());
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test]
    async fn dialog_failure_signals_shutdown() {
        let readiness = Arc::new(Readiness::new());
        let mut rx = spawn_setup_tasks(
            Arc::new(StubDialog {
                result: Err("no credentials"),
            }),
            Arc::new(StubSearch {
                result: Ok(test_defaults()),
            }),
            readiness.clone(),
        );

        rx.changed().await.unwrap();
        assert!(*rx.borrow());

        let error = readiness.setup_error().unwrap();
        assert!(error.contains("Assistant setup failed"));
        assert!(error.contains("no credentials"));
    }

    #[tokio::test]
    async fn search_failure_signals_shutdown_independently() {
        let readiness = Arc::new(Readiness::new());
        let mut rx = spawn_setup_tasks(
            Arc::new(StubDialog { result: Ok("ws-1") }),
            Arc::new(StubSearch {
                result: Err("no environment"),
            }),
            readiness.clone(),
        );

        rx.changed().await.unwrap();

        // The dialog slot may still have been filled; failure in one service
        // is enough to wind the process down.
        let error = readiness.setup_error().unwrap();
        assert!(error.contains("Discovery setup failed"));
    }
}
