//! Process entry point.
//!
//! Wires the service clients, spawns the two setup tasks, and serves the chat
//! API plus the static browser UI. Setup failures flip a shutdown signal; the
//! process then exits with a distinguished code so an external supervisor can
//! restart it.

use std::process::ExitCode;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use acarya_chat::adapters::http::chat::{chat_router, ChatAppState};
use acarya_chat::adapters::{AssistantClient, DiscoveryClient};
use acarya_chat::application::handlers::chat::RelayMessageHandler;
use acarya_chat::application::{setup, Readiness};
use acarya_chat::config::{AppConfig, ServerConfig};
use acarya_chat::ports::{DialogService, SearchService};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    if let Err(err) = config.validate() {
        error!("invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    let dialog: Arc<dyn DialogService> = Arc::new(AssistantClient::new(config.assistant.clone()));
    let search: Arc<dyn SearchService> = Arc::new(DiscoveryClient::new(config.discovery.clone()));
    let readiness = Arc::new(Readiness::new());

    // Both services set themselves up concurrently. Requests arriving before
    // they finish get placeholder replies; a failure in either flips the
    // shutdown signal.
    let mut shutdown = setup::spawn_setup_tasks(dialog.clone(), search.clone(), readiness.clone());

    let relay = Arc::new(RelayMessageHandler::new(dialog, search, readiness.clone()));
    let app = chat_router()
        .with_state(ChatAppState::new(relay))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, "failed to bind: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(%addr, "listening");

    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown.changed().await;
    });
    if let Err(err) = serve.await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }

    // The entry point, not the setup tasks, decides termination: exit code 2
    // tells the supervisor this was a setup failure, not a clean stop.
    match readiness.setup_error() {
        Some(setup_error) => {
            error!("The app failed to initialize properly. Setup and restart needed.{setup_error}");
            ExitCode::from(2)
        }
        None => ExitCode::SUCCESS,
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}
