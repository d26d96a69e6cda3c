//! HTTP command API.
//!
//! Exposes the wire protocol over axum. Every response body is an
//! [`ApiResult`] envelope with HTTP status 200 — callers branch on the
//! envelope's `success`, and only transport-level failures are reported
//! outside the envelope shape (by never producing a response at all).
//!
//! Handlers resolve the service context from the registry on every request
//! rather than caching capabilities, because a reload replaces the context
//! wholesale. When no context is installed (host stopped or mid-reload) the
//! handler answers a failed envelope instead of an HTTP error.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use inputcast_core::{routes, ApiResult, ExecutionContext, InputConfiguration};

use crate::application::commands::{
    ExecuteAction, GetAllConfigurations, GetAllScripts, GetConfiguration, RemoveConfiguration,
    SaveConfiguration,
};
use crate::application::context::ServiceRegistry;

/// Message used when a request arrives while no context is installed.
const NOT_RUNNING: &str = "Service is not running";

/// A running HTTP listener.
pub struct HttpServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl HttpServerHandle {
    /// The address the listener actually bound (relevant when port 0 was
    /// requested).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signals graceful shutdown and waits for the serve task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }
}

/// Binds `addr` and starts serving the command API.
///
/// # Errors
///
/// Fails when the listener cannot be bound (port in use, no permission).
pub async fn start_http_server(
    registry: Arc<ServiceRegistry>,
    addr: SocketAddr,
) -> anyhow::Result<HttpServerHandle> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to read bound address")?;

    let app = router(registry);
    let (shutdown, rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = rx.await;
        });
        if let Err(e) = serve.await {
            error!("HTTP server error: {e}");
        }
    });

    info!("command API listening on http://{local_addr}");
    Ok(HttpServerHandle {
        local_addr,
        shutdown,
        task,
    })
}

/// Builds the wire-protocol router.
pub fn router(registry: Arc<ServiceRegistry>) -> Router {
    Router::new()
        .route(
            &format!("/{}", routes::ALL_CONFIGURATIONS),
            get(get_all_configurations),
        )
        .route(&format!("/{}", routes::ALL_SCRIPTS), get(get_all_scripts))
        .route(&format!("/{}", routes::CONFIGURATION), get(get_configuration))
        .route(&format!("/{}", routes::SAVE), post(save_configuration))
        .route(&format!("/{}", routes::EXECUTE), post(execute_action))
        .route(
            &format!("/{}", routes::REMOVE_CONFIGURATION),
            post(remove_configuration),
        )
        .with_state(registry)
}

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn get_all_configurations(
    State(registry): State<Arc<ServiceRegistry>>,
) -> Json<ApiResult<Vec<String>>> {
    match registry.context() {
        Ok(ctx) => Json(GetAllConfigurations::new(Arc::clone(&ctx.configs)).execute()),
        Err(e) => Json(ApiResult::fail_with_content(
            Vec::new(),
            NOT_RUNNING,
            e.to_string(),
        )),
    }
}

async fn get_all_scripts(
    State(registry): State<Arc<ServiceRegistry>>,
) -> Json<ApiResult<Vec<String>>> {
    match registry.context() {
        Ok(ctx) => Json(GetAllScripts::new(Arc::clone(&ctx.scripts)).execute()),
        Err(e) => Json(ApiResult::fail_with_content(
            Vec::new(),
            NOT_RUNNING,
            e.to_string(),
        )),
    }
}

async fn get_configuration(
    State(registry): State<Arc<ServiceRegistry>>,
    Query(query): Query<NameQuery>,
) -> Json<ApiResult<InputConfiguration>> {
    match registry.context() {
        Ok(ctx) => Json(GetConfiguration::new(Arc::clone(&ctx.configs), query.name).execute()),
        Err(e) => Json(ApiResult::fail(NOT_RUNNING, e.to_string())),
    }
}

async fn save_configuration(
    State(registry): State<Arc<ServiceRegistry>>,
    Json(config): Json<InputConfiguration>,
) -> Json<ApiResult<String>> {
    let ctx = match registry.context() {
        Ok(ctx) => ctx,
        Err(e) => return Json(ApiResult::fail(NOT_RUNNING, e.to_string())),
    };

    // The save writes to disk; keep it off the async worker.
    let command = SaveConfiguration::new(
        Arc::clone(&ctx.configs),
        Arc::clone(&ctx.storage),
        config,
    );
    Json(run_blocking_command(|| command.execute()).await)
}

async fn remove_configuration(
    State(registry): State<Arc<ServiceRegistry>>,
    Query(query): Query<NameQuery>,
) -> Json<ApiResult<String>> {
    let ctx = match registry.context() {
        Ok(ctx) => ctx,
        Err(e) => return Json(ApiResult::fail(NOT_RUNNING, e.to_string())),
    };

    let command = RemoveConfiguration::new(
        Arc::clone(&ctx.configs),
        Arc::clone(&ctx.storage),
        query.name,
    );
    Json(run_blocking_command(|| command.execute()).await)
}

async fn execute_action(
    State(registry): State<Arc<ServiceRegistry>>,
    Json(request): Json<ExecutionContext>,
) -> Json<ApiResult<String>> {
    match registry.context() {
        Ok(ctx) => Json(ExecuteAction::new(Arc::clone(&ctx.simulator), request).execute()),
        Err(e) => Json(ApiResult::fail(NOT_RUNNING, e.to_string())),
    }
}

/// Runs a disk-touching command on the blocking pool, converting a lost
/// worker into a failed envelope rather than a transport error.
async fn run_blocking_command<T, F>(command: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ApiResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(command).await {
        Ok(result) => result,
        Err(e) => ApiResult::fail("Command did not complete", e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
