//! TrueRep web server.
//!
//! Endpoints:
//! - GET / - Index page rendered from `index.html`
//! - POST /api/save-session - Log a session payload and echo it back
//! - GET /static/* - Static assets
//!
//! The save endpoint does not touch the session store; it only logs and
//! echoes the payload.

mod error;
mod templates;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, Uri},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use minijinja::Environment;
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{ServeConfig, STATIC_PREFIX};

pub use error::ApiError;
use templates::PageContext;

/// Header set by reverse proxies to report the original scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Shared, read-only server state.
pub struct AppState {
    /// Template environment for page rendering.
    templates: Environment<'static>,
    /// Base URL used when a request has no Host header.
    fallback_base_url: String,
}

/// Response body for `POST /api/save-session`.
#[derive(Debug, Serialize)]
pub struct SaveSessionResponse {
    pub status: &'static str,
    pub data: Value,
}

// === Server Lifecycle ===

/// Build the application router with its collaborators wired in.
pub fn build_app(config: &ServeConfig) -> Router {
    let state = Arc::new(AppState {
        templates: templates::environment(&config.templates_dir),
        fallback_base_url: config.fallback_base_url(),
    });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/save-session", post(save_session))
        .nest_service(STATIC_PREFIX, ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until a shutdown signal arrives.
pub async fn start_server(config: ServeConfig) -> Result<()> {
    let addr = config.addr();
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        static_dir = %config.static_dir.display(),
        templates_dir = %config.templates_dir.display(),
        "TrueRep server listening"
    );

    if config.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            warn!(error = %e, "failed to open browser");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("TrueRep server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutdown signal received");
}

// === Handlers ===

async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Html<String>, ApiError> {
    let base_url = request_base_url(&headers).unwrap_or_else(|| state.fallback_base_url.clone());
    let ctx = PageContext::new(&base_url, uri.path());

    let html = templates::render_index(&state.templates, &ctx)?;
    Ok(Html(html))
}

async fn save_session(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SaveSessionResponse>, ApiError> {
    let Json(data) = payload?;

    let response = SaveSessionResponse {
        status: "success",
        data: Value::Object(data),
    };

    // Payload is logged verbatim; nothing filters sensitive fields.
    info!(payload = %response.data, "session saved");

    Ok(Json(response))
}

/// Derive `scheme://host` from the request headers.
fn request_base_url(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    Some(format!("{scheme}://{host}"))
}
