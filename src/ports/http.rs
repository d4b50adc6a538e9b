//! Axum routes for the notes HTTP API.
//!
//! | Method | Path                | Success              |
//! |--------|---------------------|----------------------|
//! | GET    | `/api/notes`        | 200, tree as JSON    |
//! | POST   | `/api/notes`        | 200, `{success}`     |
//! | GET    | `/api/notes/*path`  | 200, `{content}`     |
//! | DELETE | `/api/notes/*path`  | 204                  |
//! | GET    | `/api/health`       | 200, `{status}`      |
//!
//! Failures answer with [`ErrorResponse`] and a status derived from the
//! domain error.

use crate::application::{NoteDeleter, NoteLister, NoteRepository, NoteViewer, NoteWriter};
use crate::domain::{DomainError, TreeNode};
use crate::infrastructure::Config;
use crate::ports::api::{
    ErrorResponse, HealthResponse, NoteContent, WriteNoteRequest, WriteNoteResponse,
};
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

pub struct AppState<R> {
    pub repository: Arc<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Request body rejected before reaching the repository
    Rejected(StatusCode, String),
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Domain(e) => {
                let status = match &e {
                    DomainError::NoteNotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::InvalidPath(_) => StatusCode::BAD_REQUEST,
                    DomainError::RootNotFound(_) | DomainError::StorageError(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, ErrorResponse::new(e.kind(), e.to_string()))
            }
            ApiError::Rejected(status, msg) => {
                let kind = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "bad_request"
                };
                (status, ErrorResponse::new(kind, msg))
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("internal", msg),
            ),
        };

        if status.is_server_error() {
            error!(%status, kind = %body.kind, error = %body.error, "Request failed");
        } else {
            debug!(%status, kind = %body.kind, error = %body.error, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// Run a synchronous repository call off the async workers
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Repository task failed: {}", e)))?
        .map_err(ApiError::from)
}

// GET /api/notes
async fn list_notes<R>(State(state): State<AppState<R>>) -> Result<Json<Vec<TreeNode>>, ApiError>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let tree = run_blocking(move || NoteLister::new(state.repository).list_tree()).await?;
    Ok(Json(tree))
}

// POST /api/notes
async fn write_note<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<WriteNoteRequest>, JsonRejection>,
) -> Result<Json<WriteNoteResponse>, ApiError>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    run_blocking(move || NoteWriter::new(state.repository).write_note(&req.path, &req.content))
        .await?;
    Ok(Json(WriteNoteResponse { success: true }))
}

// GET /api/notes/*path
async fn read_note<R>(
    State(state): State<AppState<R>>,
    Path(path): Path<String>,
) -> Result<Json<NoteContent>, ApiError>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let note = run_blocking(move || NoteViewer::new(state.repository).view_note(&path)).await?;
    Ok(Json(NoteContent {
        content: note.content,
    }))
}

// DELETE /api/notes/*path
async fn delete_note<R>(
    State(state): State<AppState<R>>,
    Path(path): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: NoteRepository + Send + Sync + 'static,
{
    run_blocking(move || NoteDeleter::new(state.repository).delete_note(&path)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{}'", o))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Build the API router around a repository
pub fn router<R>(repository: Arc<R>, config: &Config) -> Result<Router>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let state = AppState { repository };

    let body_limit = match config.server.max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Ok(Router::new()
        .route("/api/notes", get(list_notes::<R>).post(write_note::<R>))
        .route(
            "/api/notes/*path",
            get(read_note::<R>).delete(delete_note::<R>),
        )
        .route("/api/health", get(health))
        .with_state(state)
        .layer(body_limit)
        .layer(cors_layer(&config.cors.allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve<R>(repository: Arc<R>, config: &Config) -> Result<()>
where
    R: NoteRepository + Send + Sync + 'static,
{
    let app = router(repository, config)?;
    let addr = config.server.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Notes API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Notes API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
