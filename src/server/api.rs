use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::errors::SectionError;
use crate::profile::{GroupInfo, ProfileRegistry};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub registry: ProfileRegistry,
    /// Poll interval for displays served over `/ws/{group}`.
    pub poll_interval: Duration,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({"error": message}))).into_response()
    }
}

impl From<SectionError> for ApiError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::UnknownGroup(_) => ApiError::NotFound(err.to_string()),
            SectionError::InvalidSession(_) | SectionError::Collection(_) => ApiError::BadRequest(err.to_string()),
            SectionError::Store(_) | SectionError::Encode(_) => {
                tracing::error!(error = %err, "section request failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/groups", get(list_groups))
        .route("/api/profile/{group}", get(get_view))
        .route("/api/profile/{group}/raw", get(get_raw))
        .route("/api/profile/{group}/dashboard", get(get_dashboard).put(commit_dashboard))
        .route("/api/profile/{group}/stale", post(consume_stale))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_groups(State(state): State<SharedState>) -> Json<Vec<GroupInfo>> {
    Json(state.registry.groups())
}

async fn get_view(State(state): State<SharedState>, Path(group): Path<String>) -> Result<Json<Value>, ApiError> {
    let section = state.registry.get(&group)?;
    Ok(Json(section.view_json().await?))
}

async fn get_raw(State(state): State<SharedState>, Path(group): Path<String>) -> Result<Json<Value>, ApiError> {
    let section = state.registry.get(&group)?;
    Ok(Json(section.raw_json().await?))
}

async fn get_dashboard(State(state): State<SharedState>, Path(group): Path<String>) -> Result<Json<Value>, ApiError> {
    let section = state.registry.get(&group)?;
    Ok(Json(section.dashboard_json().await?))
}

async fn commit_dashboard(
    State(state): State<SharedState>,
    Path(group): Path<String>,
    Json(session): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let section = state.registry.get(&group)?;
    let fields = section.commit_json(session).await?;
    Ok(Json(json!({ "group": section.slug(), "fieldList": fields })))
}

/// Read-then-clear the section's staleness flag on behalf of a remote display.
async fn consume_stale(State(state): State<SharedState>, Path(group): Path<String>) -> Result<Json<Value>, ApiError> {
    let section = state.registry.get(&group)?;
    let stale = section.consume().is_stale();
    Ok(Json(json!({ "flag": section.flag_name(), "stale": stale })))
}
