//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use delayq_core::{CancelOutcome, LifecycleController, TaskCounts, TaskId, TaskView};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::validate::{ScheduleRequest, ValidationError};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub controller: Arc<LifecycleController>,
    pub started: Instant,
}

impl AppState {
    pub fn new(controller: Arc<LifecycleController>) -> Self {
        Self {
            controller,
            started: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/tasks", post(schedule_task).get(list_tasks))
        .route("/tasks/{id}", get(get_task))
        .route("/tasks/{id}/cancel", post(cancel_task))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started.elapsed().as_secs(),
    }))
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Json<TaskCounts> {
    Json(state.controller.counts())
}

/// POST /tasks
pub async fn schedule_task(
    State(state): State<AppState>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let Json(request) = body.map_err(|rejection| ValidationError::Body(rejection.body_text()))?;
    let valid = request.validate(state.controller.config().max_delay_secs)?;

    let task = state.controller.schedule_task(valid.message, valid.delay_secs);
    Ok((
        StatusCode::CREATED,
        Json(LifecycleController::to_external_view(&task)),
    ))
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<TaskView>> {
    Json(
        state
            .controller
            .get_all_tasks()
            .iter()
            .map(LifecycleController::to_external_view)
            .collect(),
    )
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let id = parse_id(raw_id)?;
    let task = state.controller.get_task_by_id(&id)?;
    Ok(Json(LifecycleController::to_external_view(&task)))
}

/// POST /tasks/{id}/cancel
///
/// 200 for a fresh or repeated cancel, 409 with the unchanged task when it
/// already completed.
pub async fn cancel_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let id = parse_id(raw_id)?;
    let result = state.controller.cancel_task(&id)?;
    let view = LifecycleController::to_external_view(&result.task);

    match result.outcome {
        CancelOutcome::Conflict => Err(ApiError::Conflict(Box::new(view))),
        CancelOutcome::Canceled | CancelOutcome::AlreadyCanceled => Ok(Json(view)),
    }
}

/// An id that does not parse was never issued, so it is reported as not found.
fn parse_id(raw: String) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(raw))
}
