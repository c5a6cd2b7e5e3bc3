// HTTP surface for the time-tracking engine.
//
// Responsibilities
// - Translate requests into handler calls and handler errors into status
//   codes. Session authentication is owned by the surrounding application;
//   the acting user arrives as the `x-user-id` header.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::command_handlers::add_time_entry::AddTimeEntry;
use crate::application::errors::TrackingError;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks/{task_id}/start", post(start_tracking))
        .route("/tasks/{task_id}/stop", post(stop_tracking))
        .route(
            "/tasks/{task_id}/time-entries",
            get(list_time_entries).post(add_time_entry),
        )
        .route("/time-entries/{entry_id}", delete(delete_time_entry))
        .route("/active-session", get(active_session))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct DataBody<T> {
    data: T,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError(TrackingError);

impl From<TrackingError> for ApiError {
    fn from(err: TrackingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TrackingError::Unauthorized => StatusCode::UNAUTHORIZED,
            TrackingError::TaskNotFound(_) | TrackingError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            TrackingError::AlreadyTracking
            | TrackingError::NotTrackingByYou
            | TrackingError::InvalidRange => StatusCode::BAD_REQUEST,
            TrackingError::Conflict(_) => StatusCode::CONFLICT,
            TrackingError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self.0 {
            TrackingError::Backend(message) => {
                tracing::error!(error = %message, "request failed");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

fn acting_user(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ApiError(TrackingError::Unauthorized))
}

async fn start_tracking(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = acting_user(&headers)?;
    let started = state.start_tracking.handle(&task_id, &user_id).await?;
    Ok(Json(DataBody { data: started }))
}

async fn stop_tracking(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = acting_user(&headers)?;
    let stopped = state.stop_tracking.handle(&task_id, &user_id).await?;
    Ok(Json(DataBody { data: stopped }))
}

async fn list_time_entries(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = acting_user(&headers)?;
    let page = state.list_time_entries.handle(&task_id, &user_id).await?;
    Ok(Json(DataBody { data: page }))
}

#[derive(Deserialize)]
struct AddTimeEntryBody {
    start_time: i64,
    end_time: i64,
    description: Option<String>,
}

async fn add_time_entry(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<AddTimeEntryBody>, JsonRejection>,
) -> Response {
    let user_id = match acting_user(&headers) {
        Ok(user_id) => user_id,
        Err(err) => return err.into_response(),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = AddTimeEntry {
        task_id,
        user_id,
        start_time: body.start_time,
        end_time: body.end_time,
        description: body.description,
    };
    match state.add_time_entry.handle(command).await {
        Ok(entry) => Json(DataBody { data: entry }).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}

async fn delete_time_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = acting_user(&headers)?;
    let deleted = state.delete_time_entry.handle(&entry_id, &user_id).await?;
    Ok(Json(DataBody { data: deleted }))
}

async fn active_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = acting_user(&headers)?;
    let session = state.active_session.handle(&user_id).await?;
    Ok(Json(DataBody { data: session }))
}
