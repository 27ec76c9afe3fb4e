//! Handlers for bug records.
//!
//! Writes always pass the validation chain before the store is touched, so
//! a rejected request never leaves partial state behind.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use bugtrack_core::error::CoreError;
use bugtrack_core::types::DbId;
use bugtrack_db::models::bug::BugInput;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

const BUG_ENTITY: &str = "Bug";

fn bug_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: BUG_ENTITY,
        id,
    })
}

/// Parse a path segment into a bug id. Only positive integers can ever be
/// assigned by the store.
fn parse_bug_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Invalid bug id".into()))
}

// ---------------------------------------------------------------------------
// GET /bugs
// ---------------------------------------------------------------------------

/// List every bug, newest first. Query parameters are ignored.
pub async fn list_bugs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bugs = state.store.list().await?;
    Ok(Json(ListResponse::new(bugs)))
}

// ---------------------------------------------------------------------------
// GET /bugs/:id
// ---------------------------------------------------------------------------

pub async fn get_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_bug_id(&id)?;

    let bug = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| bug_not_found(id))?;

    Ok(Json(DataResponse::new(bug)))
}

// ---------------------------------------------------------------------------
// POST /bugs
// ---------------------------------------------------------------------------

/// Validate and persist a new bug.
pub async fn create_bug(
    State(state): State<AppState>,
    payload: Result<Json<BugInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let fields = input.validate()?;

    let bug = state.store.create(&fields).await?;

    tracing::info!(
        bug_id = bug.id,
        priority = %bug.priority,
        backend = state.store.backend(),
        "Bug reported",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(bug, "Bug reported successfully")),
    ))
}

// ---------------------------------------------------------------------------
// PUT /bugs/:id
// ---------------------------------------------------------------------------

/// Replace a bug's fields.
///
/// The id is resolved before the body is looked at, so an unknown id is a
/// 404 whatever the payload. The body then goes through the same chain as
/// create: every checked field must be present and valid.
pub async fn update_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BugInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = parse_bug_id(&id)?;

    let current = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| bug_not_found(id))?;

    let Json(input) = payload?;
    let fields = input.validate()?;

    // The record may have been deleted since the lookup above.
    let updated = state
        .store
        .update(id, &fields)
        .await?
        .ok_or_else(|| bug_not_found(id))?;

    tracing::info!(
        bug_id = id,
        from = %current.status,
        to = %updated.status,
        "Bug updated",
    );

    Ok(Json(DataResponse::with_message(
        updated,
        "Bug updated successfully",
    )))
}

// ---------------------------------------------------------------------------
// DELETE /bugs/:id
// ---------------------------------------------------------------------------

pub async fn delete_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_bug_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(bug_not_found(id));
    }

    tracing::info!(bug_id = id, "Bug deleted");

    Ok(Json(MessageResponse::new("Bug deleted successfully")))
}
