use axum::{body::Bytes, extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::{requests::JoinTeamRequest, responses::AffectedRows};
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The body is optional; without one the request asks for the MEMBER role.
pub async fn create_join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(team_id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        JoinTeamRequest::default()
    } else {
        serde_json::from_slice::<JoinTeamRequest>(&body)
            .map_err(|e| AppError::Validation(format!("invalid join request body: {}", e)))?
    };

    let created = state.join_request_service.create(&actor, team_id, payload.role).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_join_requests(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.join_request_service.list(&actor, team_id).await?))
}

pub async fn get_join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((team_id, request_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.join_request_service.get(&actor, team_id, request_id).await?))
}

pub async fn delete_join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((team_id, request_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.join_request_service.delete(&actor, team_id, request_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn accept_join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((team_id, request_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.join_request_service.accept(&actor, team_id, request_id).await?))
}

pub async fn reject_join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((team_id, request_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.join_request_service.reject(&actor, team_id, request_id).await?;
    Ok(Json(AffectedRows::from(outcome.affected_rows)))
}
