use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::{requests::TeamRequest, responses::AffectedRows};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    AppJson(payload): AppJson<TeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.team_service.create(&actor, &payload.name, &payload.domain).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.team_service.list().await?))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.team_service.get(team_id).await?))
}

pub async fn update_team(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(team_id): Path<i64>,
    AppJson(payload): AppJson<TeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.team_service.update(&actor, team_id, &payload.name, &payload.domain).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.team_service.delete(&actor, team_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}
