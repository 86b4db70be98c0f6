use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::{requests::{CreateUserRequest, UpdateUserRequest}, responses::AffectedRows};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.user_service.list().await?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.user_service.get(user_id).await?))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.user_service.update(&actor, user_id, payload.into()).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.user_service.delete(&actor, user_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn list_user_teams(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.user_service.teams(user_id).await?))
}
