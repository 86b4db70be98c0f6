use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::responses::AffectedRows;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.team_member_service.list(&actor, team_id).await?))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((team_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.team_member_service.remove(&actor, team_id, user_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}
