use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::responses::AffectedRows;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.notification_service.list(&actor, user_id).await?))
}

pub async fn get_notification(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((user_id, notification_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.notification_service.get(&actor, user_id, notification_id).await?))
}

pub async fn mark_notification_seen(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((user_id, notification_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.notification_service.mark_seen(&actor, user_id, notification_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((user_id, notification_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.notification_service.delete(&actor, user_id, notification_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}
