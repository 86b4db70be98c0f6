use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::{requests::SubscriptionRequest, responses::AffectedRows};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    AppJson(payload): AppJson<SubscriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (subscription_id, fields) = payload.fields();
    let created = state.subscription_service.create(&actor, &subscription_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.subscription_service.list(&actor).await?))
}

pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(subscription_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.subscription_service.get(&actor, &subscription_id).await?))
}

/// The path id wins over any `subscription_id` in the body.
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(subscription_id): Path<String>,
    AppJson(payload): AppJson<SubscriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (_, fields) = payload.fields();
    let rows = state.subscription_service.update(&actor, &subscription_id, fields).await?;
    Ok(Json(AffectedRows::from(rows)))
}

pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(subscription_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.subscription_service.delete(&actor, &subscription_id).await?;
    Ok(Json(AffectedRows::from(rows)))
}
