use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::json::AppJson;
use crate::domain::models::auth::TokenResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.auth_service.login(&payload.auth_subject).await?;
    Ok(Json(TokenResponse { token }))
}
