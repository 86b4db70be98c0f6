use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::{requests::CheckoutRequest, responses::CheckoutSessionResponse};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    AppJson(payload): AppJson<CheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.checkout_service
        .create_session(&actor, &payload.price_id, &payload.success_url, &payload.cancel_url)
        .await?;
    Ok(Json(CheckoutSessionResponse { url }))
}
