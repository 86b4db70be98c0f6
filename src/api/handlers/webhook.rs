use axum::{body::Bytes, extract::State, http::{HeaderMap, StatusCode}, response::IntoResponse};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::error::AppError;
use crate::infra::billing::webhook::SIGNATURE_HEADER;
use crate::state::AppState;

pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let outcome = state.webhook_service.handle(signature, &body, Utc::now().timestamp()).await?;
    debug!(?outcome, "Webhook processed");

    Ok(StatusCode::OK)
}
