use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::Span;

use crate::domain::models::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid `Authorization: Bearer <jwt>` header.
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".into()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("malformed authorization header".into()))?;

        let token = header.strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".into()))?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let principal = app_state.auth_service.authenticate(token).await?;

        Span::current().record("user_id", principal.user_id);

        Ok(AuthUser(principal))
    }
}
