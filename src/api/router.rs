use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, checkout, health, join_request, member, notification, subscription, team, user, webhook};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

const WEBHOOK_BODY_LIMIT: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config.cors_allowed_origin);

    Router::new()
        .route("/health", get(health::health_check))

        // Public
        .route("/login", post(auth::login))
        .route("/webhook", post(webhook::handle_webhook).layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT)))

        // Users
        .route("/users", post(user::create_user).get(user::list_users))
        .route("/users/{user_id}", get(user::get_user).patch(user::update_user).delete(user::delete_user))
        .route("/users/{user_id}/teams", get(user::list_user_teams))

        // Notifications
        .route("/users/{user_id}/notifications", get(notification::list_notifications))
        .route("/users/{user_id}/notifications/{notification_id}", get(notification::get_notification).delete(notification::delete_notification))
        .route("/users/{user_id}/notifications/{notification_id}/seen", patch(notification::mark_notification_seen))

        // Billing
        .route("/checkout-session", post(checkout::create_checkout_session))
        .route("/subscriptions", post(subscription::create_subscription).get(subscription::list_subscriptions))
        .route("/subscriptions/{subscription_id}", get(subscription::get_subscription).patch(subscription::update_subscription).delete(subscription::delete_subscription))

        // Teams
        .route("/teams", post(team::create_team).get(team::list_teams))
        .route("/teams/{team_id}", get(team::get_team).patch(team::update_team).delete(team::delete_team))
        .route("/teams/{team_id}/members", get(member::list_members))
        .route("/teams/{team_id}/members/{user_id}", delete(member::remove_member))

        // Join requests
        .route("/teams/{team_id}/join", post(join_request::create_join_request))
        .route("/teams/{team_id}/join-requests", get(join_request::list_join_requests))
        .route("/teams/{team_id}/join-requests/{request_id}", get(join_request::get_join_request).delete(join_request::delete_join_request))
        .route("/teams/{team_id}/join-requests/{request_id}/accept", patch(join_request::accept_join_request))
        .route("/teams/{team_id}/join-requests/{request_id}/reject", patch(join_request::reject_join_request))

        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Ignoring invalid CORS origin: {}", origin);
            layer
        }
    }
}
