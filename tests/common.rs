#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use teams_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{CheckoutSessionParams, PaymentGateway},
    error::AppError,
    infra::billing::webhook::{sign, SIGNATURE_HEADER},
    infra::db::{self, DbPool},
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const WEBHOOK_SECRET: &str = "whsec_integration";

#[derive(Default)]
pub struct MockPaymentGateway {
    pub sessions: Mutex<Vec<CheckoutSessionParams>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<String, AppError> {
        if self.fail {
            return Err(AppError::BadGateway("provider down".into()));
        }
        self.sessions.lock().unwrap().push(params.clone());
        Ok(format!("https://checkout.test/session/{}", params.client_reference_id))
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub gateway: Arc<MockPaymentGateway>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_gateway(MockPaymentGateway::default()).await
    }

    pub async fn with_gateway(gateway: MockPaymentGateway) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let config = Config {
            database_url: format!("sqlite://{}?mode=rwc", db_filename),
            port: 0,
            jwt_secret: "integration-secret".to_string(),
            token_ttl_hours: 1,
            db_max_connections: 5,
            db_min_connections: 1,
            db_idle_timeout_secs: 60,
            stripe_secret_key: String::new(),
            stripe_webhook_secret: WEBHOOK_SECRET.to_string(),
            stripe_api_base: "http://localhost".to_string(),
            cors_allowed_origin: "http://localhost:4200".to_string(),
            request_timeout_secs: 10,
        };

        let pool = db::connect(&config).await.expect("Failed to connect to test db");
        db::run_migrations(&pool).await.expect("Failed to migrate test db");

        let gateway = Arc::new(gateway);
        let state = Arc::new(AppState::new(config, pool.clone(), gateway.clone()));
        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, gateway }
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, value)
    }

    pub async fn post_webhook(&self, payload: &Value, signature: Option<String>) -> StatusCode {
        let body = payload.to_string();
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }

        let response = self.router.clone().oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap();
        response.status()
    }

    pub async fn signed_webhook(&self, payload: &Value) -> StatusCode {
        let signature = sign(payload.to_string().as_bytes(), WEBHOOK_SECRET, Utc::now().timestamp());
        self.post_webhook(payload, Some(signature)).await
    }

    /// Registers a consenting user and logs them in.
    pub async fn signup(&self, auth_subject: &str, name: &str) -> (i64, String) {
        let (status, user) = self.request("POST", "/users", None, Some(json!({
            "auth_subject": auth_subject,
            "name": name,
            "tax_id": "000",
            "auth_provider": "GOOGLE",
            "consent_terms": true
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", user);

        let (status, body) = self.request("POST", "/login", None, Some(json!({ "auth_subject": auth_subject }))).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        (user["id"].as_i64().unwrap(), body["token"].as_str().unwrap().to_string())
    }

    pub async fn create_team(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self.request("POST", "/teams", Some(token), Some(json!({
            "name": name,
            "domain": format!("{}.com", name.to_lowercase())
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "team creation failed: {}", body);
        body["team"]["id"].as_i64().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.db_filename, suffix));
        }
    }
}
