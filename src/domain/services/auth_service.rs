use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::models::{auth::{Claims, Principal}, user::User};
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::user_repo;

pub struct AuthService {
    pool: DbPool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        Self {
            pool,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Exchanges an external auth subject for a bearer token.
    pub async fn login(&self, auth_subject: &str) -> Result<String, AppError> {
        let user = user_repo::find_by_auth_subject(&self.pool, auth_subject.trim()).await?
            .ok_or_else(|| AppError::Unauthorized("unknown auth subject".into()))?;

        user.ensure_can_login()?;

        let token = self.issue_token(&user)?;
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            auth_subject: user.auth_subject.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))?;

        let user_id = data.claims.sub.parse::<i64>()
            .map_err(|_| AppError::Unauthorized("invalid token subject".into()))?;

        Ok(Principal { user_id, auth_subject: data.claims.auth_subject })
    }

    /// Verifies the token and checks its user still exists; tokens outlive
    /// account deletion until they expire.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let principal = self.verify(token)?;

        if user_repo::find_by_id(&self.pool, principal.user_id).await?.is_none() {
            warn!(user_id = principal.user_id, "Token presented for a deleted user");
            return Err(AppError::Unauthorized("user no longer exists".into()));
        }

        Ok(principal)
    }
}

#[cfg(all(test, not(feature = "postgres")))]
mod tests {
    use super::*;
    use crate::domain::models::user::AuthProvider;

    fn service(secret: &str) -> AuthService {
        let pool = DbPool::connect_lazy("sqlite::memory:").unwrap();
        let config = Config {
            database_url: "sqlite::memory:".into(),
            port: 0,
            jwt_secret: secret.into(),
            token_ttl_hours: 1,
            db_max_connections: 1,
            db_min_connections: 0,
            db_idle_timeout_secs: 1,
            stripe_secret_key: String::new(),
            stripe_webhook_secret: String::new(),
            stripe_api_base: String::new(),
            cors_allowed_origin: String::new(),
            request_timeout_secs: 1,
        };
        AuthService::new(pool, &config)
    }

    fn user() -> User {
        User {
            id: 7,
            auth_subject: "google-7".into(),
            name: "Seven".into(),
            tax_id: String::new(),
            billing_customer_id: None,
            auth_provider: AuthProvider::Google,
            consent_terms: true,
            data_consent: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_issued_token_round_trips_to_principal() {
        let auth = service("secret");
        let token = auth.issue_token(&user()).unwrap();
        let principal = auth.verify(&token).unwrap();
        assert_eq!(principal, Principal { user_id: 7, auth_subject: "google-7".into() });
    }

    #[tokio::test]
    async fn test_foreign_signature_is_unauthorized() {
        let token = service("one").issue_token(&user()).unwrap();
        assert!(matches!(service("two").verify(&token), Err(AppError::Unauthorized(_))));
    }
}
