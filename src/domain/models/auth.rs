use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub auth_subject: String,
    pub iat: usize,
    pub exp: usize,
}

/// The authenticated caller, threaded explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub auth_subject: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}
