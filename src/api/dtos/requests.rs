use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{
    subscription::{SubscriptionFields, SubscriptionStatus},
    team_member::TeamRole,
    user::{NewUserParams, UserChanges},
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub auth_subject: String,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub auth_subject: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub auth_provider: String,
    #[serde(default)]
    pub consent_terms: bool,
}

impl From<CreateUserRequest> for NewUserParams {
    fn from(req: CreateUserRequest) -> Self {
        NewUserParams {
            auth_subject: req.auth_subject,
            name: req.name,
            tax_id: req.tax_id,
            auth_provider: req.auth_provider,
            consent_terms: req.consent_terms,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub tax_id: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges { name: req.name, tax_id: req.tax_id }
    }
}

/// Body of both team creation and team update.
#[derive(Deserialize)]
pub struct TeamRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
}

#[derive(Deserialize, Default)]
pub struct JoinTeamRequest {
    pub role: Option<TeamRole>,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: String,
    #[serde(default)]
    pub success_url: String,
    #[serde(default)]
    pub cancel_url: String,
}

#[derive(Deserialize)]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub price_id: String,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default = "Utc::now")]
    pub current_period_end: DateTime<Utc>,
}

impl SubscriptionRequest {
    pub fn fields(self) -> (String, SubscriptionFields) {
        let fields = SubscriptionFields {
            price_id: self.price_id,
            status: self.status,
            current_period_end: self.current_period_end,
        };
        (self.subscription_id, fields)
    }
}
