use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum AuthProvider {
    Google = 0,
    Password = 1,
}

impl AuthProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GOOGLE" => Some(Self::Google),
            "PASSWORD" => Some(Self::Password),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub auth_subject: String,
    pub name: String,
    pub tax_id: String,
    pub billing_customer_id: Option<String>,
    pub auth_provider: AuthProvider,
    pub consent_terms: bool,
    pub data_consent: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Login is refused until the terms of use have been accepted.
    pub fn ensure_can_login(&self) -> Result<(), AppError> {
        if !self.consent_terms {
            return Err(AppError::Validation("consent_terms is required and cannot be refused".into()));
        }
        Ok(())
    }
}

pub struct NewUser {
    pub auth_subject: String,
    pub name: String,
    pub tax_id: String,
    pub auth_provider: AuthProvider,
    pub consent_terms: bool,
    pub data_consent: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUserParams {
    pub auth_subject: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub auth_provider: String,
    pub consent_terms: bool,
}

impl NewUser {
    pub fn new(params: NewUserParams) -> Result<Self, AppError> {
        let auth_subject = params.auth_subject.trim().to_string();
        let name = params.name.trim().to_string();
        let tax_id = params.tax_id.unwrap_or_default().trim().to_string();

        if auth_subject.is_empty() {
            return Err(AppError::Validation("auth_subject is required".into()));
        }
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        let auth_provider = AuthProvider::parse(&params.auth_provider)
            .ok_or_else(|| AppError::Validation("auth_provider must be GOOGLE or PASSWORD".into()))?;

        let now = Utc::now();
        Ok(Self {
            auth_subject,
            name,
            tax_id,
            auth_provider,
            consent_terms: params.consent_terms,
            data_consent: params.consent_terms.then_some(now),
            created_at: now,
        })
    }
}

pub struct UserChanges {
    pub name: Option<String>,
    pub tax_id: Option<String>,
}

impl UserChanges {
    pub fn normalized(self) -> Result<Self, AppError> {
        let name = self.name.map(|n| n.trim().to_string());
        if matches!(name.as_deref(), Some("")) {
            return Err(AppError::Validation("name cannot be empty".into()));
        }
        Ok(Self {
            name,
            tax_id: self.tax_id.map(|t| t.trim().to_string()),
        })
    }
}
