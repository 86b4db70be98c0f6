use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Name and domain of a team, trimmed and checked for presence.
#[derive(Debug, Clone)]
pub struct TeamFields {
    pub name: String,
    pub domain: String,
}

impl TeamFields {
    pub fn new(name: &str, domain: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let domain = domain.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        if domain.is_empty() {
            return Err(AppError::Validation("domain is required".into()));
        }
        Ok(Self { name: name.to_string(), domain: domain.to_string() })
    }
}
