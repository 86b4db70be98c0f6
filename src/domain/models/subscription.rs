use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum SubscriptionStatus {
    #[default]
    Unknown = 0,
    Active = 1,
    Inactive = 2,
    Canceled = 3,
    PastDue = 4,
    Unpaid = 5,
    Trialing = 6,
    Incomplete = 7,
    IncompleteExpired = 8,
    Open = 9,
}

impl SubscriptionStatus {
    /// Maps a payment-provider status string onto the local enum.
    pub fn from_provider(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "past_due" => Self::PastDue,
            "unpaid" => Self::Unpaid,
            "canceled" => Self::Canceled,
            "incomplete" => Self::Incomplete,
            "incomplete_expired" => Self::IncompleteExpired,
            "trialing" => Self::Trialing,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub subscription_id: String,
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub current_period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Provider-side state of a subscription, keyed by its external id.
#[derive(Debug, Clone)]
pub struct SubscriptionState {
    pub user_id: i64,
    pub subscription_id: String,
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub current_period_end: DateTime<Utc>,
}

/// Client-writable subscription columns.
#[derive(Debug, Clone)]
pub struct SubscriptionFields {
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub current_period_end: DateTime<Utc>,
}

impl SubscriptionFields {
    pub fn into_state(self, user_id: i64, subscription_id: &str) -> Result<SubscriptionState, AppError> {
        let subscription_id = subscription_id.trim();
        if subscription_id.is_empty() {
            return Err(AppError::Validation("subscription_id is required".into()));
        }
        Ok(SubscriptionState {
            user_id,
            subscription_id: subscription_id.to_string(),
            price_id: self.price_id.trim().to_string(),
            status: self.status,
            current_period_end: self.current_period_end,
        })
    }
}
