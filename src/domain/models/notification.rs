use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::join_request::JoinRequest;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum NotificationType {
    JoinRequest = 0,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Notification {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub notification_type: NotificationType,
    pub reference_id: i64,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewNotification {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub notification_type: NotificationType,
    pub reference_id: i64,
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// The team owner is told about a request addressed to their team.
    pub fn for_join_request(request: &JoinRequest) -> Self {
        Self {
            sender_id: request.sender_id,
            receiver_id: request.team_owner_id,
            notification_type: NotificationType::JoinRequest,
            reference_id: request.id,
            created_at: Utc::now(),
        }
    }
}
