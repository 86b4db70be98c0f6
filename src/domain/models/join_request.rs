use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::team_member::TeamRole;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum JoinRequestStatus {
    Pending = 0,
    Accepted = 1,
    Rejected = 2,
}

/// Outcome of a decision on a pending join request. Both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn status(self) -> JoinRequestStatus {
        match self {
            Decision::Accept => JoinRequestStatus::Accepted,
            Decision::Reject => JoinRequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct JoinRequest {
    pub id: i64,
    pub team_id: i64,
    pub team_owner_id: i64,
    pub sender_id: i64,
    pub role: TeamRole,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub decision_at: Option<DateTime<Utc>>,
    pub decision_by: Option<i64>,
}

impl JoinRequest {
    pub fn is_pending(&self) -> bool {
        self.status == JoinRequestStatus::Pending
    }
}

pub struct NewJoinRequest {
    pub team_id: i64,
    pub team_owner_id: i64,
    pub sender_id: i64,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
}
