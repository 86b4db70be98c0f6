use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum TeamRole {
    Owner = 0,
    Admin = 1,
    Manager = 2,
    SalesRep = 3,
    Sdr = 4,
    Support = 5,
    DataAnalyst = 6,
    Marketing = 7,
    Member = 8,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TeamMember {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
}

/// Membership row joined with the user and team it links.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TeamMemberDetail {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub role: TeamRole,
    pub user_name: String,
    pub team_name: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewTeamMember {
    pub team_id: i64,
    pub user_id: i64,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
}

impl NewTeamMember {
    pub fn new(team_id: i64, user_id: i64, role: TeamRole) -> Self {
        Self { team_id, user_id, role, created_at: Utc::now() }
    }
}
