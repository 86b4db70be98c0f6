use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::models::{
    auth::Principal,
    join_request::{Decision, JoinRequest, NewJoinRequest},
    notification::{NewNotification, Notification, NotificationType},
    team::Team,
    team_member::{NewTeamMember, TeamMember, TeamRole},
};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::{join_request_repo, notification_repo, team_member_repo, team_repo};

#[derive(Debug, Serialize)]
pub struct CreatedJoinRequest {
    pub join_request: JoinRequest,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct DecisionOutcome {
    pub affected_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_member: Option<TeamMember>,
}

/// Mutating workflows open their transaction with a write. On SQLite a
/// transaction that reads first cannot wait for the write lock and fails
/// with SQLITE_BUSY; one that writes first waits on the busy timeout instead.
pub struct JoinRequestService {
    pool: DbPool,
}

impl JoinRequestService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Files a request to join a team and notifies the team owner, atomically.
    pub async fn create(&self, actor: &Principal, team_id: i64, role: Option<TeamRole>) -> Result<CreatedJoinRequest, AppError> {
        let role = role.unwrap_or(TeamRole::Member);
        if role == TeamRole::Owner {
            return Err(AppError::Validation("OWNER cannot be requested".into()));
        }

        let team = self.load_team(team_id).await?;
        let new_request = NewJoinRequest {
            team_id,
            team_owner_id: team.owner_id,
            sender_id: actor.user_id,
            role,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;
        let join_request = join_request_repo::create(&mut *tx, &new_request).await?;

        // Checked after the insert; returning early rolls it back.
        if team_member_repo::exists(&mut *tx, team_id, actor.user_id).await? {
            return Err(AppError::Conflict("already a member of this team".into()));
        }
        if join_request_repo::count_pending(&mut *tx, team_id, actor.user_id).await? > 1 {
            return Err(AppError::Conflict("a pending join request already exists".into()));
        }

        let notification = notification_repo::create(&mut *tx, &NewNotification::for_join_request(&join_request)).await?;
        tx.commit().await?;

        info!(team_id, request_id = join_request.id, sender_id = actor.user_id, "Join request created");
        Ok(CreatedJoinRequest { join_request, notification })
    }

    /// The owner sees every request of the team, anyone else only their own.
    pub async fn list(&self, actor: &Principal, team_id: i64) -> Result<Vec<JoinRequest>, AppError> {
        let team = self.load_team(team_id).await?;

        if validators::is_team_owner(actor, &team) {
            join_request_repo::list_by_team(&self.pool, team_id).await
        } else {
            join_request_repo::list_by_team_and_sender(&self.pool, team_id, actor.user_id).await
        }
    }

    pub async fn get(&self, actor: &Principal, team_id: i64, request_id: i64) -> Result<JoinRequest, AppError> {
        let team = self.load_team(team_id).await?;
        let request = self.load_request(team_id, request_id).await?;

        validators::ensure(validators::can_see_join_request(actor, &team, &request), "not allowed to see this join request")?;
        Ok(request)
    }

    /// Removes the request together with the notification that announced it.
    pub async fn delete(&self, actor: &Principal, team_id: i64, request_id: i64) -> Result<u64, AppError> {
        let team = self.load_team(team_id).await?;
        let request = self.load_request(team_id, request_id).await?;
        validators::ensure(validators::can_see_join_request(actor, &team, &request), "not allowed to delete this join request")?;

        let mut tx = self.pool.begin().await?;
        let rows = AppError::ensure_affected(join_request_repo::delete(&mut *tx, team_id, request_id).await?, "join request")?;
        notification_repo::delete_by_reference(&mut *tx, NotificationType::JoinRequest, request_id).await?;
        tx.commit().await?;

        Ok(rows)
    }

    pub async fn accept(&self, actor: &Principal, team_id: i64, request_id: i64) -> Result<DecisionOutcome, AppError> {
        self.decide(actor, team_id, request_id, Decision::Accept).await
    }

    pub async fn reject(&self, actor: &Principal, team_id: i64, request_id: i64) -> Result<DecisionOutcome, AppError> {
        self.decide(actor, team_id, request_id, Decision::Reject).await
    }

    /// Records the owner's decision. On accept the sender is enrolled with the
    /// requested role in the same transaction.
    async fn decide(&self, actor: &Principal, team_id: i64, request_id: i64, decision: Decision) -> Result<DecisionOutcome, AppError> {
        let team = self.load_team(team_id).await?;
        validators::ensure(validators::is_team_owner(actor, &team), "only the team owner can decide join requests")?;

        let request = self.load_request(team_id, request_id).await?;
        if !request.is_pending() {
            return Err(AppError::Conflict("join request has already been decided".into()));
        }

        let mut tx = self.pool.begin().await?;
        let affected_rows = join_request_repo::decide(&mut *tx, team_id, request_id, decision.status(), actor.user_id, Utc::now()).await?;
        if affected_rows == 0 {
            warn!(team_id, request_id, "Join request decided concurrently");
            return Err(AppError::Conflict("join request has already been decided".into()));
        }

        let team_member = match decision {
            Decision::Accept => {
                if team_member_repo::exists(&mut *tx, team_id, request.sender_id).await? {
                    return Err(AppError::Conflict("sender is already a member of this team".into()));
                }
                let member = NewTeamMember::new(team_id, request.sender_id, request.role);
                Some(team_member_repo::create(&mut *tx, &member).await?)
            }
            Decision::Reject => None,
        };
        tx.commit().await?;

        info!(team_id, request_id, decision = ?decision, "Join request decided");
        Ok(DecisionOutcome { affected_rows, team_member })
    }

    async fn load_team(&self, team_id: i64) -> Result<Team, AppError> {
        team_repo::find_by_id(&self.pool, team_id).await?
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))
    }

    async fn load_request(&self, team_id: i64, request_id: i64) -> Result<JoinRequest, AppError> {
        join_request_repo::find(&self.pool, team_id, request_id).await?
            .ok_or_else(|| AppError::NotFound(format!("join request {}", request_id)))
    }
}
