use tracing::info;

use crate::domain::models::{auth::Principal, team_member::TeamMemberDetail};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::{team_member_repo, team_repo};

pub struct TeamMemberService {
    pool: DbPool,
}

impl TeamMemberService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Members of a team, visible to its members only.
    pub async fn list(&self, actor: &Principal, team_id: i64) -> Result<Vec<TeamMemberDetail>, AppError> {
        if team_repo::find_by_id(&self.pool, team_id).await?.is_none() {
            return Err(AppError::NotFound(format!("team {}", team_id)));
        }
        let is_member = team_member_repo::exists(&self.pool, team_id, actor.user_id).await?;
        validators::ensure(is_member, "only team members can list the team's members")?;

        team_member_repo::list_by_team(&self.pool, team_id).await
    }

    pub async fn remove(&self, actor: &Principal, team_id: i64, user_id: i64) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let team = team_repo::find_by_id(&mut *tx, team_id).await?
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))?;
        validators::ensure(validators::is_team_owner(actor, &team), "only the team owner can remove members")?;
        if user_id == team.owner_id {
            return Err(AppError::Conflict("the team owner cannot be removed".into()));
        }

        let rows = team_member_repo::delete(&mut *tx, team_id, user_id).await?;
        AppError::ensure_affected(rows, "team member")?;
        tx.commit().await?;

        info!(team_id, user_id, "Team member removed");
        Ok(rows)
    }
}
