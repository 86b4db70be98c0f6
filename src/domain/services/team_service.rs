use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domain::models::{
    auth::Principal,
    team::{Team, TeamFields},
    team_member::{NewTeamMember, TeamMember, TeamRole},
};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::{team_member_repo, team_repo};

#[derive(Debug, Serialize)]
pub struct CreatedTeam {
    pub team: Team,
    pub team_member: TeamMember,
}

pub struct TeamService {
    pool: DbPool,
}

impl TeamService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creates the team and enrolls the creator as its OWNER.
    pub async fn create(&self, actor: &Principal, name: &str, domain: &str) -> Result<CreatedTeam, AppError> {
        let fields = TeamFields::new(name, domain)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let team = team_repo::create(&mut *tx, actor.user_id, &fields, now).await?;
        let owner = NewTeamMember { team_id: team.id, user_id: actor.user_id, role: TeamRole::Owner, created_at: now };
        let team_member = team_member_repo::create(&mut *tx, &owner).await?;
        tx.commit().await?;

        info!(team_id = team.id, owner_id = actor.user_id, "Team created");
        Ok(CreatedTeam { team, team_member })
    }

    pub async fn list(&self) -> Result<Vec<Team>, AppError> {
        team_repo::list(&self.pool).await
    }

    pub async fn get(&self, team_id: i64) -> Result<Team, AppError> {
        team_repo::find_by_id(&self.pool, team_id).await?
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))
    }

    pub async fn update(&self, actor: &Principal, team_id: i64, name: &str, domain: &str) -> Result<u64, AppError> {
        let fields = TeamFields::new(name, domain)?;

        let mut tx = self.pool.begin().await?;
        let team = team_repo::find_by_id(&mut *tx, team_id).await?
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))?;
        validators::ensure(validators::is_team_owner(actor, &team), "only the team owner can update the team")?;

        let rows = team_repo::update(&mut *tx, team_id, &fields, Utc::now()).await?;
        tx.commit().await?;

        Ok(rows)
    }

    pub async fn delete(&self, actor: &Principal, team_id: i64) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let team = team_repo::find_by_id(&mut *tx, team_id).await?
            .ok_or_else(|| AppError::NotFound(format!("team {}", team_id)))?;
        validators::ensure(validators::is_team_owner(actor, &team), "only the team owner can delete the team")?;

        let rows = team_repo::delete(&mut *tx, team_id).await?;
        tx.commit().await?;

        info!(team_id, "Team deleted");
        Ok(rows)
    }
}
