use sqlx::Executor;

use crate::domain::models::team_member::{NewTeamMember, TeamMember, TeamMemberDetail};
use crate::error::AppError;
use crate::infra::db::Db;

const DETAIL_SELECT: &str = "SELECT tm.id, tm.team_id, tm.user_id, tm.role, u.name AS user_name, t.name AS team_name, tm.created_at \
     FROM team_members tm \
     JOIN users u ON u.id = tm.user_id \
     JOIN teams t ON t.id = tm.team_id";

pub async fn create<'e, E>(executor: E, member: &NewTeamMember) -> Result<TeamMember, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, TeamMember>(
        "INSERT INTO team_members (team_id, user_id, role, created_at) VALUES ($1, $2, $3, $4) RETURNING *",
    )
        .bind(member.team_id)
        .bind(member.user_id)
        .bind(member.role)
        .bind(member.created_at)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn exists<'e, E>(executor: E, team_id: i64, user_id: i64) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM team_members WHERE team_id = $1 AND user_id = $2")
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

    Ok(id.is_some())
}

pub async fn list_by_team<'e, E>(executor: E, team_id: i64) -> Result<Vec<TeamMemberDetail>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let sql = format!("{} WHERE tm.team_id = $1 ORDER BY tm.id ASC", DETAIL_SELECT);
    sqlx::query_as::<_, TeamMemberDetail>(&sql)
        .bind(team_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list_by_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<TeamMemberDetail>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let sql = format!("{} WHERE tm.user_id = $1 ORDER BY tm.id ASC", DETAIL_SELECT);
    sqlx::query_as::<_, TeamMemberDetail>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn delete<'e, E>(executor: E, team_id: i64, user_id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
        .bind(team_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
