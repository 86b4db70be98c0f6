use chrono::{DateTime, Utc};
use sqlx::Executor;

use crate::domain::models::join_request::{JoinRequest, JoinRequestStatus, NewJoinRequest};
use crate::error::AppError;
use crate::infra::db::Db;

pub async fn create<'e, E>(executor: E, request: &NewJoinRequest) -> Result<JoinRequest, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, JoinRequest>(
        "INSERT INTO join_requests (team_id, team_owner_id, sender_id, role, status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
        .bind(request.team_id)
        .bind(request.team_owner_id)
        .bind(request.sender_id)
        .bind(request.role)
        .bind(JoinRequestStatus::Pending)
        .bind(request.created_at)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list_by_team<'e, E>(executor: E, team_id: i64) -> Result<Vec<JoinRequest>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, JoinRequest>("SELECT * FROM join_requests WHERE team_id = $1 ORDER BY id ASC")
        .bind(team_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list_by_team_and_sender<'e, E>(executor: E, team_id: i64, sender_id: i64) -> Result<Vec<JoinRequest>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, JoinRequest>(
        "SELECT * FROM join_requests WHERE team_id = $1 AND sender_id = $2 ORDER BY id ASC",
    )
        .bind(team_id)
        .bind(sender_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find<'e, E>(executor: E, team_id: i64, id: i64) -> Result<Option<JoinRequest>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, JoinRequest>("SELECT * FROM join_requests WHERE id = $1 AND team_id = $2")
        .bind(id)
        .bind(team_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

/// Counts the sender's pending requests for the team, including one inserted
/// earlier in the same transaction.
pub async fn count_pending<'e, E>(executor: E, team_id: i64, sender_id: i64) -> Result<i64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM join_requests WHERE team_id = $1 AND sender_id = $2 AND status = $3",
    )
        .bind(team_id)
        .bind(sender_id)
        .bind(JoinRequestStatus::Pending)
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// Records a decision. Guarded on PENDING, so a request that was already
/// decided leaves zero rows affected.
pub async fn decide<'e, E>(
    executor: E,
    team_id: i64,
    id: i64,
    status: JoinRequestStatus,
    decided_by: i64,
    now: DateTime<Utc>,
) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query(
        "UPDATE join_requests SET status = $1, decision_at = $2, decision_by = $3 \
         WHERE id = $4 AND team_id = $5 AND status = $6",
    )
        .bind(status)
        .bind(now)
        .bind(decided_by)
        .bind(id)
        .bind(team_id)
        .bind(JoinRequestStatus::Pending)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete<'e, E>(executor: E, team_id: i64, id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM join_requests WHERE id = $1 AND team_id = $2")
        .bind(id)
        .bind(team_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
