use chrono::{DateTime, Utc};
use sqlx::Executor;
use tracing::error;

use crate::domain::models::team::{Team, TeamFields};
use crate::error::AppError;
use crate::infra::db::Db;

pub async fn create<'e, E>(executor: E, owner_id: i64, fields: &TeamFields, now: DateTime<Utc>) -> Result<Team, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Team>(
        "INSERT INTO teams (name, domain, owner_id, created_at) VALUES ($1, $2, $3, $4) RETURNING *",
    )
        .bind(&fields.name)
        .bind(&fields.domain)
        .bind(owner_id)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list<'e, E>(executor: E) -> Result<Vec<Team>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY id ASC")
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Team>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

/// Only name and domain are writable; the owner is fixed at creation.
pub async fn update<'e, E>(executor: E, id: i64, fields: &TeamFields, now: DateTime<Utc>) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("UPDATE teams SET name = $1, domain = $2, updated_at = $3 WHERE id = $4")
        .bind(&fields.name)
        .bind(&fields.domain)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            error!("Team deletion failed: {:?}", e);
            AppError::Database(e)
        })?;

    Ok(result.rows_affected())
}
