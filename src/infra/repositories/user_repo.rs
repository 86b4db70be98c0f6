use chrono::{DateTime, Utc};
use sqlx::Executor;
use tracing::error;

use crate::domain::models::user::{NewUser, User, UserChanges};
use crate::error::AppError;
use crate::infra::db::Db;

pub async fn create<'e, E>(executor: E, user: &NewUser) -> Result<User, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, User>(
        "INSERT INTO users (auth_subject, name, tax_id, auth_provider, consent_terms, data_consent, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
        .bind(&user.auth_subject)
        .bind(&user.name)
        .bind(&user.tax_id)
        .bind(user.auth_provider)
        .bind(user.consent_terms)
        .bind(user.data_consent)
        .bind(user.created_at)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list<'e, E>(executor: E) -> Result<Vec<User>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC")
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find_by_auth_subject<'e, E>(executor: E, auth_subject: &str) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE auth_subject = $1")
        .bind(auth_subject)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find_by_billing_customer<'e, E>(executor: E, customer_id: &str) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE billing_customer_id = $1")
        .bind(customer_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

/// Absent fields keep their stored value.
pub async fn update<'e, E>(executor: E, id: i64, changes: &UserChanges, now: DateTime<Utc>) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query(
        "UPDATE users SET name = COALESCE($1, name), tax_id = COALESCE($2, tax_id), updated_at = $3 WHERE id = $4",
    )
        .bind(changes.name.as_deref())
        .bind(changes.tax_id.as_deref())
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_billing_customer<'e, E>(executor: E, id: i64, customer_id: &str, now: DateTime<Utc>) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("UPDATE users SET billing_customer_id = $1, updated_at = $2 WHERE id = $3")
        .bind(customer_id)
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
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            error!("User deletion failed: {:?}", e);
            AppError::Database(e)
        })?;

    Ok(result.rows_affected())
}
