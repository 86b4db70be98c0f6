use chrono::{DateTime, Utc};
use sqlx::Executor;

use crate::domain::models::subscription::{Subscription, SubscriptionState};
use crate::error::AppError;
use crate::infra::db::Db;

pub async fn create<'e, E>(executor: E, state: &SubscriptionState, now: DateTime<Utc>) -> Result<Subscription, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Subscription>(
        "INSERT INTO subscriptions (user_id, subscription_id, price_id, status, current_period_end, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
        .bind(state.user_id)
        .bind(&state.subscription_id)
        .bind(&state.price_id)
        .bind(state.status)
        .bind(state.current_period_end)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list_by_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<Subscription>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE user_id = $1 ORDER BY id ASC")
        .bind(user_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find_by_external_id<'e, E>(executor: E, subscription_id: &str) -> Result<Option<Subscription>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE subscription_id = $1")
        .bind(subscription_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

/// Overwrites the provider-controlled columns. The owning user is left as is.
pub async fn update_by_external_id<'e, E>(executor: E, state: &SubscriptionState, now: DateTime<Utc>) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query(
        "UPDATE subscriptions SET price_id = $1, status = $2, current_period_end = $3, updated_at = $4 \
         WHERE subscription_id = $5",
    )
        .bind(&state.price_id)
        .bind(state.status)
        .bind(state.current_period_end)
        .bind(now)
        .bind(&state.subscription_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_by_external_id<'e, E>(executor: E, subscription_id: &str) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM subscriptions WHERE subscription_id = $1")
        .bind(subscription_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
