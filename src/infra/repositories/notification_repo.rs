use sqlx::Executor;

use crate::domain::models::notification::{NewNotification, Notification, NotificationType};
use crate::error::AppError;
use crate::infra::db::Db;

pub async fn create<'e, E>(executor: E, notification: &NewNotification) -> Result<Notification, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (sender_id, receiver_id, notification_type, reference_id, seen, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
        .bind(notification.sender_id)
        .bind(notification.receiver_id)
        .bind(notification.notification_type)
        .bind(notification.reference_id)
        .bind(false)
        .bind(notification.created_at)
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn list_for_receiver<'e, E>(executor: E, receiver_id: i64) -> Result<Vec<Notification>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE receiver_id = $1 ORDER BY created_at DESC, id DESC",
    )
        .bind(receiver_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn find<'e, E>(executor: E, receiver_id: i64, id: i64) -> Result<Option<Notification>, AppError>
where
    E: Executor<'e, Database = Db>,
{
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1 AND receiver_id = $2")
        .bind(id)
        .bind(receiver_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

pub async fn mark_seen<'e, E>(executor: E, receiver_id: i64, id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("UPDATE notifications SET seen = $1 WHERE id = $2 AND receiver_id = $3")
        .bind(true)
        .bind(id)
        .bind(receiver_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete<'e, E>(executor: E, receiver_id: i64, id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND receiver_id = $2")
        .bind(id)
        .bind(receiver_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Drops every notification pointing at a deleted row, whoever received it.
pub async fn delete_by_reference<'e, E>(executor: E, notification_type: NotificationType, reference_id: i64) -> Result<u64, AppError>
where
    E: Executor<'e, Database = Db>,
{
    let result = sqlx::query("DELETE FROM notifications WHERE notification_type = $1 AND reference_id = $2")
        .bind(notification_type)
        .bind(reference_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
