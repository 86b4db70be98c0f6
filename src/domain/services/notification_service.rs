use crate::domain::models::{auth::Principal, notification::Notification};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::notification_repo;

/// Notifications are only ever read or changed by their receiver.
pub struct NotificationService {
    pool: DbPool,
}

impl NotificationService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, actor: &Principal, user_id: i64) -> Result<Vec<Notification>, AppError> {
        ensure_receiver(actor, user_id)?;
        notification_repo::list_for_receiver(&self.pool, user_id).await
    }

    pub async fn get(&self, actor: &Principal, user_id: i64, notification_id: i64) -> Result<Notification, AppError> {
        ensure_receiver(actor, user_id)?;
        notification_repo::find(&self.pool, user_id, notification_id).await?
            .ok_or_else(|| AppError::NotFound(format!("notification {}", notification_id)))
    }

    pub async fn mark_seen(&self, actor: &Principal, user_id: i64, notification_id: i64) -> Result<u64, AppError> {
        ensure_receiver(actor, user_id)?;
        let rows = notification_repo::mark_seen(&self.pool, user_id, notification_id).await?;
        AppError::ensure_affected(rows, "notification")
    }

    pub async fn delete(&self, actor: &Principal, user_id: i64, notification_id: i64) -> Result<u64, AppError> {
        ensure_receiver(actor, user_id)?;
        let rows = notification_repo::delete(&self.pool, user_id, notification_id).await?;
        AppError::ensure_affected(rows, "notification")
    }
}

fn ensure_receiver(actor: &Principal, user_id: i64) -> Result<(), AppError> {
    validators::ensure(validators::is_receiver(actor, user_id), "notifications belong to another user")
}
