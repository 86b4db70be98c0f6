use chrono::Utc;
use tracing::info;

use crate::domain::models::{
    auth::Principal,
    subscription::{Subscription, SubscriptionFields, SubscriptionState},
};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::subscription_repo;

pub struct SubscriptionService {
    pool: DbPool,
}

impl SubscriptionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor: &Principal, subscription_id: &str, fields: SubscriptionFields) -> Result<Subscription, AppError> {
        let state = fields.into_state(actor.user_id, subscription_id)?;

        let mut tx = self.pool.begin().await?;
        if subscription_repo::find_by_external_id(&mut *tx, &state.subscription_id).await?.is_some() {
            return Err(AppError::Conflict("subscription already exists".into()));
        }
        let subscription = subscription_repo::create(&mut *tx, &state, Utc::now()).await?;
        tx.commit().await?;

        Ok(subscription)
    }

    pub async fn list(&self, actor: &Principal) -> Result<Vec<Subscription>, AppError> {
        subscription_repo::list_by_user(&self.pool, actor.user_id).await
    }

    pub async fn get(&self, actor: &Principal, subscription_id: &str) -> Result<Subscription, AppError> {
        let subscription = subscription_repo::find_by_external_id(&self.pool, subscription_id).await?
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", subscription_id)))?;
        ensure_owner(actor, &subscription)?;
        Ok(subscription)
    }

    pub async fn update(&self, actor: &Principal, subscription_id: &str, fields: SubscriptionFields) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let existing = subscription_repo::find_by_external_id(&mut *tx, subscription_id).await?
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", subscription_id)))?;
        ensure_owner(actor, &existing)?;

        let state = fields.into_state(existing.user_id, subscription_id)?;
        let rows = subscription_repo::update_by_external_id(&mut *tx, &state, Utc::now()).await?;
        tx.commit().await?;

        Ok(rows)
    }

    pub async fn delete(&self, actor: &Principal, subscription_id: &str) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let existing = subscription_repo::find_by_external_id(&mut *tx, subscription_id).await?
            .ok_or_else(|| AppError::NotFound(format!("subscription {}", subscription_id)))?;
        ensure_owner(actor, &existing)?;

        let rows = subscription_repo::delete_by_external_id(&mut *tx, subscription_id).await?;
        tx.commit().await?;

        Ok(rows)
    }

    /// Mirrors provider state locally: updates the row with this external id,
    /// or inserts it when it does not exist yet.
    pub async fn upsert_from_provider(&self, state: &SubscriptionState) -> Result<Subscription, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let subscription = match subscription_repo::find_by_external_id(&mut *tx, &state.subscription_id).await? {
            Some(_) => {
                subscription_repo::update_by_external_id(&mut *tx, state, now).await?;
                subscription_repo::find_by_external_id(&mut *tx, &state.subscription_id).await?
                    .ok_or(AppError::Internal)?
            }
            None => subscription_repo::create(&mut *tx, state, now).await?,
        };
        tx.commit().await?;

        info!(subscription_id = %subscription.subscription_id, status = ?subscription.status, "Subscription synchronized");
        Ok(subscription)
    }
}

fn ensure_owner(actor: &Principal, subscription: &Subscription) -> Result<(), AppError> {
    validators::ensure(actor.user_id == subscription.user_id, "subscription belongs to another user")
}
