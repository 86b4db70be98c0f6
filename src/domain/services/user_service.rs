use chrono::Utc;
use tracing::info;

use crate::domain::models::{
    auth::Principal,
    team_member::TeamMemberDetail,
    user::{NewUser, NewUserParams, User, UserChanges},
};
use crate::domain::validators;
use crate::error::AppError;
use crate::infra::db::DbPool;
use crate::infra::repositories::{team_member_repo, user_repo};

pub struct UserService {
    pool: DbPool,
}

impl UserService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, params: NewUserParams) -> Result<User, AppError> {
        let new_user = NewUser::new(params)?;

        let mut tx = self.pool.begin().await?;
        if user_repo::find_by_auth_subject(&mut *tx, &new_user.auth_subject).await?.is_some() {
            return Err(AppError::Conflict("a user with this auth subject already exists".into()));
        }
        let user = user_repo::create(&mut *tx, &new_user).await?;
        tx.commit().await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        user_repo::list(&self.pool).await
    }

    pub async fn get(&self, user_id: i64) -> Result<User, AppError> {
        user_repo::find_by_id(&self.pool, user_id).await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    pub async fn update(&self, actor: &Principal, user_id: i64, changes: UserChanges) -> Result<u64, AppError> {
        validators::ensure(validators::can_modify_user(actor, user_id), "cannot modify another user")?;
        let changes = changes.normalized()?;

        let mut tx = self.pool.begin().await?;
        let rows = user_repo::update(&mut *tx, user_id, &changes, Utc::now()).await?;
        AppError::ensure_affected(rows, "user")?;
        tx.commit().await?;

        Ok(rows)
    }

    pub async fn delete(&self, actor: &Principal, user_id: i64) -> Result<u64, AppError> {
        validators::ensure(validators::can_modify_user(actor, user_id), "cannot delete another user")?;

        let mut tx = self.pool.begin().await?;
        let rows = user_repo::delete(&mut *tx, user_id).await?;
        AppError::ensure_affected(rows, "user")?;
        tx.commit().await?;

        info!(user_id, "User deleted");
        Ok(rows)
    }

    pub async fn teams(&self, user_id: i64) -> Result<Vec<TeamMemberDetail>, AppError> {
        team_member_repo::list_by_user(&self.pool, user_id).await
    }

    /// Links a payment-provider customer to a user. Called from the webhook,
    /// so there is no actor to check.
    pub async fn attach_billing_customer(&self, user_id: i64, customer_id: &str) -> Result<u64, AppError> {
        let rows = user_repo::set_billing_customer(&self.pool, user_id, customer_id, Utc::now()).await?;
        AppError::ensure_affected(rows, "user")
    }

    pub async fn find_by_billing_customer(&self, customer_id: &str) -> Result<Option<User>, AppError> {
        user_repo::find_by_billing_customer(&self.pool, customer_id).await
    }
}
