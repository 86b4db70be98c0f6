//! Query functions per table. Each takes any `sqlx::Executor` for the active
//! backend, so callers pass either the pool or an open transaction.

pub mod join_request_repo;
pub mod notification_repo;
pub mod subscription_repo;
pub mod team_member_repo;
pub mod team_repo;
pub mod user_repo;
