pub mod auth_service;
pub mod checkout_service;
pub mod join_request_service;
pub mod notification_service;
pub mod subscription_service;
pub mod team_member_service;
pub mod team_service;
pub mod user_service;
pub mod webhook_service;
