pub mod auth;
pub mod join_request;
pub mod notification;
pub mod subscription;
pub mod team;
pub mod team_member;
pub mod user;
