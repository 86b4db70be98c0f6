pub mod auth;
pub mod checkout;
pub mod health;
pub mod join_request;
pub mod member;
pub mod notification;
pub mod subscription;
pub mod team;
pub mod user;
pub mod webhook;
