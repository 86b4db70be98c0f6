pub mod billing;
pub mod db;
pub mod factory;
pub mod repositories;
