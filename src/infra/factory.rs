use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::infra::billing::stripe_gateway::StripeGateway;
use crate::infra::db;
use crate::state::AppState;

/// Connects the database, applies migrations and wires the services.
pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let pool = db::connect(config).await?;
    db::run_migrations(&pool).await?;
    info!("Database ready");

    let gateway = Arc::new(StripeGateway::new(
        config.stripe_api_base.clone(),
        config.stripe_secret_key.clone(),
    ));

    Ok(AppState::new(config.clone(), pool, gateway))
}
