use std::sync::Arc;
use tracing::info;

use crate::domain::models::auth::Principal;
use crate::domain::ports::{CheckoutSessionParams, PaymentGateway};
use crate::error::AppError;

pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Opens a subscription checkout for the actor and returns the page URL.
    pub async fn create_session(&self, actor: &Principal, price_id: &str, success_url: &str, cancel_url: &str) -> Result<String, AppError> {
        let price_id = required("price_id", price_id)?;
        let success_url = required("success_url", success_url)?;
        let cancel_url = required("cancel_url", cancel_url)?;

        let params = CheckoutSessionParams {
            price_id,
            success_url,
            cancel_url,
            client_reference_id: actor.user_id.to_string(),
        };

        let url = self.gateway.create_checkout_session(&params).await?;
        info!(user_id = actor.user_id, price_id = %params.price_id, "Checkout session opened");
        Ok(url)
    }
}

fn required(name: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", name)));
    }
    Ok(value.to_string())
}
