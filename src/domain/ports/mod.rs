use crate::error::AppError;
use async_trait::async_trait;

/// What a hosted checkout page is opened for: one price, billed as a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionParams {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub client_reference_id: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Returns the URL of the hosted checkout page.
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<String, AppError>;
}
