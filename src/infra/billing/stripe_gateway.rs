use crate::domain::ports::{CheckoutSessionParams, PaymentGateway};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: String, secret_key: String) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }
}

#[derive(Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<String, AppError> {
        let form = [
            ("mode", "subscription"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", params.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("success_url", params.success_url.as_str()),
            ("cancel_url", params.cancel_url.as_str()),
            ("client_reference_id", params.client_reference_id.as_str()),
        ];

        let res = self.client.post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Checkout session request failed: {}", e);
                error!("{}", msg);
                AppError::BadGateway(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::BadGateway(format!("Checkout session rejected. Status: {}, Body: {}", status, text)));
        }

        let session: CheckoutSessionResponse = res.json().await
            .map_err(|e| AppError::BadGateway(format!("Unreadable checkout session response: {}", e)))?;

        info!(session_id = %session.id, "Checkout session created");

        session.url.ok_or_else(|| AppError::BadGateway("Checkout session has no url".into()))
    }
}
