use std::sync::Arc;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::models::subscription::{SubscriptionState, SubscriptionStatus};
use crate::domain::services::{subscription_service::SubscriptionService, user_service::UserService};
use crate::error::AppError;
use crate::infra::billing::webhook::{self, CheckoutSessionObject, SubscriptionObject, WebhookEvent};

/// What happened to a verified delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    CustomerLinked { user_id: i64 },
    SubscriptionSynced { subscription_id: String },
    Ignored,
}

pub struct WebhookService {
    secret: String,
    users: Arc<UserService>,
    subscriptions: Arc<SubscriptionService>,
}

impl WebhookService {
    pub fn new(secret: String, users: Arc<UserService>, subscriptions: Arc<SubscriptionService>) -> Self {
        Self { secret, users, subscriptions }
    }

    pub async fn handle(&self, signature: Option<&str>, body: &[u8], now: i64) -> Result<WebhookOutcome, AppError> {
        webhook::verify_signature(signature, body, &self.secret, now).map_err(|e| {
            warn!("Rejected webhook delivery: {}", e);
            e
        })?;

        let event: WebhookEvent = serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("malformed webhook payload: {}", e)))?;

        info!(event_id = %event.id, event_type = %event.event_type, "Webhook received");

        let event_type = event.event_type.clone();
        match event_type.as_str() {
            "checkout.session.completed" => self.checkout_completed(parse_object(event)?).await,
            "customer.subscription.created"
            | "customer.subscription.updated"
            | "customer.subscription.deleted" => self.subscription_changed(parse_object(event)?).await,
            _ => Ok(WebhookOutcome::Ignored),
        }
    }

    async fn checkout_completed(&self, session: CheckoutSessionObject) -> Result<WebhookOutcome, AppError> {
        let Some(user_id) = session.client_reference_id.as_deref().and_then(|r| r.parse::<i64>().ok()) else {
            return Ok(WebhookOutcome::Ignored);
        };
        let Some(customer) = session.customer else {
            return Ok(WebhookOutcome::Ignored);
        };

        match self.users.attach_billing_customer(user_id, customer.id()).await {
            Ok(_) => Ok(WebhookOutcome::CustomerLinked { user_id }),
            Err(AppError::NotFound(_)) => {
                warn!(user_id, "Checkout completed for unknown user");
                Ok(WebhookOutcome::Ignored)
            }
            Err(e) => Err(e),
        }
    }

    async fn subscription_changed(&self, object: SubscriptionObject) -> Result<WebhookOutcome, AppError> {
        let Some(user) = self.users.find_by_billing_customer(object.customer.id()).await? else {
            warn!(customer = %object.customer.id(), "Subscription event for unknown customer");
            return Ok(WebhookOutcome::Ignored);
        };

        let price_id = object.price_id()
            .ok_or_else(|| AppError::Validation("subscription has no items".into()))?;
        let current_period_end = object.period_end()
            .ok_or_else(|| AppError::Validation("subscription has no period end".into()))?;

        let state = SubscriptionState {
            user_id: user.id,
            subscription_id: object.id.clone(),
            price_id: price_id.to_string(),
            status: SubscriptionStatus::from_provider(&object.status),
            current_period_end,
        };
        self.subscriptions.upsert_from_provider(&state).await?;

        Ok(WebhookOutcome::SubscriptionSynced { subscription_id: object.id })
    }
}

fn parse_object<T: DeserializeOwned>(event: WebhookEvent) -> Result<T, AppError> {
    let WebhookEvent { event_type, data, .. } = event;
    serde_json::from_value(data.object)
        .map_err(|e| AppError::Validation(format!("malformed {} payload: {}", event_type, e)))
}
