use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::PaymentGateway;
use crate::domain::services::{
    auth_service::AuthService, checkout_service::CheckoutService,
    join_request_service::JoinRequestService, notification_service::NotificationService,
    subscription_service::SubscriptionService, team_member_service::TeamMemberService,
    team_service::TeamService, user_service::UserService, webhook_service::WebhookService,
};
use crate::infra::db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub team_member_service: Arc<TeamMemberService>,
    pub join_request_service: Arc<JoinRequestService>,
    pub notification_service: Arc<NotificationService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub checkout_service: Arc<CheckoutService>,
    pub webhook_service: Arc<WebhookService>,
}

impl AppState {
    pub fn new(config: Config, pool: DbPool, gateway: Arc<dyn PaymentGateway>) -> Self {
        let user_service = Arc::new(UserService::new(pool.clone()));
        let subscription_service = Arc::new(SubscriptionService::new(pool.clone()));
        let webhook_service = Arc::new(WebhookService::new(
            config.stripe_webhook_secret.clone(),
            user_service.clone(),
            subscription_service.clone(),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(pool.clone(), &config)),
            team_service: Arc::new(TeamService::new(pool.clone())),
            team_member_service: Arc::new(TeamMemberService::new(pool.clone())),
            join_request_service: Arc::new(JoinRequestService::new(pool.clone())),
            notification_service: Arc::new(NotificationService::new(pool.clone())),
            checkout_service: Arc::new(CheckoutService::new(gateway)),
            user_service,
            subscription_service,
            webhook_service,
            config,
        }
    }
}
