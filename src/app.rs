// Application state and configuration
use std::sync::Arc;

use crate::{
    app_config::AppConfig,
    db::DieselPool,
    services::{SubscriptionService, TokenService},
};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub diesel_pool: DieselPool,
    pub token_service: Arc<TokenService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub max_connections: u32,
}
