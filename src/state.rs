//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::notifications::{LeadNotifier, WebhookLeadNotifier};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub notifier: Arc<dyn LeadNotifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let jwt = JwtConfig::from(&config);
        let notifier: Arc<dyn LeadNotifier> =
            Arc::new(WebhookLeadNotifier::new(config.lead_webhook_url.clone()));

        Self {
            pool,
            config,
            jwt,
            notifier,
        }
    }
}

// Permite que el middleware de auth extraiga State<JwtConfig> directamente
impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> JwtConfig {
        state.jwt.clone()
    }
}
