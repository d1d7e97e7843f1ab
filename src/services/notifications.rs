//! Notificaciones de leads
//!
//! Colaborador externo al que se avisa cuando entra un lead nuevo. El aviso
//! es best-effort y fire-and-forget: la persistencia del lead ya ocurrió y
//! un fallo aquí nunca la revierte ni afecta la respuesta HTTP.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::lead::Lead;
use crate::utils::errors::AppError;

/// Seam hacia el sistema de avisos (webhook, email, etc.)
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify_new_lead(&self, lead: &Lead) -> Result<(), AppError>;
}

/// Notificador vía webhook HTTP. Sin URL configurada es un no-op.
pub struct WebhookLeadNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookLeadNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl LeadNotifier for WebhookLeadNotifier {
    async fn notify_new_lead(&self, lead: &Lead) -> Result<(), AppError> {
        let Some(url) = &self.webhook_url else {
            return Ok(());
        };

        let payload = json!({
            "event": "lead.created",
            "lead": lead,
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error enviando webhook de lead: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Webhook de lead respondió {}",
                response.status()
            )));
        }

        info!("Notificación de lead {} enviada", lead.id);
        Ok(())
    }
}

/// Disparar la notificación en background. Los errores solo se loguean.
pub fn spawn_lead_notification(notifier: Arc<dyn LeadNotifier>, lead: Lead) {
    tokio::spawn(async move {
        if let Err(e) = notifier.notify_new_lead(&lead).await {
            warn!("Notificación del lead {} falló (no bloquea la operación): {}", lead.id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::{LeadSource, LeadStatus};
    use sqlx::types::Json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn sample_lead() -> Lead {
        Lead {
            id: Uuid::new_v4(),
            dealership_id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            phone: Some("5551234567".to_string()),
            message: Some("Interested".to_string()),
            vehicle_interest: None,
            source: LeadSource::Website,
            status: LeadStatus::New,
            responses: Json(vec![]),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl LeadNotifier for FailingNotifier {
        async fn notify_new_lead(&self, _lead: &Lead) -> Result<(), AppError> {
            Err(AppError::ExternalApi("smtp caído".to_string()))
        }
    }

    struct CountingNotifier(AtomicUsize);

    #[async_trait]
    impl LeadNotifier for CountingNotifier {
        async fn notify_new_lead(&self, _lead: &Lead) -> Result<(), AppError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_webhook_notifier_without_url_is_noop() {
        let notifier = WebhookLeadNotifier::new(None);
        assert!(notifier.notify_new_lead(&sample_lead()).await.is_ok());
    }

    #[tokio::test]
    async fn test_spawn_swallows_notifier_failures() {
        let notifier: Arc<dyn LeadNotifier> = Arc::new(FailingNotifier);
        spawn_lead_notification(notifier, sample_lead());
        // El task en background no debe propagar el error a nadie
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn test_spawn_invokes_notifier() {
        let notifier = Arc::new(CountingNotifier(AtomicUsize::new(0)));
        spawn_lead_notification(notifier.clone(), sample_lead());

        // Darle al task la oportunidad de correr
        for _ in 0..10 {
            if notifier.0.load(Ordering::SeqCst) == 1 {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("el notificador nunca fue invocado");
    }
}
