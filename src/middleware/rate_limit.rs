//! Middleware de Rate Limiting
//!
//! Este módulo maneja la limitación de velocidad de requests
//! para prevenir abuso de la API. Ventana fija por IP, en memoria.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window_duration: Duration::from_secs(config.rate_limit_window),
        }
    }

    /// Variante más estricta (mitad de cupo, misma ventana) para endpoints
    /// sensibles como login/register. Comparte el contador global.
    pub fn stricter(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            max_requests: (self.max_requests / 2).max(1),
            window_duration: self.window_duration,
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        // Ventana de tiempo expirada: reiniciar contador
        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// IP del cliente a partir de los headers del proxy
fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    rate_limit_state.check_rate_limit(&ip).await?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(max_requests: u32, window_secs: u64) -> RateLimitState {
        RateLimitState {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration: Duration::from_secs(window_secs),
        }
    }

    #[tokio::test]
    async fn test_requests_within_limit_pass() {
        let state = state(3, 60);
        for _ in 0..3 {
            assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_request_over_limit_is_rejected() {
        let state = state(2, 60);
        assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(state.check_rate_limit("1.2.3.4").await.is_ok());
        assert!(matches!(
            state.check_rate_limit("1.2.3.4").await,
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let state = state(1, 60);
        assert!(state.check_rate_limit("1.1.1.1").await.is_ok());
        assert!(state.check_rate_limit("2.2.2.2").await.is_ok());
        assert!(state.check_rate_limit("1.1.1.1").await.is_err());
    }

    #[test]
    fn test_stricter_halves_the_quota() {
        let s = state(10, 60);
        assert_eq!(s.stricter().max_requests, 5);
        // Nunca baja de 1
        assert_eq!(state(1, 60).stricter().max_requests, 1);
    }
}
