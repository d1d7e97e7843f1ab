//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para emitir y verificar tokens JWT,
//! y la comprobación de sesión que usa la consola de administración.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    models::user::UserRole,
    utils::errors::AppError,
};

/// Claims del JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,           // user_id
    pub dealership_id: String, // concesionaria a la que pertenece el usuario
    pub role: UserRole,        // rol requerido por las rutas protegidas
    pub exp: usize,            // expiration timestamp
    pub iat: usize,            // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar JWT token para un usuario
pub fn generate_token(
    user_id: Uuid,
    dealership_id: Uuid,
    role: UserRole,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        dealership_id: dealership_id.to_string(),
        role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token (firma + expiración)
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Resultado de la comprobación de sesión de la consola admin
#[derive(Debug)]
pub enum SessionCheck {
    /// Token presente y válido: la vista protegida puede renderizarse
    Authenticated(JwtClaims),
    /// Sin token, token malformado o expirado: descartar credencial y volver al login
    RedirectToLogin,
}

impl SessionCheck {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionCheck::Authenticated(_))
    }
}

/// Evaluar la credencial almacenada al entrar a una ruta de administración.
///
/// Nunca falla: cualquier credencial ausente, malformada o expirada se resuelve
/// como una redirección al login.
pub fn evaluate_session(stored_token: Option<&str>, config: &JwtConfig) -> SessionCheck {
    match stored_token {
        None => SessionCheck::RedirectToLogin,
        Some(token) => match verify_token(token, config) {
            Ok(claims) => SessionCheck::Authenticated(claims),
            Err(_) => SessionCheck::RedirectToLogin,
        },
    }
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Jwt("Header Authorization debe comenzar con 'Bearer '".to_string()))?;

    if token.is_empty() {
        return Err(AppError::Jwt("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "secret-de-prueba".to_string(),
            expiration: 3600,
        }
    }

    fn expired_token(config: &JwtConfig) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            dealership_id: Uuid::new_v4().to_string(),
            role: UserRole::Admin,
            exp: (now - 7200) as usize,
            iat: (now - 10800) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let dealership_id = Uuid::new_v4();

        let token = generate_token(user_id, dealership_id, UserRole::Staff, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.dealership_id, dealership_id.to_string());
        assert_eq!(claims.role, UserRole::Staff);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let token = expired_token(&config);
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let config = test_config();
        let token = generate_token(Uuid::new_v4(), Uuid::new_v4(), UserRole::Admin, &config).unwrap();

        let other = JwtConfig {
            secret: "otro-secreto".to_string(),
            expiration: 3600,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_session_without_token_redirects() {
        let config = test_config();
        assert!(!evaluate_session(None, &config).is_authenticated());
    }

    #[test]
    fn test_session_with_expired_token_redirects() {
        let config = test_config();
        let token = expired_token(&config);
        assert!(!evaluate_session(Some(&token), &config).is_authenticated());
    }

    #[test]
    fn test_session_with_malformed_token_redirects() {
        let config = test_config();
        assert!(!evaluate_session(Some("no-es-un-jwt"), &config).is_authenticated());
    }

    #[test]
    fn test_session_with_valid_token_authenticates() {
        let config = test_config();
        let token = generate_token(Uuid::new_v4(), Uuid::new_v4(), UserRole::Admin, &config).unwrap();

        match evaluate_session(Some(&token), &config) {
            SessionCheck::Authenticated(claims) => assert_eq!(claims.role, UserRole::Admin),
            SessionCheck::RedirectToLogin => panic!("una sesión válida no debe redirigir"),
        }
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
