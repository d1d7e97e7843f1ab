//! DTOs de autenticación

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole};

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Request de registro de cuenta admin
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    // Por defecto Staff
    pub role: Option<UserRole>,

    pub dealership_id: Uuid,
}

/// Response de usuario para la API (nunca incluye el hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            dealership_id: user.dealership_id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response de login/registro exitoso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_valid_email() {
        let request = LoginRequest {
            email: "sin-arroba".to_string(),
            password: "secreto1".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_requires_min_password() {
        let request = RegisterRequest {
            email: "admin@dealer.test".to_string(),
            password: "corta".to_string(),
            role: None,
            dealership_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_err());
    }
}
