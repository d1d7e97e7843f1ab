//! Modelo de User
//!
//! Cuentas de la consola de administración. El password se guarda siempre
//! como hash bcrypt; el texto plano existe solo en tránsito durante
//! login/register.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Staff,
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" | "admin" => Ok(UserRole::Admin),
            "Staff" | "staff" => Ok(UserRole::Staff),
            other => Err(AppError::BadRequest(format!("Rol inválido: '{}'", other))),
        }
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_is_staff() {
        assert_eq!(UserRole::default(), UserRole::Staff);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("staff".parse::<UserRole>().unwrap(), UserRole::Staff);
        assert!("Owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            dealership_id: Uuid::new_v4(),
            email: "admin@dealer.test".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$hash"));
    }
}
