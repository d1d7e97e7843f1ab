//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens y la
//! verificación de rol contra la allow-list que declara cada ruta.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    utils::errors::AppError,
    utils::jwt::{verify_token, JwtClaims, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub dealership_id: Uuid,
    pub role: UserRole,
}

impl TryFrom<&JwtClaims> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub)
                .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?,
            dealership_id: Uuid::parse_str(&claims.dealership_id)
                .map_err(|_| AppError::Unauthorized("ID de concesionaria inválido".to_string()))?,
            role: claims.role,
        })
    }
}

/// Middleware de autenticación JWT.
///
/// Valida firma y expiración del bearer token e inyecta el usuario
/// autenticado en las extensions. No consulta la base: el token es la
/// fuente de identidad y rol.
pub async fn auth_middleware(
    State(jwt_config): State<JwtConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT (firma + expiración)
    let claims = verify_token(auth_header, &jwt_config)?;

    let authenticated_user = AuthenticatedUser::try_from(&claims)?;
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Verificar el rol del usuario contra la allow-list de la ruta
pub fn require_role(user: &AuthenticatedUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "No tienes permisos suficientes para esta operación".to_string(),
        ))
    }
}

/// Middleware para rutas que requieren rol Admin
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            dealership_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_require_role_allows_listed_roles() {
        let admin = user_with_role(UserRole::Admin);
        assert!(require_role(&admin, &[UserRole::Admin]).is_ok());
        assert!(require_role(&admin, &[UserRole::Admin, UserRole::Staff]).is_ok());
    }

    #[test]
    fn test_require_role_rejects_unlisted_roles() {
        let staff = user_with_role(UserRole::Staff);
        let result = require_role(&staff, &[UserRole::Admin]);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_authenticated_user_from_claims() {
        let user_id = Uuid::new_v4();
        let dealership_id = Uuid::new_v4();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            dealership_id: dealership_id.to_string(),
            role: UserRole::Staff,
            exp: 0,
            iat: 0,
        };
        let user = AuthenticatedUser::try_from(&claims).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.dealership_id, dealership_id);
        assert_eq!(user.role, UserRole::Staff);
    }

    #[test]
    fn test_claims_with_bad_uuid_are_rejected() {
        let claims = JwtClaims {
            sub: "no-es-uuid".to_string(),
            dealership_id: Uuid::new_v4().to_string(),
            role: UserRole::Admin,
            exp: 0,
            iat: 0,
        };
        assert!(AuthenticatedUser::try_from(&claims).is_err());
    }
}
