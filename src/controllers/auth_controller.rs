//! Controller de autenticación
//!
//! Login y registro de cuentas de la consola admin. El password se hashea
//! con bcrypt en cada alta; el texto plano nunca se persiste.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repositories::dealership_repository::DealershipRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    dealerships: DealershipRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            dealerships: DealershipRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !password_valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let access_token =
            generate_token(user.id, user.dealership_id, user.role, &self.jwt_config)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_config.expiration,
            user: UserResponse::from(user),
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<LoginResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        // Verificar que el email no exista (el índice único respalda esto)
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // La cuenta nace atada a una concesionaria existente
        if self
            .dealerships
            .find_by_id(request.dealership_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(
                "La concesionaria indicada no existe".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = self
            .repository
            .create(
                request.dealership_id,
                &request.email,
                &password_hash,
                request.role.unwrap_or_default(),
            )
            .await?;

        let access_token =
            generate_token(user.id, user.dealership_id, user.role, &self.jwt_config)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_config.expiration,
            user: UserResponse::from(user),
        })
    }
}
