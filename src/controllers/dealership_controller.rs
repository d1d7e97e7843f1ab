//! Controller de concesionarias

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::dealership_dto::{
    CreateDealershipRequest, DealershipListResponse, DealershipResponse, UpdateDealershipRequest,
};
use crate::repositories::dealership_repository::DealershipRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct DealershipController {
    repository: DealershipRepository,
}

impl DealershipController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DealershipRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDealershipRequest,
    ) -> Result<ApiResponse<DealershipResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let dealership = self.repository.create(&request).await?;

        Ok(ApiResponse::success_with_message(
            DealershipResponse::from(dealership),
            "Concesionaria creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DealershipResponse, AppError> {
        let dealership = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Dealership", &id.to_string()))?;

        Ok(DealershipResponse::from(dealership))
    }

    pub async fn list(&self) -> Result<DealershipListResponse, AppError> {
        let dealerships = self.repository.list().await?;
        let total = dealerships.len() as i64;

        Ok(DealershipListResponse {
            dealerships: dealerships
                .into_iter()
                .map(DealershipResponse::from)
                .collect(),
            total,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDealershipRequest,
    ) -> Result<ApiResponse<DealershipResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let dealership = self.repository.update(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            DealershipResponse::from(dealership),
            "Concesionaria actualizada exitosamente".to_string(),
        ))
    }

    /// Borrado sin cascada: los vehículos, leads y usuarios conservan su
    /// referencia a la concesionaria eliminada.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
