//! Controller de vehículos
//!
//! Lógica de negocio del inventario: validación, chequeo de unicidad de VIN
//! y carga masiva con reporte por ítem.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{
    BulkUploadItemReport, BulkUploadRequest, BulkUploadResponse, CarFilters, CarListResponse,
    CarResponse, CreateCarRequest, UpdateCarRequest,
};
use crate::dto::common::ApiResponse;
use crate::repositories::car_repository::{CarRepository, ParsedCarFilters};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    async fn create_car(
        &self,
        dealership_id: Uuid,
        request: &CreateCarRequest,
    ) -> Result<CarResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        // Verificar que el VIN no exista (el índice único de la base
        // respalda este chequeo ante carreras)
        if self.repository.vin_exists(&request.vin).await? {
            return Err(conflict_error("Car", "VIN", &request.vin));
        }

        let car = self.repository.create(dealership_id, request).await?;
        Ok(CarResponse::from(car))
    }

    pub async fn create(
        &self,
        dealership_id: Uuid,
        request: CreateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        let response = self.create_car(dealership_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        Ok(CarResponse::from(car))
    }

    pub async fn list(&self, filters: CarFilters) -> Result<CarListResponse, AppError> {
        let parsed = ParsedCarFilters::try_from_filters(&filters)?;

        let limit = filters.limit.unwrap_or(50).clamp(1, 100);
        let offset = filters.offset.unwrap_or(0).max(0);

        let cars = self.repository.list(&parsed, limit, offset).await?;
        let total = self.repository.count(&parsed).await?;

        Ok(CarListResponse {
            cars: cars.into_iter().map(CarResponse::from).collect(),
            total,
            page: offset / limit + 1,
            per_page: limit,
            total_pages: (total + limit - 1) / limit,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        dealership_id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if let Some(vin) = &request.vin {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

            if *vin != current.vin && self.repository.vin_exists(vin).await? {
                return Err(conflict_error("Car", "VIN", vin));
            }
        }

        let car = self.repository.update(id, dealership_id, &request).await?;

        Ok(ApiResponse::success_with_message(
            CarResponse::from(car),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, dealership_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, dealership_id).await
    }

    /// Carga masiva: aplica create por ítem y junta las fallas sin abortar
    /// el lote. El caller recibe un reporte por posición.
    pub async fn bulk_upload(
        &self,
        dealership_id: Uuid,
        request: BulkUploadRequest,
    ) -> Result<BulkUploadResponse, AppError> {
        if request.cars.is_empty() {
            return Err(AppError::BadRequest(
                "La carga masiva requiere al menos un vehículo".to_string(),
            ));
        }

        let total = request.cars.len();
        let mut results = Vec::with_capacity(total);
        let mut created = 0usize;
        let mut failed = 0usize;

        for (index, car) in request.cars.iter().enumerate() {
            match self.create_car(dealership_id, car).await {
                Ok(response) => {
                    created += 1;
                    results.push(BulkUploadItemReport {
                        index,
                        vin: car.vin.clone(),
                        success: true,
                        car_id: Some(response.id),
                        error: None,
                    });
                }
                Err(e) => {
                    failed += 1;
                    results.push(BulkUploadItemReport {
                        index,
                        vin: car.vin.clone(),
                        success: false,
                        car_id: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(BulkUploadResponse {
            total,
            created,
            failed,
            results,
        })
    }
}
