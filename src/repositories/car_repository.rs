//! Repositorio de vehículos
//!
//! Acceso SQL a la tabla cars. Las escrituras concurrentes sobre el mismo
//! registro siguen last-write-wins; no hay token de concurrencia optimista.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::car_dto::{CarFilters, CreateCarRequest, UpdateCarRequest};
use crate::models::car::{Car, CarCondition, CarStatus};
use crate::utils::errors::{conflict_error, is_unique_violation, not_found_error, AppError};

pub struct CarRepository {
    pool: PgPool,
}

/// Filtros ya convertidos a sus tipos SQL
#[derive(Debug, Default)]
pub struct ParsedCarFilters {
    pub status: Option<CarStatus>,
    pub condition: Option<CarCondition>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub dealership_id: Option<Uuid>,
}

impl ParsedCarFilters {
    pub fn try_from_filters(filters: &CarFilters) -> Result<Self, AppError> {
        Ok(Self {
            status: filters
                .status
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<CarStatus>())
                .transpose()?,
            condition: filters
                .condition
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<CarCondition>())
                .transpose()?,
            make: filters.make.clone().filter(|s| !s.trim().is_empty()),
            model: filters.model.clone().filter(|s| !s.trim().is_empty()),
            year_from: filters.year_from,
            year_to: filters.year_to,
            price_min: filters.price_min,
            price_max: filters.price_max,
            dealership_id: None,
        })
    }
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dealership_id: Uuid, input: &CreateCarRequest) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (
                id, dealership_id, make, model, year, trim, mileage, price, vin,
                condition, fuel_type, transmission, engine, drivetrain,
                exterior_color, interior_color, features, images, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dealership_id)
        .bind(&input.make)
        .bind(&input.model)
        .bind(input.year)
        .bind(&input.trim)
        .bind(input.mileage.unwrap_or(0))
        .bind(input.price)
        .bind(&input.vin)
        .bind(input.condition)
        .bind(&input.fuel_type)
        .bind(&input.transmission)
        .bind(&input.engine)
        .bind(&input.drivetrain)
        .bind(&input.exterior_color)
        .bind(&input.interior_color)
        .bind(&input.features)
        .bind(&input.images)
        .bind(input.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict_error("Car", "VIN", &input.vin)
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(car)
    }

    pub async fn list(&self, filters: &ParsedCarFilters, limit: i64, offset: i64) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE ($1::car_status IS NULL OR status = $1)
              AND ($2::car_condition IS NULL OR condition = $2)
              AND ($3::text IS NULL OR make = $3)
              AND ($4::text IS NULL OR model = $4)
              AND ($5::int4 IS NULL OR year >= $5)
              AND ($6::int4 IS NULL OR year <= $6)
              AND ($7::numeric IS NULL OR price >= $7)
              AND ($8::numeric IS NULL OR price <= $8)
              AND ($9::uuid IS NULL OR dealership_id = $9)
            ORDER BY created_at DESC
            LIMIT $10 OFFSET $11
            "#,
        )
        .bind(filters.status)
        .bind(filters.condition)
        .bind(&filters.make)
        .bind(&filters.model)
        .bind(filters.year_from)
        .bind(filters.year_to)
        .bind(filters.price_min)
        .bind(filters.price_max)
        .bind(filters.dealership_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(cars)
    }

    pub async fn count(&self, filters: &ParsedCarFilters) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM cars
            WHERE ($1::car_status IS NULL OR status = $1)
              AND ($2::car_condition IS NULL OR condition = $2)
              AND ($3::text IS NULL OR make = $3)
              AND ($4::text IS NULL OR model = $4)
              AND ($5::int4 IS NULL OR year >= $5)
              AND ($6::int4 IS NULL OR year <= $6)
              AND ($7::numeric IS NULL OR price >= $7)
              AND ($8::numeric IS NULL OR price <= $8)
              AND ($9::uuid IS NULL OR dealership_id = $9)
            "#,
        )
        .bind(filters.status)
        .bind(filters.condition)
        .bind(&filters.make)
        .bind(&filters.model)
        .bind(filters.year_from)
        .bind(filters.year_to)
        .bind(filters.price_min)
        .bind(filters.price_max)
        .bind(filters.dealership_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(total)
    }

    pub async fn vin_exists(&self, vin: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cars WHERE vin = $1)")
                .bind(vin)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        dealership_id: Uuid,
        patch: &UpdateCarRequest,
    ) -> Result<Car, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        // Verificar que pertenece a la concesionaria del admin
        if current.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta concesionaria".to_string(),
            ));
        }

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars SET
                make = $2, model = $3, year = $4, trim = $5, mileage = $6,
                price = $7, vin = $8, condition = $9, fuel_type = $10,
                transmission = $11, engine = $12, drivetrain = $13,
                exterior_color = $14, interior_color = $15, features = $16,
                images = $17, status = $18, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.make.clone().unwrap_or(current.make))
        .bind(patch.model.clone().unwrap_or(current.model))
        .bind(patch.year.unwrap_or(current.year))
        .bind(patch.trim.clone().or(current.trim))
        .bind(patch.mileage.unwrap_or(current.mileage))
        .bind(patch.price.unwrap_or(current.price))
        .bind(patch.vin.clone().unwrap_or(current.vin))
        .bind(patch.condition.unwrap_or(current.condition))
        .bind(patch.fuel_type.clone().or(current.fuel_type))
        .bind(patch.transmission.clone().or(current.transmission))
        .bind(patch.engine.clone().or(current.engine))
        .bind(patch.drivetrain.clone().or(current.drivetrain))
        .bind(patch.exterior_color.clone().or(current.exterior_color))
        .bind(patch.interior_color.clone().or(current.interior_color))
        .bind(patch.features.clone().unwrap_or(current.features))
        .bind(patch.images.clone().unwrap_or(current.images))
        .bind(patch.status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Ya existe un vehículo con ese VIN".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(car)
    }

    pub async fn delete(&self, id: Uuid, dealership_id: Uuid) -> Result<(), AppError> {
        let car = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        if car.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta concesionaria".to_string(),
            ));
        }

        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
