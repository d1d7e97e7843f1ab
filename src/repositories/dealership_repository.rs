//! Repositorio de concesionarias
//!
//! La concesionaria es el agregado raíz; borrarla no cascadea sobre
//! vehículos, leads ni usuarios.

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::dto::dealership_dto::{CreateDealershipRequest, UpdateDealershipRequest};
use crate::models::dealership::Dealership;
use crate::utils::errors::{not_found_error, AppError};

pub struct DealershipRepository {
    pool: PgPool,
}

impl DealershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateDealershipRequest) -> Result<Dealership, AppError> {
        let dealership = sqlx::query_as::<_, Dealership>(
            r#"
            INSERT INTO dealerships (
                id, name, logo, color_scheme, typography, tagline,
                mission_statement, contact_phone, contact_email, contact_address,
                latitude, longitude, hours, social_media, whatsapp_number,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.logo)
        .bind(&input.color_scheme)
        .bind(&input.typography)
        .bind(&input.tagline)
        .bind(&input.mission_statement)
        .bind(&input.contact_phone)
        .bind(&input.contact_email)
        .bind(&input.contact_address)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.hours)
        .bind(input.social_media.clone().map(Json))
        .bind(&input.whatsapp_number)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(dealership)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Dealership>, AppError> {
        let dealership = sqlx::query_as::<_, Dealership>("SELECT * FROM dealerships WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(dealership)
    }

    /// Concesionaria más antigua; se usa como destino por defecto de los
    /// leads del formulario público cuando no se indica otra.
    pub async fn find_first(&self) -> Result<Option<Dealership>, AppError> {
        let dealership = sqlx::query_as::<_, Dealership>(
            "SELECT * FROM dealerships ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(dealership)
    }

    pub async fn list(&self) -> Result<Vec<Dealership>, AppError> {
        let dealerships = sqlx::query_as::<_, Dealership>(
            "SELECT * FROM dealerships ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(dealerships)
    }

    pub async fn update(&self, id: Uuid, patch: &UpdateDealershipRequest) -> Result<Dealership, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Dealership", &id.to_string()))?;

        let dealership = sqlx::query_as::<_, Dealership>(
            r#"
            UPDATE dealerships SET
                name = $2, logo = $3, color_scheme = $4, typography = $5,
                tagline = $6, mission_statement = $7, contact_phone = $8,
                contact_email = $9, contact_address = $10, latitude = $11,
                longitude = $12, hours = $13, social_media = $14,
                whatsapp_number = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name.clone().unwrap_or(current.name))
        .bind(patch.logo.clone().or(current.logo))
        .bind(patch.color_scheme.clone().or(current.color_scheme))
        .bind(patch.typography.clone().or(current.typography))
        .bind(patch.tagline.clone().or(current.tagline))
        .bind(patch.mission_statement.clone().or(current.mission_statement))
        .bind(patch.contact_phone.clone().or(current.contact_phone))
        .bind(patch.contact_email.clone().or(current.contact_email))
        .bind(patch.contact_address.clone().or(current.contact_address))
        .bind(patch.latitude.or(current.latitude))
        .bind(patch.longitude.or(current.longitude))
        .bind(patch.hours.clone().or(current.hours))
        .bind(patch.social_media.clone().map(Json).or(current.social_media))
        .bind(patch.whatsapp_number.clone().or(current.whatsapp_number))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(dealership)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM dealerships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Dealership", &id.to_string()));
        }

        Ok(())
    }
}
