//! Repositorio de leads
//!
//! Acceso SQL a la tabla leads. Las respuestas del equipo se guardan como
//! secuencia ordenada en JSONB y solo se anexan, nunca se reescriben desde
//! la API pública.

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::dto::lead_dto::{CreateLeadRequest, LeadFilters};
use crate::models::lead::{Lead, LeadReply, LeadSource, LeadStatus};
use crate::utils::errors::{not_found_error, AppError};

pub struct LeadRepository {
    pool: PgPool,
}

/// Filtros de leads ya convertidos a sus tipos SQL
#[derive(Debug, Default)]
pub struct ParsedLeadFilters {
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub dealership_id: Option<Uuid>,
}

impl ParsedLeadFilters {
    pub fn try_from_filters(filters: &LeadFilters) -> Result<Self, AppError> {
        Ok(Self {
            source: filters
                .source
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<LeadSource>())
                .transpose()?,
            status: filters
                .status
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<LeadStatus>())
                .transpose()?,
            dealership_id: None,
        })
    }
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dealership_id: Uuid, input: &CreateLeadRequest) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                id, dealership_id, name, email, phone, message,
                vehicle_interest, source, status, responses, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dealership_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.message)
        .bind(input.vehicle_interest)
        .bind(input.source.unwrap_or_default())
        .bind(LeadStatus::New)
        .bind(Json(Vec::<LeadReply>::new()))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(lead)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(lead)
    }

    pub async fn list(
        &self,
        filters: &ParsedLeadFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE ($1::lead_source IS NULL OR source = $1)
              AND ($2::lead_status IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR dealership_id = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.source)
        .bind(filters.status)
        .bind(filters.dealership_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(leads)
    }

    pub async fn count(&self, filters: &ParsedLeadFilters) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM leads
            WHERE ($1::lead_source IS NULL OR source = $1)
              AND ($2::lead_status IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR dealership_id = $3)
            "#,
        )
        .bind(filters.source)
        .bind(filters.status)
        .bind(filters.dealership_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(total)
    }

    /// Actualizar estado y/o anexar una respuesta del equipo.
    /// Lectura-modificación-escritura: la última escritura gana.
    pub async fn update(
        &self,
        id: Uuid,
        dealership_id: Uuid,
        status: Option<LeadStatus>,
        reply: Option<LeadReply>,
    ) -> Result<Lead, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Lead", &id.to_string()))?;

        if current.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El lead no pertenece a esta concesionaria".to_string(),
            ));
        }

        let new_status = status.unwrap_or(current.status);
        let mut responses = current.responses.0;
        if let Some(reply) = reply {
            responses.push(reply);
        }

        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET status = $2, responses = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_status)
        .bind(Json(responses))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(lead)
    }

    pub async fn delete(&self, id: Uuid, dealership_id: Uuid) -> Result<(), AppError> {
        let lead = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Lead", &id.to_string()))?;

        if lead.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El lead no pertenece a esta concesionaria".to_string(),
            ));
        }

        sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }
}
