//! Controller de leads
//!
//! Alta pública desde el formulario de contacto y gestión desde la consola
//! admin. La notificación al equipo es best-effort: primero se persiste,
//! después se avisa.

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::lead_dto::{
    CreateLeadRequest, LeadFilters, LeadListResponse, LeadResponse, UpdateLeadRequest,
};
use crate::models::lead::{LeadReply, LeadStatus};
use crate::repositories::dealership_repository::DealershipRepository;
use crate::repositories::lead_repository::{LeadRepository, ParsedLeadFilters};
use crate::services::notifications::{spawn_lead_notification, LeadNotifier};
use crate::utils::errors::{not_found_error, AppError};

pub struct LeadController {
    repository: LeadRepository,
    dealerships: DealershipRepository,
    notifier: Arc<dyn LeadNotifier>,
    default_dealership_id: Option<Uuid>,
}

impl LeadController {
    pub fn new(
        pool: PgPool,
        notifier: Arc<dyn LeadNotifier>,
        default_dealership_id: Option<Uuid>,
    ) -> Self {
        Self {
            repository: LeadRepository::new(pool.clone()),
            dealerships: DealershipRepository::new(pool),
            notifier,
            default_dealership_id,
        }
    }

    /// Un lead pertenece siempre a exactamente una concesionaria. Si el
    /// formulario no la indica, se usa la configurada por defecto o la más
    /// antigua registrada.
    async fn resolve_dealership(&self, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        if let Some(id) = requested {
            let exists = self.dealerships.find_by_id(id).await?.is_some();
            if !exists {
                return Err(AppError::BadRequest(
                    "La concesionaria indicada no existe".to_string(),
                ));
            }
            return Ok(id);
        }

        if let Some(id) = self.default_dealership_id {
            return Ok(id);
        }

        self.dealerships
            .find_first()
            .await?
            .map(|d| d.id)
            .ok_or_else(|| {
                AppError::BadRequest("No hay ninguna concesionaria configurada".to_string())
            })
    }

    /// Alta pública: sin autenticación. La persistencia es durable aunque
    /// la notificación posterior falle.
    pub async fn create(
        &self,
        request: CreateLeadRequest,
    ) -> Result<ApiResponse<LeadResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let dealership_id = self.resolve_dealership(request.dealership_id).await?;
        let lead = self.repository.create(dealership_id, &request).await?;

        // Fire-and-forget: un fallo del aviso no revierte el lead
        spawn_lead_notification(self.notifier.clone(), lead.clone());

        Ok(ApiResponse::success_with_message(
            LeadResponse::from(lead),
            "Consulta recibida exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, dealership_id: Uuid) -> Result<LeadResponse, AppError> {
        let lead = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Lead", &id.to_string()))?;

        if lead.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El lead no pertenece a esta concesionaria".to_string(),
            ));
        }

        Ok(LeadResponse::from(lead))
    }

    pub async fn list(
        &self,
        dealership_id: Uuid,
        filters: LeadFilters,
    ) -> Result<LeadListResponse, AppError> {
        let mut parsed = ParsedLeadFilters::try_from_filters(&filters)?;
        parsed.dealership_id = Some(dealership_id);

        let limit = filters.limit.unwrap_or(50).clamp(1, 100);
        let offset = filters.offset.unwrap_or(0).max(0);

        let leads = self.repository.list(&parsed, limit, offset).await?;
        let total = self.repository.count(&parsed).await?;

        Ok(LeadListResponse {
            leads: leads.into_iter().map(LeadResponse::from).collect(),
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
        request: UpdateLeadRequest,
    ) -> Result<ApiResponse<LeadResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let status = request
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<LeadStatus>())
            .transpose()?;

        let reply = request.response.as_ref().map(|message| LeadReply {
            date: Utc::now(),
            message: message.clone(),
        });

        if status.is_none() && reply.is_none() {
            return Err(AppError::BadRequest(
                "Nada para actualizar: se espera un estado o una respuesta".to_string(),
            ));
        }

        let lead = self
            .repository
            .update(id, dealership_id, status, reply)
            .await?;

        Ok(ApiResponse::success_with_message(
            LeadResponse::from(lead),
            "Lead actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, dealership_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, dealership_id).await
    }
}
