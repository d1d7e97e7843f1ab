//! DTOs de Lead
//!
//! El formulario público de contacto crea leads sin autenticación; la
//! consola admin los lista, filtra y actualiza.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::lead::{Lead, LeadReply, LeadSource, LeadStatus};

/// Request del formulario público de contacto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 2000))]
    pub message: Option<String>,

    pub vehicle_interest: Option<Uuid>,

    pub source: Option<LeadSource>,

    // Si falta, el servicio resuelve la concesionaria por defecto
    pub dealership_id: Option<Uuid>,
}

/// Request de actualización desde la consola admin: cambio de estado
/// y/o respuesta a anexar a la secuencia
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    pub status: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub response: Option<String>,
}

/// Response de lead para la API
#[derive(Debug, Clone, Serialize)]
pub struct LeadResponse {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub vehicle_interest: Option<Uuid>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub responses: Vec<LeadReply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            dealership_id: lead.dealership_id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            message: lead.message,
            vehicle_interest: lead.vehicle_interest,
            source: lead.source,
            status: lead.status,
            responses: lead.responses.0,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Response de leads para listados paginados
#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub leads: Vec<LeadResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Filtros de la bandeja de leads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilters {
    pub source: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_request_validates() {
        let request = CreateLeadRequest {
            name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            phone: Some("5551234567".to_string()),
            message: Some("Interested".to_string()),
            vehicle_interest: None,
            source: None,
            dealership_id: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let request = CreateLeadRequest {
            name: "".to_string(),
            email: None,
            phone: None,
            message: None,
            vehicle_interest: None,
            source: None,
            dealership_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_email_fails() {
        let request = CreateLeadRequest {
            name: "Jane".to_string(),
            email: Some("not-an-email".to_string()),
            phone: None,
            message: None,
            vehicle_interest: None,
            source: None,
            dealership_id: None,
        };
        assert!(request.validate().is_err());
    }
}
