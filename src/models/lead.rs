//! Modelo de Lead
//!
//! Este módulo contiene el struct Lead y sus enums. Un lead es una consulta
//! de un cliente potencial capturada desde el formulario público de contacto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Origen del lead - mapea al ENUM lead_source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "lead_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    #[default]
    Website,
    Whatsapp,
    Social,
}

impl FromStr for LeadSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(LeadSource::Website),
            "whatsapp" => Ok(LeadSource::Whatsapp),
            "social" => Ok(LeadSource::Social),
            other => Err(AppError::BadRequest(format!(
                "Origen de lead inválido: '{}'",
                other
            ))),
        }
    }
}

/// Estado del lead - mapea al ENUM lead_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "closed" => Ok(LeadStatus::Closed),
            other => Err(AppError::BadRequest(format!(
                "Estado de lead inválido: '{}'",
                other
            ))),
        }
    }
}

/// Respuesta del equipo registrada sobre un lead (secuencia ordenada, JSONB)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadReply {
    pub date: DateTime<Utc>,
    pub message: String,
}

/// Lead principal - mapea exactamente a la tabla leads.
/// Invariante: un lead pertenece siempre a exactamente una concesionaria.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub vehicle_interest: Option<Uuid>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub responses: Json<Vec<LeadReply>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(LeadSource::default(), LeadSource::Website);
        assert_eq!(LeadStatus::default(), LeadStatus::New);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("contacted".parse::<LeadStatus>().unwrap(), LeadStatus::Contacted);
        assert!("archived".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_reply_serde_round_trip() {
        let reply = LeadReply {
            date: Utc::now(),
            message: "Llamado, sin respuesta".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        let back: LeadReply = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reply);
    }
}
