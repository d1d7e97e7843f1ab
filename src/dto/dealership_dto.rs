//! DTOs de Dealership

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::dealership::{Dealership, SocialLinks};

/// Request para crear una nueva concesionaria
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDealershipRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(max = 500))]
    pub logo: Option<String>,

    #[validate(length(max = 100))]
    pub color_scheme: Option<String>,

    #[validate(length(max = 100))]
    pub typography: Option<String>,

    #[validate(length(max = 255))]
    pub tagline: Option<String>,

    #[validate(length(max = 2000))]
    pub mission_statement: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub contact_phone: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,

    #[validate(length(max = 500))]
    pub contact_address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(length(max = 255))]
    pub hours: Option<String>,

    pub social_media: Option<SocialLinks>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub whatsapp_number: Option<String>,
}

/// Request para actualizar una concesionaria existente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDealershipRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub logo: Option<String>,

    #[validate(length(max = 100))]
    pub color_scheme: Option<String>,

    #[validate(length(max = 100))]
    pub typography: Option<String>,

    #[validate(length(max = 255))]
    pub tagline: Option<String>,

    #[validate(length(max = 2000))]
    pub mission_statement: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub contact_phone: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,

    #[validate(length(max = 500))]
    pub contact_address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(length(max = 255))]
    pub hours: Option<String>,

    pub social_media: Option<SocialLinks>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub whatsapp_number: Option<String>,
}

/// Response de concesionaria para la API
#[derive(Debug, Clone, Serialize)]
pub struct DealershipResponse {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub color_scheme: Option<String>,
    pub typography: Option<String>,
    pub tagline: Option<String>,
    pub mission_statement: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hours: Option<String>,
    pub social_media: Option<SocialLinks>,
    pub whatsapp_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Dealership> for DealershipResponse {
    fn from(dealership: Dealership) -> Self {
        Self {
            id: dealership.id,
            name: dealership.name,
            logo: dealership.logo,
            color_scheme: dealership.color_scheme,
            typography: dealership.typography,
            tagline: dealership.tagline,
            mission_statement: dealership.mission_statement,
            contact_phone: dealership.contact_phone,
            contact_email: dealership.contact_email,
            contact_address: dealership.contact_address,
            latitude: dealership.latitude,
            longitude: dealership.longitude,
            hours: dealership.hours,
            social_media: dealership.social_media.map(|s| s.0),
            whatsapp_number: dealership.whatsapp_number,
            created_at: dealership.created_at,
            updated_at: dealership.updated_at,
        }
    }
}

/// Response de concesionarias para listados
#[derive(Debug, Serialize)]
pub struct DealershipListResponse {
    pub dealerships: Vec<DealershipResponse>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_out_of_range_fails() {
        let request = CreateDealershipRequest {
            name: "Premium Motors".to_string(),
            logo: None,
            color_scheme: None,
            typography: None,
            tagline: None,
            mission_statement: None,
            contact_phone: None,
            contact_email: None,
            contact_address: None,
            latitude: Some(91.0),
            longitude: None,
            hours: None,
            social_media: None,
            whatsapp_number: None,
        };
        assert!(request.validate().is_err());
    }
}
