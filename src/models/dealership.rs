//! Modelo de Dealership
//!
//! La concesionaria es el agregado raíz: los vehículos, leads y usuarios
//! mantienen una referencia no propietaria hacia ella. Borrar una
//! concesionaria no cascadea.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Enlaces a redes sociales de la concesionaria (JSONB)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

/// Dealership principal - mapea exactamente a la tabla dealerships
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dealership {
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
    pub social_media: Option<Json<SocialLinks>>,
    pub whatsapp_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
