//! DTOs del publicador de redes sociales (stub)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Response de la generación de un post a partir de un vehículo
#[derive(Debug, Serialize)]
pub struct GeneratePostResponse {
    pub car_id: Uuid,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub image_urls: Vec<String>,
}

/// Request para agendar una publicación
#[derive(Debug, Deserialize, Validate)]
pub struct SchedulePostRequest {
    pub car_id: Uuid,

    #[validate(custom = "crate::utils::validation::validate_social_platform")]
    pub platform: String,

    pub scheduled_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 2000))]
    pub caption: Option<String>,
}

/// Recibo de una publicación agendada
#[derive(Debug, Serialize)]
pub struct SchedulePostResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub platform: String,
    pub caption: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_platform_fails() {
        let request = SchedulePostRequest {
            car_id: Uuid::new_v4(),
            platform: "myspace".to_string(),
            scheduled_at: None,
            caption: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_known_platform_passes() {
        let request = SchedulePostRequest {
            car_id: Uuid::new_v4(),
            platform: "instagram".to_string(),
            scheduled_at: None,
            caption: Some("Nuevo ingreso".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
