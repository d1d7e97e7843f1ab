//! Controller del publicador de redes sociales
//!
//! Stub: arma el contenido del post a partir del vehículo y devuelve un
//! recibo de agendado. No hay integración real con ninguna plataforma;
//! el scheduling efectivo es un colaborador externo.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::social_dto::{GeneratePostResponse, SchedulePostRequest, SchedulePostResponse};
use crate::models::car::Car;
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::{not_found_error, AppError};

const CAPTION_VARIANTS: [usize; 3] = [0, 1, 2];

pub struct SocialMediaController {
    cars: CarRepository,
}

/// Armar el texto del post para un vehículo. Determinista por variante.
fn compose_caption(car: &Car, variant: usize) -> String {
    match variant % CAPTION_VARIANTS.len() {
        0 => format!(
            "🚗 {} {} {} ya disponible por ${}. ¡Escribinos para coordinar una visita!",
            car.year, car.make, car.model, car.price
        ),
        1 => format!(
            "Recién ingresado: {} {} {} con {} km. Precio: ${}.",
            car.year, car.make, car.model, car.mileage, car.price
        ),
        _ => format!(
            "¿Buscás un {}? Este {} {} te está esperando. Consultá por ${}.",
            car.make, car.year, car.model, car.price
        ),
    }
}

/// Hashtags a partir de los campos del vehículo (sin espacios ni símbolos)
fn compose_hashtags(car: &Car) -> Vec<String> {
    let sanitize = |value: &str| -> String {
        value.chars().filter(|c| c.is_alphanumeric()).collect()
    };

    vec![
        format!("#{}", sanitize(&car.make)),
        format!("#{}", sanitize(&car.model)),
        format!("#{:?}", car.condition).to_lowercase(),
        "#autos".to_string(),
    ]
}

impl SocialMediaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool),
        }
    }

    async fn find_owned_car(&self, car_id: Uuid, dealership_id: Uuid) -> Result<Car, AppError> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        if car.dealership_id != dealership_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta concesionaria".to_string(),
            ));
        }

        Ok(car)
    }

    pub async fn generate_post(
        &self,
        car_id: Uuid,
        dealership_id: Uuid,
    ) -> Result<GeneratePostResponse, AppError> {
        let car = self.find_owned_car(car_id, dealership_id).await?;

        let variant = *CAPTION_VARIANTS
            .choose(&mut rand::thread_rng())
            .unwrap_or(&0);

        Ok(GeneratePostResponse {
            car_id: car.id,
            caption: compose_caption(&car, variant),
            hashtags: compose_hashtags(&car),
            image_urls: car.images,
        })
    }

    pub async fn schedule_post(
        &self,
        dealership_id: Uuid,
        request: SchedulePostRequest,
    ) -> Result<SchedulePostResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let car = self.find_owned_car(request.car_id, dealership_id).await?;

        let scheduled_at = request
            .scheduled_at
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        let receipt = SchedulePostResponse {
            id: Uuid::new_v4(),
            car_id: car.id,
            platform: request.platform,
            caption: request.caption,
            scheduled_at,
            status: "scheduled".to_string(),
            created_at: Utc::now(),
        };

        info!(
            "Publicación {} agendada para {} en {} (stub, sin publicación real)",
            receipt.id, receipt.scheduled_at, receipt.platform
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::car::{CarCondition, CarStatus};
    use rust_decimal::Decimal;

    fn sample_car() -> Car {
        Car {
            id: Uuid::new_v4(),
            dealership_id: Uuid::new_v4(),
            make: "Mercedes-Benz".to_string(),
            model: "E 450".to_string(),
            year: 2023,
            trim: Some("4MATIC".to_string()),
            mileage: 14200,
            price: Decimal::new(64800, 0),
            vin: "1HGCM82633A004352".to_string(),
            condition: CarCondition::Certified,
            fuel_type: Some("gasoline".to_string()),
            transmission: Some("automatic".to_string()),
            engine: None,
            drivetrain: None,
            exterior_color: Some("silver".to_string()),
            interior_color: Some("black".to_string()),
            features: vec![],
            images: vec!["/images/cars/mercedes-e450.jpg".to_string()],
            status: CarStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_caption_includes_car_identity() {
        let car = sample_car();
        for variant in 0..CAPTION_VARIANTS.len() {
            let caption = compose_caption(&car, variant);
            assert!(caption.contains("Mercedes-Benz"));
            assert!(caption.contains("E 450"));
            assert!(caption.contains("2023"));
        }
    }

    #[test]
    fn test_hashtags_have_no_spaces_or_symbols() {
        let car = sample_car();
        let hashtags = compose_hashtags(&car);
        assert!(hashtags.contains(&"#MercedesBenz".to_string()));
        assert!(hashtags.contains(&"#E450".to_string()));
        for tag in &hashtags {
            assert!(tag.starts_with('#'));
            assert!(!tag[1..].contains(' '));
        }
    }
}
