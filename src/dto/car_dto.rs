//! DTOs de Car
//!
//! Requests, responses y filtros para las operaciones CRUD de vehículos.
//! La validación es declarativa y corre en el borde, antes de llegar a
//! cualquier servicio.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::car::{Car, CarCondition, CarStatus};
use crate::utils::validation::VIN_RE;

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(length(max = 100))]
    pub trim: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_price")]
    pub price: Decimal,

    #[validate(regex = "VIN_RE")]
    pub vin: String,

    pub condition: CarCondition,

    #[validate(length(max = 50))]
    pub fuel_type: Option<String>,

    #[validate(length(max = 50))]
    pub transmission: Option<String>,

    #[validate(length(max = 100))]
    pub engine: Option<String>,

    #[validate(length(max = 50))]
    pub drivetrain: Option<String>,

    #[validate(length(max = 50))]
    pub exterior_color: Option<String>,

    #[validate(length(max = 50))]
    pub interior_color: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,

    // Referencias (URLs) a imágenes ya subidas; el manejo de archivos queda fuera
    #[serde(default)]
    pub images: Vec<String>,

    pub status: Option<CarStatus>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(max = 100))]
    pub trim: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_price")]
    pub price: Option<Decimal>,

    #[validate(regex = "VIN_RE")]
    pub vin: Option<String>,

    pub condition: Option<CarCondition>,

    #[validate(length(max = 50))]
    pub fuel_type: Option<String>,

    #[validate(length(max = 50))]
    pub transmission: Option<String>,

    #[validate(length(max = 100))]
    pub engine: Option<String>,

    #[validate(length(max = 50))]
    pub drivetrain: Option<String>,

    #[validate(length(max = 50))]
    pub exterior_color: Option<String>,

    #[validate(length(max = 50))]
    pub interior_color: Option<String>,

    pub features: Option<Vec<String>>,

    pub images: Option<Vec<String>>,

    pub status: Option<CarStatus>,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub mileage: i32,
    pub price: Decimal,
    pub vin: String,
    pub condition: CarCondition,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub drivetrain: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            dealership_id: car.dealership_id,
            make: car.make,
            model: car.model,
            year: car.year,
            trim: car.trim,
            mileage: car.mileage,
            price: car.price,
            vin: car.vin,
            condition: car.condition,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            engine: car.engine,
            drivetrain: car.drivetrain,
            exterior_color: car.exterior_color,
            interior_color: car.interior_color,
            features: car.features,
            images: car.images,
            status: car.status,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

/// Response de vehículos para listados paginados
#[derive(Debug, Serialize)]
pub struct CarListResponse {
    pub cars: Vec<CarResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Filtros para búsqueda de vehículos en la consola admin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilters {
    pub status: Option<String>,
    pub condition: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request de carga masiva de vehículos
#[derive(Debug, Deserialize)]
pub struct BulkUploadRequest {
    pub cars: Vec<CreateCarRequest>,
}

/// Resultado por ítem de la carga masiva
#[derive(Debug, Serialize)]
pub struct BulkUploadItemReport {
    pub index: usize,
    pub vin: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response de la carga masiva: las fallas por ítem no abortan el lote
#[derive(Debug, Serialize)]
pub struct BulkUploadResponse {
    pub total: usize,
    pub created: usize,
    pub failed: usize,
    pub results: Vec<BulkUploadItemReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateCarRequest {
        CreateCarRequest {
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            year: 2023,
            trim: Some("EX".to_string()),
            mileage: Some(12000),
            price: Decimal::new(2850000, 2),
            vin: "1HGCM82633A004352".to_string(),
            condition: CarCondition::Used,
            fuel_type: Some("gasoline".to_string()),
            transmission: Some("automatic".to_string()),
            engine: None,
            drivetrain: Some("fwd".to_string()),
            exterior_color: Some("white".to_string()),
            interior_color: Some("black".to_string()),
            features: vec!["sunroof".to_string()],
            images: vec![],
            status: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_vin_must_have_17_valid_chars() {
        let mut request = base_request();
        request.vin = "SHORT".to_string();
        assert!(request.validate().is_err());

        request.vin = "1HGCM82633A00435Q".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_year_out_of_range_fails() {
        let mut request = base_request();
        request.year = 1850;
        assert!(request.validate().is_err());

        request.year = 2031;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_price_fails() {
        let mut request = base_request();
        request.price = Decimal::new(-100, 0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_mileage_fails() {
        let mut request = base_request();
        request.mileage = Some(-1);
        assert!(request.validate().is_err());
    }
}
