//! Modelo de Car
//!
//! Este módulo contiene el struct Car y sus enums para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Condición del vehículo - mapea al ENUM car_condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "car_condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarCondition {
    New,
    Used,
    // "certified-pre-owned" se acepta como alias en deserialización
    #[serde(alias = "certified-pre-owned")]
    Certified,
}

impl FromStr for CarCondition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(CarCondition::New),
            "used" => Ok(CarCondition::Used),
            "certified" | "certified-pre-owned" => Ok(CarCondition::Certified),
            other => Err(AppError::BadRequest(format!(
                "Condición de vehículo inválida: '{}'",
                other
            ))),
        }
    }
}

/// Estado del vehículo - mapea al ENUM car_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "car_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    #[default]
    Active,
    Sold,
    Reserved,
    Pending,
}

impl FromStr for CarStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CarStatus::Active),
            "sold" => Ok(CarStatus::Sold),
            "reserved" => Ok(CarStatus::Reserved),
            "pending" => Ok(CarStatus::Pending),
            other => Err(AppError::BadRequest(format!(
                "Estado de vehículo inválido: '{}'",
                other
            ))),
        }
    }
}

/// Car principal - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_str_accepts_both_spellings() {
        assert_eq!("certified".parse::<CarCondition>().unwrap(), CarCondition::Certified);
        assert_eq!(
            "certified-pre-owned".parse::<CarCondition>().unwrap(),
            CarCondition::Certified
        );
        assert!("mint".parse::<CarCondition>().is_err());
    }

    #[test]
    fn test_condition_serde_alias() {
        let parsed: CarCondition = serde_json::from_str("\"certified-pre-owned\"").unwrap();
        assert_eq!(parsed, CarCondition::Certified);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"certified\"");
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(CarStatus::default(), CarStatus::Active);
        assert_eq!("sold".parse::<CarStatus>().unwrap(), CarStatus::Sold);
        assert!("scrapped".parse::<CarStatus>().is_err());
    }
}
