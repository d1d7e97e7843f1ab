//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que complementan las reglas declarativas de los DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// VIN: 17 caracteres, sin I/O/Q (estándar ISO 3779)
    pub static ref VIN_RE: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Plataformas sociales soportadas por el publicador
pub const SOCIAL_PLATFORMS: [&str; 4] = ["facebook", "instagram", "twitter", "linkedin"];

/// Validar formato de VIN
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    if !VIN_RE.is_match(value) {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"17 characters, no I/O/Q".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_digit(10)).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un precio no sea negativo
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que la plataforma esté en la lista de plataformas soportadas
pub fn validate_social_platform(value: &str) -> Result<(), ValidationError> {
    if !SOCIAL_PLATFORMS.contains(&value) {
        let mut error = ValidationError::new("platform");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &format!("{:?}", SOCIAL_PLATFORMS));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vin() {
        assert!(validate_vin("1HGCM82633A004352").is_ok());
        assert!(validate_vin("5YJSA1E26MF123456").is_ok());

        // Demasiado corto
        assert!(validate_vin("1HGCM82633A00435").is_err());
        // Demasiado largo
        assert!(validate_vin("1HGCM82633A0043521").is_err());
        // Contiene letras prohibidas (I, O, Q)
        assert!(validate_vin("1HGCM82633A00435I").is_err());
        assert!(validate_vin("OHGCM82633A004352").is_err());
        // Minúsculas no permitidas
        assert!(validate_vin("1hgcm82633a004352").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("+34 600 123 456").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::new(2500000, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert!(validate_price(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(5).is_ok());
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(-5).is_err());
    }

    #[test]
    fn test_validate_social_platform() {
        assert!(validate_social_platform("instagram").is_ok());
        assert!(validate_social_platform("myspace").is_err());
    }
}
