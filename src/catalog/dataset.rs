//! Dataset estático del storefront
//!
//! Catálogo embebido en el binario con la forma
//! `{featuredCars, allCars, makes, conditions, fuelTypes, searchSuggestions}`.
//! Se parsea una sola vez al primer acceso.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::car::CarCondition;

/// Auto del catálogo estático. El `id` numérico crece con cada ingreso y
/// funciona como proxy de recencia para el orden "newest".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCar {
    pub id: u32,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub trim: Option<String>,
    pub mileage: i64,
    pub price: Decimal,
    pub condition: CarCondition,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Documento completo del catálogo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontDataset {
    pub featured_cars: Vec<CatalogCar>,
    pub all_cars: Vec<CatalogCar>,
    pub makes: Vec<String>,
    pub conditions: Vec<String>,
    pub fuel_types: Vec<String>,
    pub search_suggestions: Vec<String>,
}

lazy_static! {
    static ref DATASET: StorefrontDataset =
        serde_json::from_str(include_str!("../../data/cars.json"))
            .expect("data/cars.json embebido inválido");

    // Destacados primero, igual que la página de búsqueda original
    static ref COMBINED: Vec<CatalogCar> = {
        let mut cars = DATASET.featured_cars.clone();
        cars.extend(DATASET.all_cars.iter().cloned());
        cars
    };
}

/// Dataset completo del storefront
pub fn storefront() -> &'static StorefrontDataset {
    &DATASET
}

/// Catálogo combinado (destacados + resto) sobre el que corre la búsqueda
pub fn combined_cars() -> &'static [CatalogCar] {
    &COMBINED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let dataset = storefront();
        assert!(!dataset.featured_cars.is_empty());
        assert!(!dataset.all_cars.is_empty());
        assert!(!dataset.makes.is_empty());
        assert!(!dataset.conditions.is_empty());
        assert!(!dataset.fuel_types.is_empty());
        assert!(!dataset.search_suggestions.is_empty());
    }

    #[test]
    fn test_combined_is_featured_plus_rest() {
        let dataset = storefront();
        assert_eq!(
            combined_cars().len(),
            dataset.featured_cars.len() + dataset.all_cars.len()
        );
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<u32> = combined_cars().iter().map(|c| c.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_catalog_invariants() {
        for car in combined_cars() {
            assert!(car.price >= Decimal::ZERO, "precio negativo en id {}", car.id);
            assert!(car.mileage >= 0, "kilometraje negativo en id {}", car.id);
            assert!((1900..=2030).contains(&car.year), "año fuera de rango en id {}", car.id);
        }
    }

    #[test]
    fn test_every_catalog_make_is_listed() {
        let dataset = storefront();
        for car in combined_cars() {
            assert!(
                dataset.makes.contains(&car.make),
                "la marca '{}' no está en makes",
                car.make
            );
        }
    }
}
