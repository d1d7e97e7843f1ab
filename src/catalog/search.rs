//! Pipeline de búsqueda del storefront
//!
//! Filtrado, ordenamiento y paginación del catálogo estático. Función pura
//! de (colección, filtros, orden, página): sin efectos, segura de re-ejecutar
//! en cada cambio de criterio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::dataset::CatalogCar;
use crate::models::car::CarCondition;
use crate::utils::errors::AppError;

/// Tamaño de página fijo del storefront
pub const CARS_PER_PAGE: usize = 12;

/// Criterios de ordenamiento soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    MileageLow,
    MileageHigh,
    YearNew,
    YearOld,
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortBy::Newest),
            "price-low" => Ok(SortBy::PriceLow),
            "price-high" => Ok(SortBy::PriceHigh),
            "mileage-low" => Ok(SortBy::MileageLow),
            "mileage-high" => Ok(SortBy::MileageHigh),
            "year-new" => Ok(SortBy::YearNew),
            "year-old" => Ok(SortBy::YearOld),
            other => Err(AppError::BadRequest(format!(
                "Criterio de orden inválido: '{}'",
                other
            ))),
        }
    }
}

/// Filtros de búsqueda. Campo ausente = sin restricción; todos los
/// predicados activos se combinan con AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub condition: Option<CarCondition>,
    pub mileage_min: Option<i64>,
    pub mileage_max: Option<i64>,
    pub fuel_type: Option<String>,
}

impl SearchFilters {
    pub fn matches(&self, car: &CatalogCar) -> bool {
        if let Some(min) = self.price_min {
            if car.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if car.price > max {
                return false;
            }
        }
        if let Some(make) = &self.make {
            if car.make != *make {
                return false;
            }
        }
        if let Some(model) = &self.model {
            if car.model != *model {
                return false;
            }
        }
        if let Some(year) = self.year {
            if car.year != year {
                return false;
            }
        }
        if let Some(condition) = self.condition {
            if car.condition != condition {
                return false;
            }
        }
        if let Some(min) = self.mileage_min {
            if car.mileage < min {
                return false;
            }
        }
        if let Some(max) = self.mileage_max {
            if car.mileage > max {
                return false;
            }
        }
        if let Some(fuel_type) = &self.fuel_type {
            if car.fuel_type.as_deref() != Some(fuel_type.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Una página de resultados más el total de la búsqueda
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub cars: Vec<CatalogCar>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

/// Estado de búsqueda del storefront: cambiar filtros u orden vuelve
/// siempre a la página 1.
#[derive(Debug, Clone, Default)]
pub struct CatalogSearch {
    filters: SearchFilters,
    sort_by: SortBy,
    page: usize,
}

impl CatalogSearch {
    pub fn new() -> Self {
        Self {
            filters: SearchFilters::default(),
            sort_by: SortBy::default(),
            page: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        if filters != self.filters {
            self.page = 1;
        }
        self.filters = filters;
    }

    pub fn set_sort(&mut self, sort_by: SortBy) {
        if sort_by != self.sort_by {
            self.page = 1;
        }
        self.sort_by = sort_by;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Ejecutar el pipeline: filtrar, ordenar (estable) y paginar.
    pub fn run(&self, cars: &[CatalogCar]) -> SearchPage {
        let mut matched: Vec<&CatalogCar> =
            cars.iter().filter(|car| self.filters.matches(car)).collect();

        // sort_by de Rust es estable: claves iguales conservan el orden
        // de entrada y la salida es determinista
        match self.sort_by {
            SortBy::Newest => matched.sort_by(|a, b| b.id.cmp(&a.id)),
            SortBy::PriceLow => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortBy::PriceHigh => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortBy::MileageLow => matched.sort_by(|a, b| a.mileage.cmp(&b.mileage)),
            SortBy::MileageHigh => matched.sort_by(|a, b| b.mileage.cmp(&a.mileage)),
            SortBy::YearNew => matched.sort_by(|a, b| b.year.cmp(&a.year)),
            SortBy::YearOld => matched.sort_by(|a, b| a.year.cmp(&b.year)),
        }

        let total = matched.len();
        let total_pages = if total == 0 {
            1
        } else {
            (total + CARS_PER_PAGE - 1) / CARS_PER_PAGE
        };

        // Una página fuera de rango se ajusta a la última válida
        let page = self.page().min(total_pages);
        let start = (page - 1) * CARS_PER_PAGE;

        let cars = matched
            .into_iter()
            .skip(start)
            .take(CARS_PER_PAGE)
            .cloned()
            .collect();

        SearchPage {
            cars,
            total,
            page,
            total_pages,
            page_size: CARS_PER_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: u32, make: &str, year: i32, price: i64, mileage: i64, condition: CarCondition) -> CatalogCar {
        CatalogCar {
            id,
            make: make.to_string(),
            model: format!("Model-{}", id),
            year,
            trim: None,
            mileage,
            price: Decimal::new(price, 0),
            condition,
            fuel_type: Some(if id % 3 == 0 { "electric" } else { "gasoline" }.to_string()),
            transmission: Some("automatic".to_string()),
            image: None,
            features: vec![],
        }
    }

    fn fixture() -> Vec<CatalogCar> {
        (1..=30)
            .map(|id| {
                let condition = match id % 3 {
                    0 => CarCondition::New,
                    1 => CarCondition::Used,
                    _ => CarCondition::Certified,
                };
                car(
                    id,
                    if id % 2 == 0 { "BMW" } else { "Toyota" },
                    2015 + (id as i32 % 10),
                    20_000 + (id as i64 * 1_000) % 45_000,
                    (id as i64 * 7_919) % 90_000,
                    condition,
                )
            })
            .collect()
    }

    fn all_pages(search: &mut CatalogSearch, cars: &[CatalogCar]) -> Vec<CatalogCar> {
        let first = search.run(cars);
        let mut collected = first.cars.clone();
        for page in 2..=first.total_pages {
            search.set_page(page);
            collected.extend(search.run(cars).cars);
        }
        collected
    }

    #[test]
    fn test_every_result_satisfies_all_active_predicates() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_filters(SearchFilters {
            price_min: Some(Decimal::new(25_000, 0)),
            price_max: Some(Decimal::new(55_000, 0)),
            make: Some("BMW".to_string()),
            condition: Some(CarCondition::Used),
            mileage_min: Some(1_000),
            mileage_max: Some(80_000),
            ..Default::default()
        });

        let results = all_pages(&mut search, &cars);
        for car in &results {
            assert!(car.price >= Decimal::new(25_000, 0) && car.price <= Decimal::new(55_000, 0));
            assert_eq!(car.make, "BMW");
            assert_eq!(car.condition, CarCondition::Used);
            assert!(car.mileage >= 1_000 && car.mileage <= 80_000);
        }
    }

    #[test]
    fn test_model_and_fuel_filters_are_conjunctive() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_filters(SearchFilters {
            model: Some("Model-6".to_string()),
            fuel_type: Some("electric".to_string()),
            ..Default::default()
        });

        let page = search.run(&cars);
        assert_eq!(page.total, 1);
        assert_eq!(page.cars[0].id, 6);
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        let page = search.run(&cars);
        assert_eq!(page.total, cars.len());
        assert_eq!(page.cars.len(), CARS_PER_PAGE);
    }

    #[test]
    fn test_default_sort_is_descending_id() {
        let cars = fixture();
        let search = CatalogSearch::new();
        let page = search.run(&cars);
        let ids: Vec<u32> = page.cars.iter().map(|c| c.id).collect();
        assert_eq!(ids[0], 30);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_price_low_is_globally_non_decreasing() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::PriceLow);
        let collected = all_pages(&mut search, &cars);
        assert_eq!(collected.len(), cars.len());
        assert!(collected.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_price_high_is_globally_non_increasing() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::PriceHigh);
        let collected = all_pages(&mut search, &cars);
        assert!(collected.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_mileage_and_year_sorts() {
        let cars = fixture();

        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::MileageLow);
        let collected = all_pages(&mut search, &cars);
        assert!(collected.windows(2).all(|w| w[0].mileage <= w[1].mileage));

        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::MileageHigh);
        let collected = all_pages(&mut search, &cars);
        assert!(collected.windows(2).all(|w| w[0].mileage >= w[1].mileage));

        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::YearNew);
        let collected = all_pages(&mut search, &cars);
        assert!(collected.windows(2).all(|w| w[0].year >= w[1].year));

        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::YearOld);
        let collected = all_pages(&mut search, &cars);
        assert!(collected.windows(2).all(|w| w[0].year <= w[1].year));
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let cars = vec![
            car(1, "BMW", 2020, 30_000, 100, CarCondition::New),
            car(2, "BMW", 2021, 30_000, 200, CarCondition::New),
            car(3, "BMW", 2022, 30_000, 300, CarCondition::New),
        ];
        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::PriceLow);
        let page = search.run(&cars);
        let ids: Vec<u32> = page.cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_partitions_the_sorted_set() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_sort(SortBy::PriceLow);

        let first = search.run(&cars);
        assert_eq!(first.total_pages, 3); // 30 autos, páginas de 12
        assert_eq!(first.cars.len(), 12);

        let collected = all_pages(&mut search, &cars);
        assert_eq!(collected.len(), cars.len());

        // Cada auto aparece exactamente una vez
        let mut ids: Vec<u32> = collected.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cars.len());
    }

    #[test]
    fn test_changing_filters_resets_page() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_page(3);
        assert_eq!(search.run(&cars).page, 3);

        search.set_filters(SearchFilters {
            make: Some("BMW".to_string()),
            ..Default::default()
        });
        assert_eq!(search.run(&cars).page, 1);
    }

    #[test]
    fn test_changing_sort_resets_page() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_page(2);
        search.set_sort(SortBy::YearOld);
        assert_eq!(search.run(&cars).page, 1);
    }

    #[test]
    fn test_setting_same_values_keeps_page() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_page(2);
        search.set_filters(SearchFilters::default());
        search.set_sort(SortBy::Newest);
        assert_eq!(search.run(&cars).page, 2);
    }

    #[test]
    fn test_page_beyond_total_clamps_to_last() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_page(99);
        let page = search.run(&cars);
        assert_eq!(page.page, page.total_pages);
        assert!(!page.cars.is_empty());
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let cars = fixture();
        let mut search = CatalogSearch::new();
        search.set_filters(SearchFilters {
            make: Some("DeLorean".to_string()),
            ..Default::default()
        });
        let page = search.run(&cars);
        assert_eq!(page.total, 0);
        assert!(page.cars.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_sort_by_from_str() {
        assert_eq!("price-low".parse::<SortBy>().unwrap(), SortBy::PriceLow);
        assert_eq!("newest".parse::<SortBy>().unwrap(), SortBy::Newest);
        assert!("best-deal".parse::<SortBy>().is_err());
    }
}
