//! Rutas del storefront estático
//!
//! Búsqueda pública sobre el catálogo embebido y metadatos para los
//! selectores de filtros. Sin estado: no toca la base de datos.

use axum::{extract::Query, routing::get, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::catalog::dataset::{combined_cars, storefront};
use crate::catalog::search::{CatalogSearch, SearchFilters, SearchPage, SortBy};
use crate::models::car::CarCondition;
use crate::utils::errors::{AppError, AppResult};

pub fn create_storefront_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/cars", get(search_cars))
        .route("/meta", get(storefront_meta))
}

/// Query string de la búsqueda. Los campos de texto vacíos cuentan como
/// "sin restricción", igual que el formulario original.
#[derive(Debug, Default, Deserialize)]
pub struct StorefrontQuery {
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub condition: Option<String>,
    pub mileage_min: Option<i64>,
    pub mileage_max: Option<i64>,
    pub fuel_type: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl StorefrontQuery {
    fn into_parts(self) -> Result<(SearchFilters, SortBy, usize), AppError> {
        let condition = non_empty(self.condition)
            .map(|s| s.parse::<CarCondition>())
            .transpose()?;

        let sort_by = match non_empty(self.sort_by) {
            Some(s) => s.parse::<SortBy>()?,
            None => SortBy::default(),
        };

        let filters = SearchFilters {
            price_min: self.price_min,
            price_max: self.price_max,
            make: non_empty(self.make),
            model: non_empty(self.model),
            year: self.year,
            condition,
            mileage_min: self.mileage_min,
            mileage_max: self.mileage_max,
            fuel_type: non_empty(self.fuel_type),
        };

        Ok((filters, sort_by, self.page.unwrap_or(1)))
    }
}

async fn search_cars(Query(query): Query<StorefrontQuery>) -> AppResult<Json<SearchPage>> {
    let (filters, sort_by, page) = query.into_parts()?;

    let mut search = CatalogSearch::new();
    search.set_filters(filters);
    search.set_sort(sort_by);
    search.set_page(page);

    Ok(Json(search.run(combined_cars())))
}

async fn storefront_meta() -> Json<serde_json::Value> {
    let dataset = storefront();
    Json(json!({
        "makes": dataset.makes,
        "conditions": dataset.conditions,
        "fuelTypes": dataset.fuel_types,
        "searchSuggestions": dataset.search_suggestions,
    }))
}
