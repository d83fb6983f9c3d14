use crate::api::error::ApiError;
use crate::api::format::pretty_json;
use crate::state::DatasetStore;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use shared::iss::CountMap;
use tracing::info;

pub async fn count_countries(State(store): State<DatasetStore>) -> Result<Json<CountMap>, ApiError> {
    info!("querying all countries");
    let datasets = store.snapshot()?;
    Ok(Json(datasets.count_countries()))
}

pub async fn country_sightings(
    State(store): State<DatasetStore>,
    Path(country): Path<String>,
) -> Result<Response, ApiError> {
    info!(country, "querying sightings for country");
    let datasets = store.snapshot()?;
    pretty_json(&datasets.filter_by_country(&country))
}

pub async fn count_regions(
    State(store): State<DatasetStore>,
    Path(country): Path<String>,
) -> Result<Json<CountMap>, ApiError> {
    info!(country, "querying regions in country");
    let datasets = store.snapshot()?;
    Ok(Json(datasets.count_regions(&country)))
}

pub async fn region_sightings(
    State(store): State<DatasetStore>,
    Path((country, region)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    info!(country, region, "querying sightings for region");
    let datasets = store.snapshot()?;
    pretty_json(&datasets.filter_by_region(&country, &region))
}

pub async fn count_cities(
    State(store): State<DatasetStore>,
    Path((country, region)): Path<(String, String)>,
) -> Result<Json<CountMap>, ApiError> {
    info!(country, region, "querying cities in region");
    let datasets = store.snapshot()?;
    Ok(Json(datasets.count_cities(&country, &region)))
}

pub async fn city_sightings(
    State(store): State<DatasetStore>,
    Path((country, region, city)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    info!(country, region, city, "querying sightings for city");
    let datasets = store.snapshot()?;
    pretty_json(&datasets.filter_by_city(&country, &region, &city))
}
