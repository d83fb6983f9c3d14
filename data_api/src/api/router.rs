use crate::api::handlers::epochs::{get_epoch, list_epochs};
use crate::api::handlers::sightings::{
    city_sightings, count_cities, count_countries, count_regions, country_sightings,
    region_sightings,
};
use crate::api::handlers::{help, load_data};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(help))
        .route("/load_data", post(load_data))
        .route("/epochs", get(list_epochs))
        .route("/epochs/{epoch}", get(get_epoch))
        .route("/countries", get(count_countries))
        .route("/countries/{country}", get(country_sightings))
        .route("/countries/{country}/regions", get(count_regions))
        .route("/countries/{country}/regions/{region}", get(region_sightings))
        .route(
            "/countries/{country}/regions/{region}/cities",
            get(count_cities),
        )
        .route(
            "/countries/{country}/regions/{region}/cities/{city}",
            get(city_sightings),
        )
        .with_state(state)
}
