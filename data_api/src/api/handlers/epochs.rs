use crate::api::error::ApiError;
use crate::api::format::epoch_listing;
use crate::state::DatasetStore;
use axum::Json;
use axum::extract::{Path, State};
use shared::iss::StateVectorView;
use tracing::info;

pub async fn list_epochs(State(store): State<DatasetStore>) -> Result<String, ApiError> {
    info!("querying all epochs");
    let datasets = store.snapshot()?;
    Ok(epoch_listing(datasets.list_epochs()))
}

pub async fn get_epoch(
    State(store): State<DatasetStore>,
    Path(epoch): Path<String>,
) -> Result<Json<StateVectorView>, ApiError> {
    info!(epoch, "querying position and velocity for epoch");
    let datasets = store.snapshot()?;
    let record = datasets.get_epoch(&epoch)?;
    Ok(Json(record.state_vector()))
}
