pub mod epochs;
pub mod sightings;

use crate::api::error::ApiError;
use crate::api::format::{LOAD_CONFIRMATION, help_text};
use crate::state::DatasetStore;
use axum::extract::State;
use shared::DataConfig;
use tracing::info;

pub async fn help() -> String {
    info!("how to interact with the application");
    help_text()
}

pub async fn load_data(
    State(store): State<DatasetStore>,
    State(sources): State<DataConfig>,
) -> Result<&'static str, ApiError> {
    info!(
        positions = %sources.positions_path.display(),
        sightings = %sources.sightings_path.display(),
        "loading data from files"
    );
    store.reload(&sources).await?;
    Ok(LOAD_CONFIRMATION)
}
