use axum::extract::FromRef;
use parking_lot::RwLock;
use shared::DataConfig;
use shared::iss::{Datasets, IngestError, QueryError, load_datasets};
use std::sync::Arc;
use tracing::info;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub datasets: DatasetStore,
    pub sources: DataConfig,
}

impl AppState {
    pub fn new(sources: DataConfig) -> Self {
        Self {
            datasets: DatasetStore::default(),
            sources,
        }
    }
}

/// Holds the current dataset generation. Readers clone the `Arc` and drop the lock
/// immediately, so a reload never blocks on in-flight queries and never exposes a
/// half-built generation.
#[derive(Clone, Default)]
pub struct DatasetStore {
    current: Arc<RwLock<Option<Arc<Datasets>>>>,
}

impl DatasetStore {
    pub fn snapshot(&self) -> Result<Arc<Datasets>, QueryError> {
        self.current.read().clone().ok_or(QueryError::NotLoaded)
    }

    pub fn publish(&self, datasets: Datasets) -> Arc<Datasets> {
        let datasets = Arc::new(datasets);
        *self.current.write() = Some(Arc::clone(&datasets));
        datasets
    }

    /// Loads both source files and publishes them as the new generation. On failure
    /// the previous generation, if any, stays in place.
    pub async fn reload(&self, sources: &DataConfig) -> Result<Arc<Datasets>, IngestError> {
        let datasets = load_datasets(&sources.positions_path, &sources.sightings_path).await?;
        info!(
            epochs = datasets.positions.len(),
            sightings = datasets.sightings.len(),
            "published new dataset generation"
        );
        Ok(self.publish(datasets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_store_is_not_loaded() {
        let store = DatasetStore::default();
        assert_eq!(store.snapshot().err(), Some(QueryError::NotLoaded));
    }

    #[test]
    fn snapshot_outlives_publish() {
        let store = DatasetStore::default();
        store.publish(Datasets::default());
        let old = store.snapshot().unwrap();
        store.publish(Datasets::default());
        let new = store.snapshot().unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(old.positions.len(), 0);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_generation() {
        let store = DatasetStore::default();
        let published = store.publish(Datasets::default());
        let sources = DataConfig {
            positions_path: PathBuf::from("/nonexistent/positions.xml"),
            sightings_path: PathBuf::from("/nonexistent/sightings.xml"),
            load_on_startup: false,
        };
        assert!(store.reload(&sources).await.is_err());
        assert!(Arc::ptr_eq(&published, &store.snapshot().unwrap()));
    }
}
