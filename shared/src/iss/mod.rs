//! ISS ephemeris and sighting datasets: the typed records, the XML ingest step that
//! produces them, and the hierarchical queries served over them.

pub mod error;
pub mod index;
pub mod ingest;
pub mod model;
pub mod query;

pub use error::{DocumentError, IngestError, QueryError};
pub use ingest::{load_datasets, parse_positions, parse_sightings};
pub use model::{
    Datasets, PositionDataset, PositionRecord, SightingDataset, SightingRecord, StateVectorView,
    Vector3,
};
pub use query::{CountMap, SightingView};
