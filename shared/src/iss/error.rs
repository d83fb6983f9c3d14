use std::path::PathBuf;
use thiserror::Error;

/// A single XML document could not be turned into a dataset.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unexpected document structure: {0}")]
    Deserialize(#[from] quick_xml::de::DeError),
    #[error("expected root element <{expected}> but found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    #[error("{component} of epoch {epoch} is not a finite number")]
    NonFinite {
        epoch: String,
        component: &'static str,
    },
    #[error("document has no root element")]
    Empty,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
    #[error("ingest task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("epoch {0} not found")]
    NotFound(String),
    #[error("data has not been loaded")]
    NotLoaded,
}
