use thiserror::Error;

#[derive(Debug, Error)]
pub enum MainError {
    #[error(transparent)]
    Init(#[from] shared::error::InitializationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
