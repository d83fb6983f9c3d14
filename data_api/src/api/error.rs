use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};
use shared::iss::{IngestError, QueryError};
use thiserror::Error;
use tracing::warn;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Query(QueryError::NotFound(epoch)) => {
                warn!(epoch, "epoch not found");
                ErrorMessage::from((StatusCode::NOT_FOUND, format!("epoch {epoch} not found")))
                    .into_response()
            }
            ApiError::Query(QueryError::NotLoaded) => {
                warn!("query before data was loaded");
                ErrorMessage::from((
                    StatusCode::CONFLICT,
                    "data has not been loaded, POST /load_data first",
                ))
                .into_response()
            }
            ApiError::Ingest(e) => {
                warn!(error = ?e, "failed to load data");
                ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
                    .into_response()
            }
            ApiError::Serialize(e) => {
                warn!(error = ?e, "failed to serialize response");
                ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "internal server error"))
                    .into_response()
            }
        }
    }
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, String)) -> Self {
        Self {
            status_code,
            message,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, &str)) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
