use crate::ingest::IngestError;
use crate::spreadsheets::ExportError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, request limits) or the conversion layers below it.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::PayloadTooLarge(_) => 413,
            ServerError::Ingest(IngestError::Expand { .. }) => 422,
            ServerError::Ingest(_) => 400,
            ServerError::Export(ExportError::UnknownMode(_))
            | ServerError::Export(ExportError::InvalidChunkSize) => 400,
            ServerError::Export(_) => 500,
            ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
