use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export mode '{0}' (expected single, by-id or by-count)")]
    UnknownMode(String),

    #[error("chunk size must be at least one row")]
    InvalidChunkSize,

    #[error("spreadsheet error: {0}")]
    Xlsx(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),
}
