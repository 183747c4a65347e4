pub mod daily_rows_xlsx;
pub mod export;
mod export_error;

pub use export::{export, partition, ExportArtifact, ExportMode, DEFAULT_CHUNK_ROWS};
pub use export_error::ExportError;
