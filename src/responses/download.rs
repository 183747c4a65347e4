// responses/download.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use crate::spreadsheets::ExportArtifact;
use astra::{Body, ResponseBuilder};

/// Return an export artifact (xlsx or zip) as a file download
pub fn download_response(artifact: ExportArtifact) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", artifact.content_type())
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", artifact.file_name),
        )
        .header("Content-Length", artifact.payload.len())
        .body(Body::from(artifact.payload))
        .map_err(|_| ServerError::InternalError)?; // Convert any builder error

    Ok(resp)
}
