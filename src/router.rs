use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::ingest::convert_input_to_table;
use crate::responses::{download_response, html_response, ResultResp};
use crate::spreadsheets::{export, ExportMode};
use crate::templates::{self, pages::PreviewVm};
use astra::{Body, Request, ResponseBuilder};
use std::collections::HashMap;
use std::io::Read;

pub fn handle(req: Request, cfg: &AppConfig) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page(cfg.chunk_rows)),
        ("POST", "/preview") => preview(req, cfg),
        ("POST", "/convert") => convert(req, cfg),
        _ => Err(ServerError::NotFound),
    }
}

/// Renders the preview partial. Conversion errors are rendered inline so the
/// page can swap them in place of the table.
fn preview(req: Request, cfg: &AppConfig) -> ResultResp {
    let upload = read_upload(req, cfg.max_upload_bytes)?;

    match convert_input_to_table(&upload) {
        Ok(table) => {
            let vm = PreviewVm::from_table(&table);
            html_response(templates::pages::preview_table(&vm))
        }
        Err(e) => {
            tracing::warn!(error = %e, "preview rejected");
            let err = ServerError::from(e);
            ResponseBuilder::new()
                .status(err.status())
                .header("Content-Type", "text/html; charset=utf-8")
                .body(Body::from(templates::error_notice(&err).into_string()))
                .map_err(|_| ServerError::InternalError)
        }
    }
}

fn convert(req: Request, cfg: &AppConfig) -> ResultResp {
    let params = parse_query(&req);
    let mode = select_mode(&params, cfg)?;
    let upload = read_upload(req, cfg.max_upload_bytes)?;

    let table = convert_input_to_table(&upload)?;
    if table.is_empty() {
        tracing::warn!(%mode, "upload has no price rows, exporting headers only");
    }
    tracing::info!(%mode, rows = table.len(), "converting upload");

    // Every mode yields exactly one artifact: a workbook or an archive.
    let artifact = export(table, mode)
        .next()
        .ok_or(ServerError::InternalError)??;

    download_response(artifact)
}

fn select_mode(
    params: &HashMap<String, String>,
    cfg: &AppConfig,
) -> Result<ExportMode, ServerError> {
    let raw = params
        .get("mode")
        .ok_or_else(|| ServerError::BadRequest("Please select an option".into()))?;

    let mode = match raw.parse::<ExportMode>()? {
        ExportMode::ByRowCount(_) => {
            let rows = match params.get("rows") {
                Some(r) => r.parse::<usize>().map_err(|_| {
                    ServerError::BadRequest(format!("invalid row count '{r}'"))
                })?,
                None => cfg.chunk_rows,
            };
            ExportMode::by_row_count(rows)?
        }
        other => other,
    };

    Ok(mode)
}

/// Reads the raw request body, refusing anything over `limit` bytes.
fn read_upload(mut req: Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read upload: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge(limit));
    }
    if buf.is_empty() {
        return Err(ServerError::BadRequest("no file uploaded".into()));
    }
    Ok(buf)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
