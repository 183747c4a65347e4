use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::ingest::IngestError;
use crate::router::handle;
use crate::spreadsheets::ExportError;
use crate::templates::html_error_response;
use crate::tests::utils::{expect_err, price_upload, sheet_rows, zip_entries};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn convert_request(query: &str, upload: Vec<u8>) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/convert?{query}"))
        .header("Content-Type", "application/octet-stream")
        .body(Body::from(upload))
        .unwrap()
}

fn body_bytes(resp: astra::Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    bytes
}

fn header(resp: &astra::Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[test]
fn single_file_download() {
    let upload = price_upload(&[(42.0, "100.00", "2022-12-01", "2022-12-31")]);
    let resp = handle(convert_request("mode=single", upload), &AppConfig::default())
        .expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        header(&resp, "Content-Disposition"),
        r#"attachment; filename="output_all.xlsx""#
    );
    assert!(header(&resp, "Content-Type").contains("spreadsheetml"));

    let rows = sheet_rows(&body_bytes(resp));
    assert_eq!(rows.len(), 31);
}

#[test]
fn label_from_the_form_is_accepted() {
    let upload = price_upload(&[
        (1.0, "10.00", "2023-01-01", "2023-01-03"),
        (2.0, "10.00", "2023-01-01", "2023-01-03"),
    ]);
    let resp = handle(
        convert_request("mode=1+file+per+id+detail", upload),
        &AppConfig::default(),
    )
    .expect("Handler failed");

    assert_eq!(header(&resp, "Content-Type"), "application/zip");
    assert_eq!(
        header(&resp, "Content-Disposition"),
        r#"attachment; filename="files_by_id.zip""#
    );

    let entries = zip_entries(&body_bytes(resp));
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["1.xlsx", "2.xlsx"]);
}

#[test]
fn chunk_size_comes_from_query_or_config() {
    let lines = [(1.0, "31.00", "2023-01-01", "2023-02-01")];

    let resp = handle(
        convert_request("mode=by-count&rows=10", price_upload(&lines)),
        &AppConfig::default(),
    )
    .expect("Handler failed");
    assert_eq!(
        header(&resp, "Content-Disposition"),
        r#"attachment; filename="files_by_10.zip""#
    );
    assert_eq!(zip_entries(&body_bytes(resp)).len(), 4);

    let cfg = AppConfig {
        chunk_rows: 20,
        ..AppConfig::default()
    };
    let resp = handle(convert_request("mode=by-count", price_upload(&lines)), &cfg)
        .expect("Handler failed");
    assert_eq!(zip_entries(&body_bytes(resp)).len(), 2);
}

#[test]
fn unknown_or_missing_mode_is_a_bad_request() {
    let upload = price_upload(&[(1.0, "10.00", "2023-01-01", "2023-01-03")]);
    let req = convert_request("mode=weekly", upload.clone());
    let err = expect_err(handle(req, &AppConfig::default()));
    assert!(matches!(err, ServerError::Export(ExportError::UnknownMode(_))));
    assert_eq!(err.status(), 400);

    let req = convert_request("", upload);
    let err = expect_err(handle(req, &AppConfig::default()));
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn invalid_range_is_unprocessable() {
    let upload = price_upload(&[(1.0, "10.00", "2023-01-03", "2023-01-01")]);
    let req = convert_request("mode=single", upload);
    let err = expect_err(handle(req, &AppConfig::default()));

    assert!(matches!(err, ServerError::Ingest(IngestError::Expand { row: 2, .. })));
    assert_eq!(err.status(), 422);

    let resp = html_error_response(err);
    assert_eq!(resp.status(), 422);
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains("row 2: invalid date range"));
}

#[test]
fn oversized_and_empty_uploads_are_rejected() {
    let upload = price_upload(&[(1.0, "10.00", "2023-01-01", "2023-01-03")]);
    let cfg = AppConfig {
        max_upload_bytes: 64,
        ..AppConfig::default()
    };
    let err = expect_err(handle(convert_request("mode=single", upload), &cfg));
    assert!(matches!(err, ServerError::PayloadTooLarge(64)));
    assert_eq!(err.status(), 413);

    let req = convert_request("mode=single", Vec::new());
    let err = expect_err(handle(req, &AppConfig::default()));
    assert!(matches!(err, ServerError::BadRequest(_)));
}
