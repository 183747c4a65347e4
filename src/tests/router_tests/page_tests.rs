use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{expect_err, price_upload};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn home_page_offers_the_three_options() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &AppConfig::default()).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("iddetail, prixperiode, datedebut, datefin"));
    assert!(body.contains("1 file per id detail"));
    assert!(body.contains("1 file per 1000 lines"));
    assert!(body.contains(r#"value="by-count""#));
}

#[test]
fn preview_shows_totals_and_first_rows() {
    let upload = price_upload(&[(42.0, "100.00", "2022-12-01", "2022-12-31")]);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/preview")
        .body(Body::from(upload))
        .unwrap();

    let resp = handle(req, &AppConfig::default()).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<strong>30</strong> daily lines"));
    assert!(body.contains("100.00"));
    assert!(body.contains("2022-12-01"));
    assert!(body.contains("20 more lines"));
    // A fragment, not a full page.
    assert!(!body.contains("<html"));
}

#[test]
fn preview_reports_missing_columns_inline() {
    let upload = crate::tests::utils::input_workbook(&["iddetail", "prixperiode"], &[]);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/preview")
        .body(Body::from(upload))
        .unwrap();

    let resp = handle(req, &AppConfig::default()).expect("Failed to handle request");
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("missing required columns: datedebut, datefin"));
}

#[test]
fn unknown_route_is_not_found() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .body(Body::empty())
        .unwrap();

    let err = expect_err(handle(req, &AppConfig::default()));
    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(err.status(), 404);
}
