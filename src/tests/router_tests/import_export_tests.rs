use crate::db::load_leads;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

#[test]
fn import_replaces_leads_and_reports_summary() {
    let db = init_test_db();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/leads/import")
        .body(Body::from(
            r#"[{"customerName": "Ayse", "assignedPersonnel": "Ali"}, {"status": "open"}]"#
                .to_string(),
        ))
        .unwrap();

    let resp = handle(req, &db, &test_config()).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(summary["imported"], 1);
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["sales_reps"], 1);
    assert_eq!(load_leads(&db).unwrap().len(), 1);
}

#[test]
fn import_keeps_rows_with_numeric_cells() {
    let db = init_test_db();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/leads/import")
        .body(Body::from(
            r#"[
                {"customerName": "Ayse", "phone": "05321234567"},
                {"customerName": "Can", "phone": 5321234567, "requestDate": 20240115}
            ]"#
            .to_string(),
        ))
        .unwrap();

    let resp = handle(req, &db, &test_config()).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let leads = load_leads(&db).unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[1].phone.as_deref(), Some("5321234567"));
}

#[test]
fn import_rejects_malformed_json() {
    let db = init_test_db();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/leads/import")
        .body(Body::from("not json".to_string()))
        .unwrap();

    let err = handle(req, &db, &test_config()).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(err.status(), 400);
}

#[test]
fn export_returns_xlsx_download() {
    let db = init_test_db();
    crate::imports::import_leads_json(&db, br#"[{"customerName": "Ayse", "status": "open"}]"#)
        .unwrap();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/export.xlsx?status=open")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &test_config()).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"leads_"));

    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
