use crate::db::connection::Database;
use crate::router::handle;
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn seed(db: &Database) {
    let body = r#"[
        {"customerName": "Ayse", "webFormNote": "Model Sanayi Merkezi projesi", "assignedPersonnel": "Ali", "status": "Satıldı", "requestDate": "2024-01-15"},
        {"customerName": "Mehmet", "webFormNote": "kuyum proje hakkında bilgi", "assignedPersonnel": "Zeynep", "status": "open", "requestDate": "2024-02-01"},
        {"customerName": "Deniz", "projectName": "Park Evleri", "assignedPersonnel": "Ali", "status": "open", "requestDate": "N/A"}
    ]"#;
    crate::imports::import_leads_json(db, body.as_bytes()).expect("seed import failed");
}

fn get(db: &Database, uri: &str) -> (u16, String) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, db, &test_config()).expect("Handler failed");
    let status = resp.status().as_u16();

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    (status, body)
}

#[test]
fn dashboard_loads_with_empty_database() {
    let db = init_test_db();

    let (status, body) = get(&db, "/");

    assert_eq!(status, 200);
    assert!(body.contains("Lead Dashboard"));
    assert!(body.contains("Model Kuyum Merkezi"));
    assert!(body.contains("Model Sanayi Merkezi"));
}

#[test]
fn dashboard_lists_filter_options_from_data() {
    let db = init_test_db();
    seed(&db);

    let (status, body) = get(&db, "/");

    assert_eq!(status, 200);
    assert!(body.contains("Park Evleri"));
    assert!(body.contains("Zeynep"));
    assert!(body.contains("Found <strong>3</strong> leads."));
}

#[test]
fn dashboard_applies_query_filters() {
    let db = init_test_db();
    seed(&db);

    let (status, body) = get(&db, "/?salesperson=Ali&status=open");

    assert_eq!(status, 200);
    assert!(body.contains("Found <strong>1</strong> leads."));
    assert!(body.contains("Deniz"));
    assert!(!body.contains("Mehmet"));
    assert!(body.contains("/export.xlsx?salesperson=Ali&amp;status=open"));
}

#[test]
fn reset_ignores_query_filters() {
    let db = init_test_db();
    seed(&db);

    let (_, body) = get(&db, "/?status=open&reset=1");

    assert!(body.contains("Found <strong>3</strong> leads."));
}

#[test]
fn unknown_route_is_not_found() {
    let db = init_test_db();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/nope")
        .body(Body::empty())
        .unwrap();

    let err = handle(req, &db, &test_config()).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::NotFound));
}
