use crate::db::connection::Database;
use crate::router::handle;
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;

fn seed(db: &Database) {
    let body = r#"[
        {"customerName": "A", "webFormNote": "Model Sanayi Merkezi projesi", "status": "Satıldı", "requestDate": "2024-01-15", "firstCustomerSource": "Facebook Reklam"},
        {"customerName": "B", "status": "open", "requestDate": "2024-02-01", "formCustomerSource": "instagram"},
        {"customerName": "C", "webFormNotu": "kuyum proje hakkında bilgi", "status": "open", "requestDate": "N/A"}
    ]"#;
    crate::imports::import_leads_json(db, body.as_bytes()).expect("seed import failed");
}

fn get_json(db: &Database, uri: &str) -> Value {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, db, &test_config()).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap()
}

fn names(json: &Value) -> Vec<String> {
    json["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["customerName"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn custom_range_keeps_undated_leads() {
    let db = init_test_db();
    seed(&db);

    let json = get_json(
        &db,
        "/api/leads?date_filter=custom&start=2024-01-01&end=2024-01-31",
    );

    assert_eq!(json["count"], 2);
    assert_eq!(names(&json), vec!["A", "C"]);
    assert_eq!(json["filters"]["dateFilterType"], "custom");
}

#[test]
fn project_filter_via_api() {
    let db = init_test_db();
    seed(&db);

    let json = get_json(&db, "/api/leads?project=Model+Kuyum+Merkezi");
    assert_eq!(names(&json), vec!["C"]);
}

#[test]
fn source_filter_via_api() {
    let db = init_test_db();
    seed(&db);

    let json = get_json(&db, "/api/leads?source=INSTA");
    assert_eq!(names(&json), vec!["B"]);
}

#[test]
fn options_reflect_stored_leads() {
    let db = init_test_db();
    seed(&db);

    let json = get_json(&db, "/api/options");

    assert_eq!(
        json["availableProjects"],
        serde_json::json!(["Model Kuyum Merkezi", "Model Sanayi Merkezi"])
    );
    assert_eq!(json["availableStatuses"], serde_json::json!(["Satıldı", "open"]));
    assert_eq!(
        json["availableSources"],
        serde_json::json!(["Facebook Reklam", "instagram"])
    );
}

#[test]
fn report_counts_sales() {
    let db = init_test_db();
    seed(&db);

    let json = get_json(&db, "/api/report");

    assert_eq!(json["total"], 3);
    assert_eq!(json["sales"], 1);
    assert_eq!(json["statuses"][0]["label"], "open");
}
