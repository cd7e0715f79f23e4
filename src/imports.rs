// src/imports.rs
use crate::db::{count_leads_by_status, load_sales_reps, replace_leads, Database};
use crate::domain::lead::{LeadRow, NewLead};
use crate::errors::ServerError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub sales_reps: usize,
}

/// Parses a JSON array of lead rows. Unusable rows are dropped and counted;
/// only a body that is not a JSON array fails the import.
pub fn parse_rows(body: &[u8]) -> Result<(Vec<NewLead>, usize), ServerError> {
    let rows: Vec<Value> = serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid lead payload: {e}")))?;

    let mut leads = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for (i, row) in rows.into_iter().enumerate() {
        let parsed = serde_json::from_value::<LeadRow>(row)
            .map_err(|e| e.to_string())
            .and_then(|row| row.into_new_lead().map_err(str::to_string));

        match parsed {
            Ok(lead) => leads.push(lead),
            Err(reason) => {
                tracing::warn!(row = i, %reason, "skipping lead row");
                skipped += 1;
            }
        }
    }

    Ok((leads, skipped))
}

/// Replaces the stored leads with the payload and merges the salespeople it
/// names into the sales rep list.
pub fn import_leads_json(db: &Database, body: &[u8]) -> Result<ImportSummary, ServerError> {
    let (leads, skipped) = parse_rows(body)?;

    let mut reps = load_sales_reps(db)?;
    for lead in &leads {
        let name = lead.assigned_personnel.trim();
        if !name.is_empty() && !reps.iter().any(|r| r == name) {
            reps.push(name.to_string());
        }
    }

    let imported = replace_leads(db, &leads, &reps)?;

    let by_status = count_leads_by_status(db)?;
    tracing::info!(
        imported,
        skipped,
        sales_reps = reps.len(),
        ?by_status,
        "lead import finished"
    );

    Ok(ImportSummary {
        imported,
        skipped,
        sales_reps: reps.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::load_leads;
    use crate::tests::utils::init_test_db;

    #[test]
    fn rows_without_customer_are_skipped() {
        let body = br#"[
            {"customerName": "Ayse", "status": "open"},
            {"status": "open"},
            {"customer_name": "Mehmet", "webFormNotu": "kuyum"}
        ]"#;

        let (leads, skipped) = parse_rows(body).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(leads[1].web_form_note.as_deref(), Some("kuyum"));
    }

    #[test]
    fn numeric_cells_do_not_fail_the_batch() {
        let body = br#"[
            {"customerName": "Ayse", "phone": "05321234567"},
            {"customerName": "Can", "phone": 5321234567, "requestDate": 20240115},
            {"customerName": "Deniz", "phone": {"home": "1"}},
            "not a row"
        ]"#;

        let (leads, skipped) = parse_rows(body).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].customer_name, "Ayse");
        assert_eq!(leads[1].phone.as_deref(), Some("5321234567"));
        assert_eq!(leads[1].request_date.as_deref(), Some("20240115"));
    }

    #[test]
    fn malformed_payload_is_bad_request() {
        let err = parse_rows(b"{not json").unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));

        let err = parse_rows(br#"{"customerName": "Ayse"}"#).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[test]
    fn import_stores_leads_and_merges_reps() {
        let db = init_test_db();
        replace_leads(&db, &[], &["Zeynep".to_string()]).unwrap();

        let body = br#"[
            {"customerName": "Ayse", "assignedPersonnel": "Ali"},
            {"customerName": "Can", "assignedPersonnel": "Zeynep"},
            {"customerName": "Deniz", "assignedPersonnel": "Ali"}
        ]"#;

        let summary = import_leads_json(&db, body).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 3,
                skipped: 0,
                sales_reps: 2
            }
        );
        assert_eq!(load_leads(&db).unwrap().len(), 3);
        assert_eq!(load_sales_reps(&db).unwrap(), vec!["Zeynep", "Ali"]);
    }
}
