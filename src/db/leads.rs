use crate::db::connection::Database;
use crate::domain::lead::{Lead, NewLead};
use crate::errors::ServerError;
use chrono::Utc;
use crate::db::sales_reps::write_sales_reps;
use rusqlite::{params, Transaction};

/// Replaces the lead collection and the salesperson list in one
/// transaction. Either both writes land or neither does. Returns the number
/// of stored leads.
pub fn replace_leads(
    db: &Database,
    leads: &[NewLead],
    sales_reps: &[String],
) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let stored = write_leads(&tx, leads)?;
        write_sales_reps(&tx, sales_reps)?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

        Ok(stored)
    })
}

fn write_leads(tx: &Transaction, leads: &[NewLead]) -> Result<usize, ServerError> {
    let now = Utc::now().naive_utc();

    tx.execute("DELETE FROM leads", [])
        .map_err(|e| ServerError::DbError(format!("clear leads failed: {e}")))?;

    let mut stmt = tx
        .prepare(
            r#"
            INSERT INTO leads (
                customer_name, phone, web_form_note, project_name,
                assigned_personnel, status, lead_type,
                first_customer_source, form_customer_source,
                request_date, imported_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    for lead in leads {
        stmt.execute(params![
            lead.customer_name,
            lead.phone,
            lead.web_form_note,
            lead.project_name,
            lead.assigned_personnel,
            lead.status,
            lead.lead_type,
            lead.first_customer_source,
            lead.form_customer_source,
            lead.request_date,
            now,
        ])
        .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;
    }

    Ok(leads.len())
}

/// All leads, in import order.
pub fn load_leads(db: &Database) -> Result<Vec<Lead>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                  id, customer_name, phone, web_form_note, project_name,
                  assigned_personnel, status, lead_type,
                  first_customer_source, form_customer_source, request_date
                FROM leads
                ORDER BY id
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Lead {
                    id: row.get(0)?,
                    customer_name: row.get(1)?,
                    phone: row.get(2)?,
                    web_form_note: row.get(3)?,
                    project_name: row.get(4)?,
                    assigned_personnel: row.get(5)?,
                    status: row.get(6)?,
                    lead_type: row.get(7)?,
                    first_customer_source: row.get(8)?,
                    form_customer_source: row.get(9)?,
                    request_date: row.get(10)?,
                })
            })
            .map_err(|e| ServerError::DbError(format!("load leads failed: {e}")))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// `(status, count)` pairs, largest first.
pub fn count_leads_by_status(db: &Database) -> Result<Vec<(String, i64)>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                "SELECT status, COUNT(*) AS n FROM leads GROUP BY status ORDER BY n DESC, status",
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
