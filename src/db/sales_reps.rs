use crate::db::connection::Database;
use crate::errors::ServerError;
use rusqlite::{params, Transaction};

/// Replaces the salesperson list inside `tx`, keeping the given order and
/// dropping blanks and repeats.
pub(crate) fn write_sales_reps(tx: &Transaction, names: &[String]) -> Result<(), ServerError> {
    tx.execute("DELETE FROM sales_reps", [])
        .map_err(|e| ServerError::DbError(format!("clear sales reps failed: {e}")))?;

    let mut position = 0i64;
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let inserted = tx
            .execute(
                "INSERT OR IGNORE INTO sales_reps (name, position) VALUES (?1, ?2)",
                params![name, position],
            )
            .map_err(|e| ServerError::DbError(format!("insert sales rep failed: {e}")))?;
        position += inserted as i64;
    }

    Ok(())
}

pub fn load_sales_reps(db: &Database) -> Result<Vec<String>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT name FROM sales_reps ORDER BY position")
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ServerError::DbError(format!("load sales reps failed: {e}")))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
