// responses/xlsx.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Return an XLSX workbook as a download. Exports reflect live filters, so
/// they are never cached.
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    let filename: String = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", XLSX_MIME)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .header("Cache-Control", "no-store")
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}
