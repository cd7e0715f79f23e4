use crate::domain::lead::Lead;
use crate::domain::project::primary_project;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 9] = [
    "Customer",
    "Phone",
    "Project",
    "Salesperson",
    "Status",
    "Lead Type",
    "Source",
    "Request Date",
    "Note",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Builds the workbook bytes for a set of leads.
pub fn leads_workbook(leads: &[&Lead]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err("header"))?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;
        let project = primary_project(lead).unwrap_or_default();

        let cells: [&str; 9] = [
            &lead.customer_name,
            lead.phone.as_deref().unwrap_or(""),
            &project,
            &lead.assigned_personnel,
            &lead.status,
            &lead.lead_type,
            lead.source(),
            lead.request_date.as_deref().unwrap_or(""),
            lead.note(),
        ];

        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, *value)
                .map_err(xlsx_err(HEADERS[col]))?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_leads_xlsx(leads: &[&Lead], today: NaiveDate) -> ResultResp {
    let buffer = leads_workbook(leads)?;
    xlsx_response(buffer, &format!("leads_{}.xlsx", today.format("%Y-%m-%d")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_is_a_zip_container() {
        let lead = Lead {
            customer_name: "Ayse".into(),
            web_form_note: Some("kuyum".into()),
            ..Default::default()
        };

        let bytes = leads_workbook(&[&lead]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
