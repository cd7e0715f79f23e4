// src/domain/lead.rs

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single prospective-customer record as stored in the `leads` table.
/// Filtering treats it as read-only.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    /// Free-text note from the web form. Project inference reads this.
    pub web_form_note: Option<String>,
    pub project_name: Option<String>,
    pub assigned_personnel: String,
    pub status: String,
    pub lead_type: String,
    pub first_customer_source: Option<String>,
    pub form_customer_source: Option<String>,
    pub request_date: Option<String>,
}

impl Lead {
    /// The note text, or `""` when absent.
    pub fn note(&self) -> &str {
        self.web_form_note.as_deref().unwrap_or("")
    }

    /// Acquisition channel: first-contact source, falling back to the form source.
    pub fn source(&self) -> &str {
        non_empty(self.first_customer_source.as_deref())
            .or_else(|| non_empty(self.form_customer_source.as_deref()))
            .unwrap_or("")
    }
}

/// A lead that has not been stored yet (no id).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct NewLead {
    pub customer_name: String,
    pub phone: Option<String>,
    pub web_form_note: Option<String>,
    pub project_name: Option<String>,
    pub assigned_personnel: String,
    pub status: String,
    pub lead_type: String,
    pub first_customer_source: Option<String>,
    pub form_customer_source: Option<String>,
    pub request_date: Option<String>,
}

/// One row of an import payload.
///
/// Sheets exported from different tools disagree on column naming, so both
/// camelCase and snake_case keys are accepted, and the note may arrive under
/// several spellings. Numeric and boolean cells (phone numbers, serial dates)
/// are read as their text. Every field is optional here; `into_new_lead`
/// decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadRow {
    #[serde(alias = "customer_name", deserialize_with = "text_cell")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "text_cell")]
    pub phone: Option<String>,
    #[serde(alias = "web_form_note", deserialize_with = "text_cell")]
    pub web_form_note: Option<String>,
    #[serde(alias = "web_form_notu", deserialize_with = "text_cell")]
    pub web_form_notu: Option<String>,
    #[serde(deserialize_with = "text_cell")]
    pub note: Option<String>,
    #[serde(alias = "project_name", deserialize_with = "text_cell")]
    pub project_name: Option<String>,
    #[serde(alias = "assigned_personnel", deserialize_with = "text_cell")]
    pub assigned_personnel: Option<String>,
    #[serde(deserialize_with = "text_cell")]
    pub status: Option<String>,
    #[serde(alias = "lead_type", deserialize_with = "text_cell")]
    pub lead_type: Option<String>,
    #[serde(alias = "first_customer_source", deserialize_with = "text_cell")]
    pub first_customer_source: Option<String>,
    #[serde(alias = "form_customer_source", deserialize_with = "text_cell")]
    pub form_customer_source: Option<String>,
    #[serde(alias = "request_date", deserialize_with = "text_cell")]
    pub request_date: Option<String>,
}

/// Accepts a string, number, boolean or null cell. Nested arrays and objects
/// are rejected, which makes the whole row unusable.
fn text_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!("expected a text cell, got {other}"))),
    }
}

impl LeadRow {
    /// First non-empty note spelling, in declaration order.
    pub fn note(&self) -> Option<&str> {
        [&self.web_form_note, &self.web_form_notu, &self.note]
            .into_iter()
            .find_map(|n| non_empty(n.as_deref()))
    }

    /// Converts the row into a storable lead. Rows without a customer name
    /// are rejected with a short reason.
    pub fn into_new_lead(self) -> Result<NewLead, &'static str> {
        let customer_name = trimmed(self.customer_name.as_deref())
            .ok_or("missing customer name")?
            .to_string();

        let web_form_note = self.note().map(str::to_string);

        Ok(NewLead {
            customer_name,
            phone: trimmed(self.phone.as_deref()).map(str::to_string),
            web_form_note,
            project_name: trimmed(self.project_name.as_deref()).map(str::to_string),
            assigned_personnel: trimmed(self.assigned_personnel.as_deref())
                .unwrap_or("")
                .to_string(),
            status: trimmed(self.status.as_deref()).unwrap_or("").to_string(),
            lead_type: trimmed(self.lead_type.as_deref()).unwrap_or("").to_string(),
            first_customer_source: trimmed(self.first_customer_source.as_deref())
                .map(str::to_string),
            form_customer_source: trimmed(self.form_customer_source.as_deref())
                .map(str::to_string),
            request_date: trimmed(self.request_date.as_deref()).map(str::to_string),
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn trimmed(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
