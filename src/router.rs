use crate::config::AppConfig;
use crate::db::{load_leads, load_sales_reps, Database};
use crate::domain::report::build_report;
use crate::errors::ServerError;
use crate::filters::{DateFilterType, FilterPatch, FilterSpec, FilterState, Selection};
use crate::imports::import_leads_json;
use crate::responses::{html_response, json_response, ResultResp};
use crate::spreadsheets::export_leads_xlsx;
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

/// Largest import body accepted.
const MAX_IMPORT_BYTES: u64 = 16 * 1024 * 1024;

pub fn handle(req: Request, db: &Database, config: &AppConfig) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let state = load_state(db, &params)?;
            let filtered = state.filtered_leads();
            let report = build_report(&filtered, &config.sold_statuses);

            html_response(dashboard_page(&DashboardVm {
                filters: state.filters(),
                options: state.options(),
                report: &report,
                leads: &filtered,
                loaded: state.leads().len(),
                query: filters_to_query(state.filters()),
            }))
        }
        ("GET", "/api/leads") => {
            let state = load_state(db, &params)?;
            let filtered = state.filtered_leads();
            json_response(&json!({
                "ready": state.is_ready(),
                "filters": state.filters(),
                "count": filtered.len(),
                "leads": filtered,
            }))
        }
        ("GET", "/api/options") => {
            let state = load_state(db, &params)?;
            json_response(state.options())
        }
        ("GET", "/api/report") => {
            let state = load_state(db, &params)?;
            let filtered = state.filtered_leads();
            json_response(&build_report(&filtered, &config.sold_statuses))
        }
        ("GET", "/export.xlsx") => {
            let state = load_state(db, &params)?;
            let filtered = state.filtered_leads();
            export_leads_xlsx(&filtered, chrono::Local::now().date_naive())
        }
        ("POST", "/leads/import") => {
            let mut body = Vec::new();
            req.into_body()
                .reader()
                .take(MAX_IMPORT_BYTES)
                .read_to_end(&mut body)
                .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;

            let summary = import_leads_json(db, &body)?;
            json_response(&summary)
        }
        _ => Err(ServerError::NotFound),
    }
}

/// Loads the stored leads and sales reps into a fresh filter state and
/// applies the filters carried by the query string.
fn load_state(db: &Database, params: &HashMap<String, String>) -> Result<FilterState, ServerError> {
    let mut state = FilterState::new();
    state.set_sales_reps(load_sales_reps(db)?);
    state.replace_leads(load_leads(db)?);

    let patch = filter_patch_from_query(params);
    if !patch.is_empty() {
        state.set_filters(patch);
    }
    if params.contains_key("reset") {
        state.reset_filters();
    }

    Ok(state)
}

/// Maps query parameters onto a partial filter update. Absent parameters
/// leave the corresponding filter untouched.
pub fn filter_patch_from_query(params: &HashMap<String, String>) -> FilterPatch {
    let selection = |key: &str| params.get(key).map(|v| Selection::from(v.as_str()));
    let text = |key: &str| params.get(key).map(|v| v.trim().to_string());

    FilterPatch {
        selected_project: selection("project"),
        selected_salesperson: selection("salesperson"),
        selected_status: selection("status"),
        selected_lead_type: selection("lead_type"),
        selected_source: selection("source"),
        date_filter_type: params.get("date_filter").map(|v| DateFilterType::parse(v)),
        selected_month: text("month"),
        selected_year: text("year"),
        start_date: text("start"),
        end_date: text("end"),
    }
}

/// Inverse of `filter_patch_from_query`, skipping defaults.
pub fn filters_to_query(filters: &FilterSpec) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());

    let selections = [
        ("project", &filters.selected_project),
        ("salesperson", &filters.selected_salesperson),
        ("status", &filters.selected_status),
        ("lead_type", &filters.selected_lead_type),
        ("source", &filters.selected_source),
    ];
    for (key, selection) in selections {
        if let Some(value) = selection.value() {
            query.append_pair(key, value);
        }
    }

    if filters.date_filter_type != DateFilterType::None {
        query.append_pair("date_filter", filters.date_filter_type.as_str());
    }

    let texts = [
        ("month", &filters.selected_month),
        ("year", &filters.selected_year),
        ("start", &filters.start_date),
        ("end", &filters.end_date),
    ];
    for (key, value) in texts {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }

    query.finish()
}

fn parse_query(req: &astra::Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
