// src/filters/engine.rs

use crate::domain::lead::Lead;
use crate::domain::project::lead_matches_project;
use crate::filters::spec::{DateFilterType, FilterSpec};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date layouts seen in request-date columns, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d.%m.%Y %H:%M"];

/// Parses a request date at day granularity. Anything unrecognised is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// True if the lead satisfies every active predicate of `spec`.
pub fn matches(lead: &Lead, spec: &FilterSpec) -> bool {
    if let Some(project) = spec.selected_project.value() {
        if !lead_matches_project(lead, project) {
            return false;
        }
    }

    if let Some(rep) = spec.selected_salesperson.value() {
        if lead.assigned_personnel != rep {
            return false;
        }
    }

    if let Some(status) = spec.selected_status.value() {
        if lead.status != status {
            return false;
        }
    }

    if let Some(lead_type) = spec.selected_lead_type.value() {
        if lead.lead_type != lead_type {
            return false;
        }
    }

    if let Some(source) = spec.selected_source.value() {
        if !lead
            .source()
            .to_lowercase()
            .contains(&source.to_lowercase())
        {
            return false;
        }
    }

    date_matches(lead, spec)
}

/// Date predicate. Leads without a usable request date always pass.
fn date_matches(lead: &Lead, spec: &FilterSpec) -> bool {
    let Some(date) = lead.request_date.as_deref().and_then(parse_date) else {
        return true;
    };

    match spec.date_filter_type {
        DateFilterType::None => true,
        DateFilterType::Month => {
            if spec.selected_month.trim().is_empty() {
                return true;
            }
            let Ok(month) = spec.selected_month.trim().parse::<u32>() else {
                return false;
            };
            let year = if spec.selected_year.trim().is_empty() {
                date.year()
            } else {
                match spec.selected_year.trim().parse::<i32>() {
                    Ok(y) => y,
                    Err(_) => return false,
                }
            };
            date.month() == month && date.year() == year
        }
        DateFilterType::Year => {
            if spec.selected_year.trim().is_empty() {
                return true;
            }
            spec.selected_year
                .trim()
                .parse::<i32>()
                .is_ok_and(|year| date.year() == year)
        }
        DateFilterType::Custom => {
            let after_start = parse_date(&spec.start_date).map_or(true, |start| date >= start);
            let before_end = parse_date(&spec.end_date).map_or(true, |end| date <= end);
            after_start && before_end
        }
    }
}

/// The leads that pass `spec`, in their original order.
pub fn filter_leads<'a>(leads: &'a [Lead], spec: &FilterSpec) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| matches(lead, spec)).collect()
}
