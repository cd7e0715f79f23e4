// src/filters/spec.rs

use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel accepted from the UI for "do not filter on this field".
pub const ALL: &str = "all";

/// A single selectable filter value. Status, lead type and source are open
/// ended, so the value is a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// The selected value, or `None` when the predicate is inactive.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Only(raw.to_string())
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value().unwrap_or(ALL))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilterType {
    #[default]
    None,
    Month,
    Year,
    Custom,
}

impl DateFilterType {
    /// Unknown names fall back to `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" => DateFilterType::Month,
            "year" => DateFilterType::Year,
            "custom" => DateFilterType::Custom,
            _ => DateFilterType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilterType::None => "none",
            DateFilterType::Month => "month",
            DateFilterType::Year => "year",
            DateFilterType::Custom => "custom",
        }
    }
}

/// The user's current filter choices.
///
/// Month, year and range bounds are kept as entered; they are only parsed
/// when a lead is tested, and values that do not parse simply match nothing
/// (month/year) or impose no bound (range).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub selected_project: Selection,
    pub selected_salesperson: Selection,
    pub selected_status: Selection,
    pub selected_lead_type: Selection,
    pub selected_source: Selection,
    pub date_filter_type: DateFilterType,
    pub selected_month: String,
    pub selected_year: String,
    pub start_date: String,
    pub end_date: String,
}

/// A partial update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub selected_project: Option<Selection>,
    pub selected_salesperson: Option<Selection>,
    pub selected_status: Option<Selection>,
    pub selected_lead_type: Option<Selection>,
    pub selected_source: Option<Selection>,
    pub date_filter_type: Option<DateFilterType>,
    pub selected_month: Option<String>,
    pub selected_year: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }
}

impl FilterSpec {
    /// Merges every field the patch carries.
    pub fn apply(&mut self, patch: FilterPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )*
            };
        }

        merge!(
            selected_project,
            selected_salesperson,
            selected_status,
            selected_lead_type,
            selected_source,
            date_filter_type,
            selected_month,
            selected_year,
            start_date,
            end_date,
        );
    }
}
