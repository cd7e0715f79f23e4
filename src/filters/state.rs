// src/filters/state.rs

use crate::domain::lead::Lead;
use crate::domain::project::available_projects;
use crate::filters::engine::filter_leads;
use crate::filters::spec::{FilterPatch, FilterSpec};
use serde::Serialize;
use std::collections::BTreeSet;

/// Selectable filter values derived from the loaded leads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOptions {
    pub available_projects: Vec<String>,
    pub available_statuses: Vec<String>,
    pub available_sources: Vec<String>,
    pub available_sales_reps: Vec<String>,
}

impl DerivedOptions {
    fn from_leads(leads: &[Lead], sales_reps: &[String]) -> Self {
        Self {
            available_projects: available_projects(leads),
            available_statuses: distinct_non_empty(leads.iter().map(|l| l.status.as_str())),
            available_sources: distinct_non_empty(leads.iter().map(Lead::source)),
            available_sales_reps: sales_reps.to_vec(),
        }
    }
}

fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Owns the filter specification and the loaded leads.
///
/// The spec and the lead collection change independently. Derived options
/// depend only on the leads and are rebuilt whenever a new collection is
/// supplied; filtered leads depend on both and are computed on request.
#[derive(Debug, Default)]
pub struct FilterState {
    spec: FilterSpec,
    leads: Option<Vec<Lead>>,
    sales_reps: Vec<String>,
    options: DerivedOptions,
}

impl FilterState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.options = DerivedOptions::from_leads(&[], &[]);
        state
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn options(&self) -> &DerivedOptions {
        &self.options
    }

    /// `false` until the first lead collection arrives.
    pub fn is_ready(&self) -> bool {
        self.leads.is_some()
    }

    pub fn leads(&self) -> &[Lead] {
        self.leads.as_deref().unwrap_or(&[])
    }

    /// Replaces the whole lead collection and rebuilds the derived options.
    pub fn replace_leads(&mut self, leads: Vec<Lead>) {
        self.options = DerivedOptions::from_leads(&leads, &self.sales_reps);
        self.leads = Some(leads);
    }

    /// Replaces the salesperson list offered for selection.
    pub fn set_sales_reps(&mut self, sales_reps: Vec<String>) {
        self.options.available_sales_reps = sales_reps.clone();
        self.sales_reps = sales_reps;
    }

    /// Merges `patch` into the current spec. Values are not validated.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.spec.apply(patch);
    }

    /// Back to default filters. Derived options stay as they are.
    pub fn reset_filters(&mut self) {
        self.spec = FilterSpec::default();
    }

    /// Leads passing the current filters, in load order. Empty while loading.
    pub fn filtered_leads(&self) -> Vec<&Lead> {
        match &self.leads {
            Some(leads) => filter_leads(leads, &self.spec),
            None => Vec::new(),
        }
    }
}
