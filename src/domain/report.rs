// src/domain/report.rs

use crate::domain::lead::Lead;
use crate::domain::project::primary_project;
use serde::Serialize;
use std::collections::HashMap;

/// Bucket for leads whose project could not be determined.
pub const OTHER_PROJECT: &str = "Other";
/// Bucket for leads with an empty status, type or salesperson.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: usize,
    /// Percentage of the reported leads, 0-100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonnelPerformance {
    pub name: String,
    pub total: usize,
    pub sales: usize,
    /// Sales over total, 0-100.
    pub conversion: f64,
}

/// Dashboard numbers for one filtered set of leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadReport {
    pub total: usize,
    pub sales: usize,
    pub statuses: Vec<Share>,
    pub projects: Vec<Share>,
    pub lead_types: Vec<Share>,
    pub personnel: Vec<PersonnelPerformance>,
}

fn label_or_unassigned(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        UNASSIGNED.to_string()
    } else {
        s.to_string()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Counts per label, largest first, ties by label.
fn shares(labels: impl Iterator<Item = String>, total: usize) -> Vec<Share> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut out: Vec<Share> = counts
        .into_iter()
        .map(|(label, count)| Share {
            label,
            count,
            percent: percent(count, total),
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

/// Builds the report. `sold_statuses` lists the statuses that count as a
/// sale, compared case-insensitively.
pub fn build_report(leads: &[&Lead], sold_statuses: &[String]) -> LeadReport {
    let is_sale = |lead: &Lead| {
        sold_statuses
            .iter()
            .any(|s| s.trim().to_lowercase() == lead.status.trim().to_lowercase())
    };

    let total = leads.len();
    let sales = leads.iter().filter(|&&l| is_sale(l)).count();

    let mut per_person: HashMap<String, (usize, usize)> = HashMap::new();
    for &lead in leads {
        let entry = per_person
            .entry(label_or_unassigned(&lead.assigned_personnel))
            .or_default();
        entry.0 += 1;
        if is_sale(lead) {
            entry.1 += 1;
        }
    }

    let mut personnel: Vec<PersonnelPerformance> = per_person
        .into_iter()
        .map(|(name, (total, sales))| PersonnelPerformance {
            name,
            total,
            sales,
            conversion: percent(sales, total),
        })
        .collect();
    personnel.sort_by(|a, b| {
        b.sales
            .cmp(&a.sales)
            .then_with(|| b.total.cmp(&a.total))
            .then_with(|| a.name.cmp(&b.name))
    });

    LeadReport {
        total,
        sales,
        statuses: shares(leads.iter().map(|l| label_or_unassigned(&l.status)), total),
        projects: shares(
            leads
                .iter()
                .map(|l| primary_project(l).unwrap_or_else(|| OTHER_PROJECT.to_string())),
            total,
        ),
        lead_types: shares(leads.iter().map(|l| label_or_unassigned(&l.lead_type)), total),
        personnel,
    }
}
