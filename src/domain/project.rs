// src/domain/project.rs

use crate::domain::lead::Lead;
use std::collections::BTreeMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MODEL_KUYUM: &str = "Model Kuyum Merkezi";
pub const MODEL_SANAYI: &str = "Model Sanayi Merkezi";

/// Projects that are always offered as filter options, even with no data.
pub const CANONICAL_PROJECTS: [&str; 2] = [MODEL_KUYUM, MODEL_SANAYI];

/// How a rule tests a normalized note.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// At least one of the fragments is present.
    Any(&'static [&'static str]),
    /// Every fragment is present (generic term plus place-name fragment).
    All(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Matcher::Any(fragments) => fragments.iter().any(|f| normalized.contains(f)),
            Matcher::All(fragments) => fragments.iter().all(|f| normalized.contains(f)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectRule {
    pub project: &'static str,
    pub matcher: Matcher,
}

/// Classification rules, evaluated top to bottom. First hit wins.
///
/// Fragments are written in normalized form (lowercase, no diacritics) and
/// include the spelling variants that show up in web-form notes.
pub const PROJECT_RULES: &[ProjectRule] = &[
    ProjectRule {
        project: MODEL_KUYUM,
        matcher: Matcher::Any(&[
            "kuyum merkez",
            "kuyum proje",
            "kuyumcular",
            "kuyumcu",
            "kuyumkent",
            "kuyum",
            "kuyim",
        ]),
    },
    ProjectRule {
        project: MODEL_SANAYI,
        matcher: Matcher::Any(&["model sanayi", "sanayi merkez", "sanayi sitesi", "sanai merkez"]),
    },
    ProjectRule {
        project: MODEL_SANAYI,
        matcher: Matcher::All(&["sanayi", "model"]),
    },
];

/// Lowercases and strips combining marks, so `"Şanayİ"` and `"sanayi"` compare equal.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Returns the canonical project a note refers to, if any rule matches.
pub fn classify(note: &str) -> Option<&'static str> {
    if note.trim().is_empty() {
        return None;
    }

    let normalized = normalize(note);
    PROJECT_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&normalized))
        .map(|rule| rule.project)
}

/// Resolves an explicitly entered project name.
///
/// Names that classify onto a canonical project collapse to it; anything else
/// is kept as typed (trimmed). Blank names resolve to nothing.
pub fn resolve_explicit(project_name: Option<&str>) -> Option<String> {
    let name = project_name.map(str::trim).filter(|s| !s.is_empty())?;
    Some(classify(name).map_or_else(|| name.to_string(), str::to_string))
}

/// True if the lead belongs to `target`, either through its note or its
/// explicit project field.
pub fn lead_matches_project(lead: &Lead, target: &str) -> bool {
    if classify(lead.note()) == Some(target) {
        return true;
    }

    match lead.project_name.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => {
            explicit.to_lowercase() == target.to_lowercase()
                || resolve_explicit(Some(explicit)).as_deref() == Some(target)
        }
        _ => false,
    }
}

/// The project a lead is reported under: note classification first, then
/// the resolved explicit name.
pub fn primary_project(lead: &Lead) -> Option<String> {
    classify(lead.note())
        .map(str::to_string)
        .or_else(|| resolve_explicit(lead.project_name.as_deref()))
}

/// Every project name the leads can be filtered by, seeded with the
/// canonical defaults. Names that differ only in case are offered once,
/// under the first spelling seen.
pub fn available_projects<'a, I>(leads: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut projects: BTreeMap<String, String> = BTreeMap::new();
    let mut add = |name: String| {
        projects.entry(name.to_lowercase()).or_insert(name);
    };

    for project in CANONICAL_PROJECTS {
        add(project.to_string());
    }
    for lead in leads {
        if let Some(project) = classify(lead.note()) {
            add(project.to_string());
        }
        if let Some(explicit) = resolve_explicit(lead.project_name.as_deref()) {
            add(explicit);
        }
    }

    projects.into_values().collect()
}
