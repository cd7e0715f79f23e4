use crate::domain::lead::Lead;
use crate::domain::project::primary_project;
use crate::domain::report::{LeadReport, Share};
use crate::filters::{DateFilterType, DerivedOptions, FilterSpec, Selection};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Rows shown in the lead table; the export carries the rest.
const TABLE_LIMIT: usize = 200;

pub struct DashboardVm<'a> {
    pub filters: &'a FilterSpec,
    pub options: &'a DerivedOptions,
    pub report: &'a LeadReport,
    pub leads: &'a [&'a Lead],
    /// Size of the unfiltered collection.
    pub loaded: usize,
    /// Current filters as a query string, reused by the export link.
    pub query: String,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Lead Dashboard",
        html! {
            main class="container" {
                h1 { "Lead Dashboard" }

                (filter_form(vm.filters, vm.options))

                section class="card-grid" {
                    (summary_card(vm.report, vm.loaded))
                    (share_card("Status Distribution", &vm.report.statuses))
                    (share_card("Projects", &vm.report.projects))
                    (share_card("Lead Types", &vm.report.lead_types))
                }

                (personnel_card(vm.report))

                section class="card" {
                    div class="card-header" {
                        h3 { "Leads" }
                        a class="btn" href=(format!("/export.xlsx?{}", vm.query)) { "Export to Excel" }
                    }
                    (lead_table(vm.leads))
                }
            }
        },
    )
}

fn select(name: &str, label: &str, current: &Selection, values: &[String]) -> Markup {
    html! {
        label for=(name) { (label) }
        select name=(name) id=(name) {
            option value="all" selected[current.is_all()] { "All" }
            @for value in values {
                option value=(value) selected[current.value() == Some(value.as_str())] { (value) }
            }
        }
    }
}

pub fn filter_form(filters: &FilterSpec, options: &DerivedOptions) -> Markup {
    let date_types = [
        DateFilterType::None,
        DateFilterType::Month,
        DateFilterType::Year,
        DateFilterType::Custom,
    ];

    html! {
        form class="card filters" method="get" action="/" {
            (select("project", "Project", &filters.selected_project, &options.available_projects))
            (select("salesperson", "Salesperson", &filters.selected_salesperson, &options.available_sales_reps))
            (select("status", "Status", &filters.selected_status, &options.available_statuses))
            (select("source", "Source", &filters.selected_source, &options.available_sources))

            label for="lead_type" { "Lead Type" }
            input type="text" name="lead_type" id="lead_type" placeholder="all"
                value=(filters.selected_lead_type.value().unwrap_or(""));

            label for="date_filter" { "Date" }
            select name="date_filter" id="date_filter" {
                @for t in date_types {
                    option value=(t.as_str()) selected[filters.date_filter_type == t] { (t.as_str()) }
                }
            }
            input type="number" name="month" min="1" max="12" placeholder="Month" value=(filters.selected_month);
            input type="number" name="year" placeholder="Year" value=(filters.selected_year);
            input type="date" name="start" value=(filters.start_date);
            input type="date" name="end" value=(filters.end_date);

            button type="submit" class="primary" { "Apply" }
            a href="/?reset=1" { "Reset" }
        }
    }
}

fn summary_card(report: &LeadReport, loaded: usize) -> Markup {
    html! {
        div class="card" {
            h3 { "Summary" }
            p { "Leads: " strong { (report.total) } " of " (loaded) }
            p { "Sales: " strong { (report.sales) } }
        }
    }
}

fn share_card(title: &str, shares: &[Share]) -> Markup {
    html! {
        div class="card" {
            h3 { (title) }
            @if shares.is_empty() {
                p class="muted" { "No data" }
            } @else {
                table {
                    tbody {
                        @for share in shares {
                            tr {
                                td { (share.label) }
                                td { (share.count) }
                                td { (format!("{:.1}%", share.percent)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn personnel_card(report: &LeadReport) -> Markup {
    html! {
        section class="card" {
            h3 { "Personnel Performance" }
            table {
                thead {
                    tr {
                        th { "Salesperson" }
                        th { "Leads" }
                        th { "Sales" }
                        th { "Conversion" }
                    }
                }
                tbody {
                    @for p in &report.personnel {
                        tr {
                            td { (p.name) }
                            td { (p.total) }
                            td { (p.sales) }
                            td { (format!("{:.1}%", p.conversion)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn lead_table(leads: &[&Lead]) -> Markup {
    html! {
        p { "Found " strong { (leads.len()) } " leads." }
        table class="leads" {
            thead {
                tr {
                    th { "Customer" }
                    th { "Project" }
                    th { "Salesperson" }
                    th { "Status" }
                    th { "Type" }
                    th { "Source" }
                    th { "Date" }
                }
            }
            tbody {
                @for lead in leads.iter().take(TABLE_LIMIT) {
                    tr {
                        td { (lead.customer_name) }
                        td { (primary_project(lead).unwrap_or_default()) }
                        td { (lead.assigned_personnel) }
                        td { (lead.status) }
                        td { (lead.lead_type) }
                        td { (lead.source()) }
                        td { (lead.request_date.as_deref().unwrap_or("")) }
                    }
                }
            }
        }
        @if leads.len() > TABLE_LIMIT {
            p class="muted" { "Showing first " (TABLE_LIMIT) " rows. Export for the full list." }
        }
    }
}
