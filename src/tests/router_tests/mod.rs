mod api_tests;
mod dashboard_tests;
mod import_export_tests;
