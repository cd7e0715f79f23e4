pub mod connection;
pub mod leads;
pub mod sales_reps;

pub use connection::{init_db, Database};
pub use leads::{count_leads_by_status, load_leads, replace_leads};
pub use sales_reps::load_sales_reps;
