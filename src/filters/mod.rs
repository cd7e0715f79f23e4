pub mod engine;
pub mod spec;
pub mod state;

pub use spec::{DateFilterType, FilterPatch, FilterSpec, Selection};
pub use state::{DerivedOptions, FilterState};
