pub mod error;

pub use error::html_error_response;
