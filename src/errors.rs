// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad input, etc.) or downstream layers (DB, spreadsheet writer).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => 500,
        }
    }
}
