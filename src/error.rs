//! Error types for the roster dashboard

use thiserror::Error;


pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Search query must be at least {min} characters (got {got})")]
    QueryTooShort { min: usize, got: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid filter value: {value}")]
    InvalidFilter { value: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}
