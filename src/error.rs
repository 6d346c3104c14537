//! Error types for the drive_tree crate.

use thiserror::Error;

/// Errors that can occur while walking a Google Drive folder tree.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("JWT encoding error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),

    #[error("Cannot attach a child to non-directory node: {0}")]
    NotADirectory(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to format timestamp: {0}")]
    TimeFormatError(#[from] time::error::Format),
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
