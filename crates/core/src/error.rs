//! Error types for r2sync-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for r2sync-core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for r2sync-core
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unresolvable bucket, credentials or path mapping
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local path does not exist
    #[error("Local path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any failure reported by the storage API
    #[error("R2 operation failed: {0}")]
    RemoteStorage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Whether this error came from configuration resolution
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

// Generic SdkError conversion for all S3 operations
impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    fn from(err: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        Error::RemoteStorage(aws_sdk_s3::error::DisplayErrorContext(&err).to_string())
    }
}
