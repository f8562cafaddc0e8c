//! Exit codes for the r2sync binaries

use r2sync_core::Error;

/// Process exit codes, stable for scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// Invalid arguments (reported by clap)
    UsageError = 2,

    /// Missing bucket, credentials or unusable base path
    ConfigError = 3,

    /// Local path does not exist
    NotFound = 4,

    /// The storage API returned an error
    RemoteError = 5,
}

impl ExitCode {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Pick the exit code for an error returned by a handler
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<Error>() {
            Some(Error::Config(_)) => Self::ConfigError,
            Some(Error::NotFound(_)) => Self::NotFound,
            Some(Error::RemoteStorage(_)) => Self::RemoteError,
            Some(Error::InvalidInput(_)) => Self::UsageError,
            _ => Self::GeneralError,
        }
    }
}
