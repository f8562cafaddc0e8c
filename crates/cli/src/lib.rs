//! r2sync - CLI front-ends over r2sync-core
//!
//! Shared by the `r2sync`, `r2-upload` and `r2-delete` binaries.

pub mod args;
pub mod exit_code;
pub mod handlers;

use color_eyre::config::HookBuilder;
use exit_code::ExitCode;
use r2sync_core::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Process start-up shared by every binary: panic reports, `.env` loading
/// and logging to stderr (`RUST_LOG`, default `info`).
pub fn init() {
    // Setup error handling
    if let Err(e) = HookBuilder::default().install() {
        eprintln!("Warning: Failed to install error handler: {}", e);
    }

    // A missing .env file is fine
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Print a handler failure on stderr and pick the exit code
pub fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if matches!(e.downcast_ref::<Error>(), Some(Error::Config(_))) {
                eprintln!("Please ensure all required environment variables are set.");
            }
            ExitCode::from_error(&e)
        }
    }
}
