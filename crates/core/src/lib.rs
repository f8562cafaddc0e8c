//! r2sync-core - Core library for r2sync
//!
//! This library mirrors local files and directories into a Cloudflare R2
//! bucket: configuration resolution, the S3 client adapter, local-path to key
//! mapping, ETag based change detection and the upload/delete orchestrators.

pub mod client;
pub mod config;
pub mod delete;
pub mod detector;
pub mod error;
pub mod mapper;
pub mod mime;
pub mod upload;

// Re-export commonly used types
pub use client::{ObjectInfo, ObjectMetadata, ObjectStore, R2Client};
pub use config::BucketConfig;
pub use delete::{delete, resolve_target, DeleteTarget};
pub use detector::{etag_matches, md5_hex, needs_upload, LocalEntry};
pub use error::{Error, Result};
pub use mapper::{map_key, relative_key};
pub use mime::content_type_for;
pub use upload::{plan_upload, upload, PlannedUpload};
