//! Configuration resolution for r2sync
//!
//! Values come from CLI overrides first, then from the process environment.
//! Resolution happens once at start-up; the resulting [`BucketConfig`] is
//! passed explicitly to everything that needs it.

use crate::error::{Error, Result};
use std::fmt;

/// Cloudflare account ID
pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";

/// R2 access key ID
pub const ENV_ACCESS_KEY_ID: &str = "CLOUDFLARE_ACCESS_KEY_ID";

/// R2 secret access key
pub const ENV_SECRET_ACCESS_KEY: &str = "CLOUDFLARE_SECRET_ACCESS_KEY";

/// Default bucket name (overridable from the CLI)
pub const ENV_BUCKET_NAME: &str = "CLOUDFLARE_BUCKET_NAME";

/// S3-compatible endpoint URL
pub const ENV_ENDPOINT: &str = "CLOUDFLARE_ENDPOINT";

/// Everything needed to talk to one R2 bucket
#[derive(Clone, PartialEq, Eq)]
pub struct BucketConfig {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub bucket_name: String,
}

impl BucketConfig {
    /// Build a configuration from explicit values.
    ///
    /// `bucket_name` falls back to `CLOUDFLARE_BUCKET_NAME` when `None`.
    pub fn new(
        account_id: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        endpoint: impl Into<String>,
        bucket_name: Option<String>,
    ) -> Result<Self> {
        let account_id = account_id.into();
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        let endpoint = endpoint.into();

        Self::resolve(
            |name| match name {
                ENV_ACCOUNT_ID => Some(account_id.clone()),
                ENV_ACCESS_KEY_ID => Some(access_key_id.clone()),
                ENV_SECRET_ACCESS_KEY => Some(secret_access_key.clone()),
                ENV_ENDPOINT => Some(endpoint.clone()),
                other => std::env::var(other).ok(),
            },
            bucket_name.as_deref(),
        )
    }

    /// Resolve from the process environment
    pub fn from_env(bucket_override: Option<&str>) -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), bucket_override)
    }

    /// Resolve using `lookup` for each variable.
    ///
    /// A non-empty `bucket_override` wins over `CLOUDFLARE_BUCKET_NAME`.
    /// Empty values count as missing. The error lists every missing variable.
    pub fn resolve<F>(lookup: F, bucket_override: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| -> String {
            match lookup(name).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let account_id = required(ENV_ACCOUNT_ID);
        let access_key_id = required(ENV_ACCESS_KEY_ID);
        let secret_access_key = required(ENV_SECRET_ACCESS_KEY);
        let endpoint = required(ENV_ENDPOINT);

        let bucket_name = match bucket_override.map(str::trim).filter(|b| !b.is_empty()) {
            Some(bucket) => bucket.to_string(),
            None => required(ENV_BUCKET_NAME),
        };

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required values: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            account_id,
            access_key_id,
            secret_access_key,
            endpoint,
            bucket_name,
        })
    }
}

impl fmt::Debug for BucketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketConfig")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}
