//! Command handlers for the r2sync binaries

use anyhow::Result;
use r2sync_core::{delete, upload, BucketConfig, R2Client};
use std::path::Path;

/// Handle an upload request
pub async fn handle_upload(path: &Path, base_path: Option<&Path>, bucket: Option<&str>) -> Result<()> {
    // Resolve before anything touches the network
    let config = BucketConfig::from_env(bucket)?;
    let r2_client = R2Client::new(&config).await?;

    println!("Uploading {} -> {}...", path.display(), config.bucket_name);

    let uploaded = upload(&r2_client, path, base_path).await?;

    for key in &uploaded {
        println!("  ✅ {}", key);
    }
    if uploaded.is_empty() {
        println!("  Everything up to date");
    } else {
        println!("  Uploaded {} object(s)", uploaded.len());
    }

    Ok(())
}

/// Handle a delete request
pub async fn handle_delete(path: &str, bucket: Option<&str>) -> Result<()> {
    let config = BucketConfig::from_env(bucket)?;
    let r2_client = R2Client::new(&config).await?;

    println!("Deleting {} from {}...", path, config.bucket_name);

    let deleted = delete(&r2_client, path, None).await?;

    for key in &deleted {
        println!("  🗑️  {}", key);
    }
    if deleted.is_empty() {
        println!("  Nothing to delete");
    } else {
        println!("  Deleted {} object(s)", deleted.len());
    }

    Ok(())
}
