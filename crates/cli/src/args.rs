//! Command-line arguments for the r2sync binaries

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

const BASE_PATH_HELP: &str = "Local base path used as the root in R2. \
The local directory structure is mirrored in the bucket from here down. \
This is a path on your file system, not a bucket path.";

const BUCKET_HELP: &str = "R2 bucket name (overrides CLOUDFLARE_BUCKET_NAME)";

/// r2sync - upload or delete files in a Cloudflare R2 bucket
#[derive(Parser, Debug)]
#[command(name = "r2sync")]
#[command(version)]
#[command(about = "Upload or delete files and directories in Cloudflare R2", long_about = None)]
#[command(group(ArgGroup::new("action").required(true).args(["upload", "delete"])))]
pub struct Cli {
    /// Path to file or directory to upload, or key/prefix to delete
    pub path: String,

    #[arg(short = 'b', long = "base_path", visible_alias = "base-path", requires = "upload", help = BASE_PATH_HELP)]
    pub base_path: Option<PathBuf>,

    /// Upload directory or file
    #[arg(short, long)]
    pub upload: bool,

    /// Delete the key, or everything under the prefix when it ends with '/'
    #[arg(short, long)]
    pub delete: bool,

    #[arg(long = "bucket", visible_alias = "bucket_name", help = BUCKET_HELP)]
    pub bucket: Option<String>,
}

/// r2-upload - upload a file or directory to Cloudflare R2
#[derive(Parser, Debug)]
#[command(name = "r2-upload")]
#[command(version)]
#[command(about = "Upload a file or directory to Cloudflare R2", long_about = None)]
pub struct UploadCli {
    /// Path to file or directory to upload
    pub path: PathBuf,

    #[arg(short = 'b', long = "base_path", visible_alias = "base-path", help = BASE_PATH_HELP)]
    pub base_path: Option<PathBuf>,

    #[arg(long = "bucket", visible_alias = "bucket_name", help = BUCKET_HELP)]
    pub bucket: Option<String>,
}

/// r2-delete - delete a file or prefix from Cloudflare R2
#[derive(Parser, Debug)]
#[command(name = "r2-delete")]
#[command(version)]
#[command(about = "Delete a file or directory from Cloudflare R2", long_about = None)]
pub struct DeleteCli {
    /// Key to delete, or prefix ending with '/' to delete everything under it
    pub path: String,

    #[arg(long = "bucket", visible_alias = "bucket_name", help = BUCKET_HELP)]
    pub bucket: Option<String>,
}
