//! Mapping of local paths to remote object keys
//!
//! Mapping is lexical: paths are resolved against the working directory but
//! never looked up on the filesystem. A key is the local path with the base
//! path removed, joined with `/`.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Map a single local file to its remote key.
///
/// Without a base path the key is the file name. With one, the key is the
/// path relative to `base_path`.
pub fn map_key(local_path: &Path, base_path: Option<&Path>) -> Result<String> {
    match base_path {
        Some(base) => relative_key(local_path, base),
        None => local_path
            .file_name()
            .map(|name| normalize_key(&name.to_string_lossy()))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::Config(format!("cannot derive a key from {}", local_path.display()))
            }),
    }
}

/// Key of `path` relative to `root`.
///
/// Both sides are made absolute against the working directory and `..` is
/// folded before comparing. Fails when `root` is not a prefix of `path`, or
/// when both are the same path (the key would be empty).
pub fn relative_key(path: &Path, root: &Path) -> Result<String> {
    let path = lexical(path)?;
    let root = lexical(root)?;

    let rest = path.strip_prefix(&root).map_err(|_| {
        Error::Config(format!(
            "base path {} is not a prefix of {}",
            root.display(),
            path.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in rest.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            other => {
                return Err(Error::Config(format!(
                    "unexpected component {:?} in {} under base path {}",
                    other.as_os_str(),
                    path.display(),
                    root.display()
                )))
            }
        }
    }

    let key = normalize_key(&parts.join("/"));
    if key.is_empty() {
        return Err(Error::Config(format!(
            "{} maps to an empty key under base path {}",
            path.display(),
            root.display()
        )));
    }

    Ok(key)
}

/// Normalize separators to single forward slashes, without leading or
/// trailing slashes
pub fn normalize_key(raw: &str) -> String {
    raw.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

// Absolute path with `.` dropped and `..` folded, without touching the
// filesystem: delete targets may no longer exist locally
fn lexical(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }

    Ok(folded)
}
