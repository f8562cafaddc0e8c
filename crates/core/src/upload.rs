//! Upload of a local file or directory tree

use crate::client::ObjectStore;
use crate::detector::{needs_upload, LocalEntry};
use crate::error::{Error, Result};
use crate::mapper::{map_key, relative_key};
use crate::mime::content_type_for;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File names never uploaded
pub const IGNORED_FILE_NAMES: &[&str] = &[".DS_Store"];

/// A local file paired with the key it will be stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub path: PathBuf,
    pub key: String,
}

/// Enumerate the files under `local_path` and map each to its key.
///
/// Mapping happens for every file before anything is sent, so a bad base
/// path fails the whole run up front.
pub fn plan_upload(local_path: &Path, base_path: Option<&Path>) -> Result<Vec<PlannedUpload>> {
    if !local_path.exists() {
        return Err(Error::NotFound(local_path.to_path_buf()));
    }

    if !local_path.is_dir() {
        if is_ignored(local_path) {
            tracing::info!(path = %local_path.display(), "ignoring");
            return Ok(Vec::new());
        }
        let key = map_key(local_path, base_path)?;
        return Ok(vec![PlannedUpload {
            path: local_path.to_path_buf(),
            key,
        }]);
    }

    let root = base_path.unwrap_or(local_path);
    let mut planned = Vec::new();

    for entry in WalkDir::new(local_path).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_ignored(entry.path()) {
            tracing::info!(path = %entry.path().display(), "ignoring");
            continue;
        }

        let key = relative_key(entry.path(), root)?;
        planned.push(PlannedUpload {
            path: entry.into_path(),
            key,
        });
    }

    Ok(planned)
}

/// Upload `local_path` (a file or a directory) to the store.
///
/// Files whose remote ETag matches their content are skipped. Returns the
/// keys actually uploaded. The first failure aborts the remaining files.
pub async fn upload<S>(store: &S, local_path: &Path, base_path: Option<&Path>) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let planned = plan_upload(local_path, base_path)?;
    tracing::debug!(files = planned.len(), bucket = store.bucket(), "upload planned");

    let mut uploaded = Vec::new();
    for item in planned {
        if upload_one(store, &item).await? {
            uploaded.push(item.key);
        }
    }

    Ok(uploaded)
}

// Returns whether the file was sent
async fn upload_one<S>(store: &S, item: &PlannedUpload) -> Result<bool>
where
    S: ObjectStore + ?Sized,
{
    let entry = LocalEntry::load(&item.path, item.key.as_str()).await?;

    if !needs_upload(store, &entry).await? {
        tracing::info!(key = %entry.key, "already up to date, skipping");
        return Ok(false);
    }

    let content_type = content_type_for(&entry.path);
    let size = entry.size();
    tracing::info!(key = %entry.key, size, content_type = %content_type, "uploading");

    store
        .put_object(&entry.key, entry.content, &content_type)
        .await?;

    Ok(true)
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| IGNORED_FILE_NAMES.contains(&name))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"beta").unwrap();
        fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
        dir
    }

    fn keys(planned: &[PlannedUpload]) -> Vec<&str> {
        planned.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_plan_directory_relative_to_itself() {
        let dir = make_tree();
        let planned = plan_upload(dir.path(), None).unwrap();
        assert_eq!(keys(&planned), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_plan_directory_relative_to_base() {
        let dir = make_tree();
        let planned = plan_upload(&dir.path().join("sub"), Some(dir.path())).unwrap();
        assert_eq!(keys(&planned), vec!["sub/b.txt"]);
    }

    #[test]
    fn test_plan_single_file() {
        let dir = make_tree();
        let file = dir.path().join("sub").join("b.txt");
        assert_eq!(keys(&plan_upload(&file, None).unwrap()), vec!["b.txt"]);
        assert_eq!(
            keys(&plan_upload(&file, Some(dir.path())).unwrap()),
            vec!["sub/b.txt"]
        );
    }

    #[test]
    fn test_plan_missing_path() {
        let dir = make_tree();
        let err = plan_upload(&dir.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_plan_ignored_single_file() {
        let dir = make_tree();
        assert!(plan_upload(&dir.path().join(".DS_Store"), None).unwrap().is_empty());
    }

    #[test]
    fn test_plan_parent_dir_outside_base() {
        let dir = make_tree();
        fs::create_dir_all(dir.path().join("other")).unwrap();
        fs::write(dir.path().join("other").join("secret.txt"), b"hidden").unwrap();

        let outside = dir.path().join("sub").join("..").join("other");
        let err = plan_upload(&outside, Some(&dir.path().join("sub"))).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_plan_parent_dir_inside_base() {
        let dir = make_tree();
        let sub = dir.path().join("sub").join("..").join("sub");
        let planned = plan_upload(&sub, Some(dir.path())).unwrap();
        assert_eq!(keys(&planned), vec!["sub/b.txt"]);
    }

    #[test]
    fn test_plan_base_not_prefix() {
        let dir = make_tree();
        let other = tempfile::tempdir().unwrap();
        let err = plan_upload(dir.path(), Some(other.path())).unwrap_err();
        assert!(err.is_config());
    }
}
