//! Deletion of a single object or of everything under a prefix

use crate::client::ObjectStore;
use crate::error::{Error, Result};
use crate::mapper::relative_key;
use std::path::Path;

/// What a delete request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// One object
    Key(String),
    /// Every object whose key starts with this value (always ends in `/`)
    Prefix(String),
}

/// Resolve a delete request.
///
/// Without a base path, `path` is a remote key used verbatim apart from
/// leading and trailing `/`; a trailing `/` marks a prefix. With a base
/// path, `path` is a local path mapped the same way uploads are; a local
/// directory becomes a prefix. The local path does not have to exist anymore.
pub fn resolve_target(path: &str, base_path: Option<&Path>) -> Result<DeleteTarget> {
    let (key, is_prefix) = match base_path {
        None => (path.trim_matches('/').to_string(), path.ends_with('/')),
        Some(base) => {
            let local = Path::new(path);
            let trailing = path.ends_with('/') || path.ends_with('\\');
            (relative_key(local, base)?, trailing || local.is_dir())
        }
    };

    if key.is_empty() {
        return Err(Error::InvalidInput(format!(
            "'{}' does not name an object or prefix (refusing to delete the whole bucket)",
            path
        )));
    }

    Ok(if is_prefix {
        DeleteTarget::Prefix(format!("{}/", key))
    } else {
        DeleteTarget::Key(key)
    })
}

/// Delete `path` from the store.
///
/// A key is deleted only if it exists, so repeating a delete is a no-op. A
/// prefix is listed and every object under it deleted one call at a time;
/// the first failure stops the run and leaves earlier deletions in place.
/// Returns the keys deleted.
pub async fn delete<S>(store: &S, path: &str, base_path: Option<&Path>) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    match resolve_target(path, base_path)? {
        DeleteTarget::Key(key) => delete_key(store, key).await,
        DeleteTarget::Prefix(prefix) => delete_prefix(store, &prefix).await,
    }
}

async fn delete_key<S>(store: &S, key: String) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    if store.head_object(&key).await?.is_none() {
        tracing::info!(key = %key, "not found remotely, nothing to delete");
        return Ok(Vec::new());
    }

    tracing::info!(key = %key, "deleting");
    store.delete_object(&key).await?;
    Ok(vec![key])
}

async fn delete_prefix<S>(store: &S, prefix: &str) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let objects = store.list_objects(Some(prefix)).await?;
    tracing::debug!(prefix, count = objects.len(), "listed objects under prefix");

    let mut deleted = Vec::with_capacity(objects.len());
    for object in objects {
        // Guard against backends that treat the prefix loosely
        if !object.key.starts_with(prefix) {
            continue;
        }
        tracing::info!(key = %object.key, "deleting");
        store.delete_object(&object.key).await?;
        deleted.push(object.key);
    }

    if deleted.is_empty() {
        tracing::info!(prefix, "no objects under prefix");
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_key() {
        assert_eq!(
            resolve_target("img/logo.png", None).unwrap(),
            DeleteTarget::Key("img/logo.png".to_string())
        );
    }

    #[test]
    fn test_remote_prefix() {
        assert_eq!(
            resolve_target("img/", None).unwrap(),
            DeleteTarget::Prefix("img/".to_string())
        );
        assert_eq!(
            resolve_target("/img/icons/", None).unwrap(),
            DeleteTarget::Prefix("img/icons/".to_string())
        );
    }

    #[test]
    fn test_remote_key_keeps_backslashes() {
        assert_eq!(
            resolve_target("a\\b.txt", None).unwrap(),
            DeleteTarget::Key("a\\b.txt".to_string())
        );
        assert_eq!(
            resolve_target("dir\\", None).unwrap(),
            DeleteTarget::Key("dir\\".to_string())
        );
    }

    #[test]
    fn test_local_path_escaping_base_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("site").join("..").join("other");
        let err = resolve_target(outside.to_str().unwrap(), Some(&dir.path().join("site")))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_local_parent_dir_inside_base_folded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("..").join("sub").join("gone.txt");
        assert_eq!(
            resolve_target(path.to_str().unwrap(), Some(dir.path())).unwrap(),
            DeleteTarget::Key("sub/gone.txt".to_string())
        );
    }

    #[test]
    fn test_whole_bucket_rejected() {
        assert!(matches!(resolve_target("/", None), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_target("", None), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_local_path_with_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();

        let file = dir.path().join("sub").join("gone.txt");
        assert_eq!(
            resolve_target(file.to_str().unwrap(), Some(dir.path())).unwrap(),
            DeleteTarget::Key("sub/gone.txt".to_string())
        );

        let sub = dir.path().join("sub");
        assert_eq!(
            resolve_target(sub.to_str().unwrap(), Some(dir.path())).unwrap(),
            DeleteTarget::Prefix("sub/".to_string())
        );
    }

    #[test]
    fn test_local_base_equal_to_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_target(dir.path().to_str().unwrap(), Some(dir.path())).unwrap_err();
        assert!(err.is_config());
    }
}
