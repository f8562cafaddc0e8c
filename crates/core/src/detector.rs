//! Change detection by comparing the local MD5 digest with the remote ETag
//!
//! For objects written with a single PUT, R2 and S3 report the MD5 of the
//! content as the ETag. Multipart uploads report `<md5-of-md5s>-<parts>`
//! instead, which can never equal a plain digest, so such objects are always
//! considered changed and get re-uploaded.

use crate::client::ObjectStore;
use crate::error::Result;
use md5::{Digest, Md5};
use std::path::{Path, PathBuf};

/// A local file ready for upload
#[derive(Debug, Clone)]
pub struct LocalEntry {
    pub path: PathBuf,
    pub key: String,
    pub content: Vec<u8>,
    /// Lowercase hex MD5 of `content`
    pub digest: String,
}

impl LocalEntry {
    /// Build an entry from bytes already in memory
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, content: Vec<u8>) -> Self {
        let digest = md5_hex(&content);
        Self {
            path: path.into(),
            key: key.into(),
            content,
            digest,
        }
    }

    /// Read `path` fully and hash it
    pub async fn load(path: &Path, key: impl Into<String>) -> Result<Self> {
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(path, key, content))
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Lowercase hex MD5 digest of `data`
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// Strip the quotes storage APIs put around ETags and lowercase the rest
pub fn normalize_etag(etag: &str) -> String {
    let etag = etag.trim();
    let etag = etag.strip_prefix("W/").unwrap_or(etag);
    etag.trim_matches('"').to_ascii_lowercase()
}

/// Whether the ETag comes from a multipart upload
pub fn is_multipart_etag(etag: &str) -> bool {
    normalize_etag(etag).contains('-')
}

/// Whether `etag` reports the same content as the local `digest`
pub fn etag_matches(etag: &str, digest: &str) -> bool {
    normalize_etag(etag) == digest.to_ascii_lowercase()
}

/// Decide whether `entry` has to be uploaded.
///
/// True when the key is missing remotely or its ETag differs from the local
/// digest.
pub async fn needs_upload<S>(store: &S, entry: &LocalEntry) -> Result<bool>
where
    S: ObjectStore + ?Sized,
{
    let remote = match store.head_object(&entry.key).await? {
        Some(remote) => remote,
        None => {
            tracing::debug!(key = %entry.key, "not found remotely");
            return Ok(true);
        }
    };

    if etag_matches(&remote.etag, &entry.digest) {
        return Ok(false);
    }

    if is_multipart_etag(&remote.etag) {
        tracing::debug!(
            key = %entry.key,
            etag = %remote.etag,
            "multipart ETag cannot be compared with a content digest"
        );
    } else {
        tracing::debug!(
            key = %entry.key,
            local = %entry.digest,
            remote = %normalize_etag(&remote.etag),
            "digest mismatch"
        );
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ObjectInfo, ObjectMetadata};
    use async_trait::async_trait;

    /// Store holding at most one object, with a fixed ETag
    struct OneObject(Option<ObjectMetadata>);

    #[async_trait]
    impl ObjectStore for OneObject {
        fn bucket(&self) -> &str {
            "test-bucket"
        }

        async fn head_object(&self, key: &str) -> Result<Option<ObjectMetadata>> {
            Ok(self.0.clone().filter(|m| m.key == key))
        }

        async fn put_object(&self, _key: &str, _body: Vec<u8>, _content_type: &str) -> Result<()> {
            unreachable!("detector never writes")
        }

        async fn delete_object(&self, _key: &str) -> Result<()> {
            unreachable!("detector never deletes")
        }

        async fn list_objects(&self, _prefix: Option<&str>) -> Result<Vec<ObjectInfo>> {
            Ok(Vec::new())
        }
    }

    fn remote(key: &str, etag: &str) -> OneObject {
        OneObject(Some(ObjectMetadata {
            key: key.to_string(),
            size: 5,
            content_type: "text/plain".to_string(),
            etag: etag.to_string(),
        }))
    }

    #[test]
    fn test_md5_hex() {
        assert_eq!(md5_hex(b"hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_normalize_etag() {
        assert_eq!(
            normalize_etag("\"5D41402ABC4B2A76B9719D911017C592\""),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(normalize_etag("W/\"abc\""), "abc");
        assert_eq!(normalize_etag("abc"), "abc");
    }

    #[test]
    fn test_multipart_etag() {
        assert!(is_multipart_etag("\"d41d8cd98f00b204e9800998ecf8427e-3\""));
        assert!(!is_multipart_etag("\"d41d8cd98f00b204e9800998ecf8427e\""));
        assert!(!etag_matches(
            "\"5d41402abc4b2a76b9719d911017c592-2\"",
            "5d41402abc4b2a76b9719d911017c592"
        ));
    }

    #[test]
    fn test_missing_remote_needs_upload() {
        let store = OneObject(None);
        let entry = LocalEntry::new("a.txt", "a.txt", b"hello".to_vec());
        assert!(tokio_test::block_on(needs_upload(&store, &entry)).unwrap());
    }

    #[test]
    fn test_matching_etag_skips_upload() {
        let store = remote("a.txt", "\"5d41402abc4b2a76b9719d911017c592\"");
        let entry = LocalEntry::new("a.txt", "a.txt", b"hello".to_vec());
        assert!(!tokio_test::block_on(needs_upload(&store, &entry)).unwrap());
    }

    #[test]
    fn test_changed_content_needs_upload() {
        let store = remote("a.txt", "\"5d41402abc4b2a76b9719d911017c592\"");
        let entry = LocalEntry::new("a.txt", "a.txt", b"hello, world".to_vec());
        assert!(tokio_test::block_on(needs_upload(&store, &entry)).unwrap());
    }

    #[test]
    fn test_multipart_remote_needs_upload() {
        let store = remote("a.txt", "\"5d41402abc4b2a76b9719d911017c592-2\"");
        let entry = LocalEntry::new("a.txt", "a.txt", b"hello".to_vec());
        assert!(tokio_test::block_on(needs_upload(&store, &entry)).unwrap());
    }

    #[tokio::test]
    async fn test_load_hashes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello").unwrap();

        let entry = LocalEntry::load(&path, "a.txt").await.unwrap();
        assert_eq!(entry.digest, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(entry.size(), 5);
    }
}
