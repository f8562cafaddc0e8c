//! R2 client implementation using AWS S3 SDK

use crate::config::BucketConfig;
use crate::error::Result;
use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};

/// Object storage operations the sync orchestrators rely on.
///
/// Implemented by [`R2Client`]; tests plug in an in-memory store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket every operation targets
    fn bucket(&self) -> &str;

    /// Fetch object metadata, `None` if the key does not exist
    async fn head_object(&self, key: &str) -> Result<Option<ObjectMetadata>>;

    /// Create or overwrite an object
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// List every object whose key starts with `prefix`
    async fn list_objects(&self, prefix: Option<&str>) -> Result<Vec<ObjectInfo>>;
}

/// R2 client for managing Cloudflare R2 storage
pub struct R2Client {
    client: Client,
    bucket: String,
}

impl R2Client {
    /// Create a new R2 client
    pub async fn new(config: &BucketConfig) -> Result<Self> {
        // Create credentials
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "r2sync",
        );

        // R2 ignores the region but SigV4 needs one
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new("auto"))
            .credentials_provider(credentials)
            .load()
            .await;

        let client = Client::new(&sdk_config);

        tracing::debug!(
            endpoint = %config.endpoint,
            bucket = %config.bucket_name,
            "R2 client ready"
        );

        Ok(Self {
            client,
            bucket: config.bucket_name.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for R2Client {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn head_object(&self, key: &str) -> Result<Option<ObjectMetadata>> {
        match self.client.head_object().bucket(&self.bucket).key(key).send().await {
            Ok(response) => Ok(Some(ObjectMetadata {
                key: key.to_string(),
                size: response.content_length().unwrap_or(0),
                content_type: response.content_type().unwrap_or("").to_string(),
                etag: response.e_tag().unwrap_or("").to_string(),
            })),
            Err(e) => {
                let not_found = e.as_service_error().map(|se| se.is_not_found()).unwrap_or(false)
                    || e.raw_response().map(|r| r.status().as_u16()) == Some(404);
                if not_found {
                    Ok(None)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        match self.client.delete_object().bucket(&self.bucket).key(key).send().await {
            Ok(_) => Ok(()),
            // S3 already answers 204 for missing keys, some backends send 404
            Err(e) if e.raw_response().map(|r| r.status().as_u16()) == Some(404) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_objects(&self, prefix: Option<&str>) -> Result<Vec<ObjectInfo>> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_prefix(prefix.map(|s| s.to_string()))
                .set_continuation_token(continuation_token.take())
                .send()
                .await?;

            objects.extend(response.contents().iter().map(|obj| ObjectInfo {
                key: obj.key().unwrap_or("").to_string(),
                size: obj.size().unwrap_or(0),
                etag: obj.e_tag().unwrap_or("").to_string(),
            }));

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(objects)
    }
}

/// Object information, as returned by a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: i64,
    pub etag: String,
}

/// Object metadata, as returned by HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub key: String,
    pub size: i64,
    pub content_type: String,
    pub etag: String,
}
