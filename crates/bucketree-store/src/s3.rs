//! AWS S3 client.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use bucketree_core::{BucketConfig, BucketError, StoreOperation};

use crate::contract::ObjectStore;

/// Object store backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Build a client from a credential record. A custom endpoint switches
    /// to path-style addressing, which S3-compatible services expect.
    pub fn connect(config: &BucketConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "bucketree",
        );

        let mut builder = Builder::new()
            .behavior_version_latest()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = config
            .endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            builder = builder
                .endpoint_url(endpoint.to_string())
                .force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, BucketError> {
        debug!(bucket, "listing objects");
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| BucketError::transport(StoreOperation::List, err))?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, BucketError> {
        debug!(bucket, key, "fetching object");
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| BucketError::transport(StoreOperation::Get, err))?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| BucketError::transport(StoreOperation::Get, err))?
            .into_bytes();

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn put_object(&self, bucket: &str, key: &str, content: &str) -> Result<(), BucketError> {
        debug!(bucket, key, bytes = content.len(), "putting object");
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(content.as_bytes().to_vec()));

        // Directory placeholders are empty objects with no content type.
        if !content.is_empty() {
            request = request.content_type("text/plain");
        }

        request
            .send()
            .await
            .map(|_| ())
            .map_err(|err| BucketError::transport(StoreOperation::Put, err))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BucketError> {
        debug!(bucket, key, "deleting object");
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| BucketError::transport(StoreOperation::Delete, err))
    }
}
