//! Object store collaborators.
//!
//! The handler talks to storage through the [`ObjectStore`] trait so tests
//! can substitute an in-memory double for the real S3 client.

use crate::error::StorageError;
use anyhow::anyhow;
use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use std::collections::HashMap;
use std::sync::Mutex;

/// The two storage operations this relay consumes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>)
        -> Result<(), StorageError>;
}

/// S3-backed store.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    inner: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        match self.inner.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => {
                let body = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| anyhow!("failed to read object body: {}", e))?;
                Ok(body.into_bytes().to_vec())
            },
            Err(SdkError::ServiceError(service_err)) => match service_err.err() {
                GetObjectError::NoSuchKey(_) => Err(StorageError::NotFound(format!(
                    "object not found for key:{key}"
                ))),
                _ => Err(StorageError::Service(anyhow!(
                    "failed to get object from S3: {:?}",
                    service_err
                ))),
            },
            Err(err) => Err(StorageError::Service(anyhow!(
                "failed to get object from S3: {}",
                err
            ))),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        match self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type("application/json")
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => Err(StorageError::Service(anyhow!(
                "failed to put object to S3: {}",
                err
            ))),
        }
    }
}

/// In-memory store with S3 overwrite semantics. Test double, also handy for
/// dry runs without credentials.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct insert, bypassing the trait. Used to seed test fixtures.
    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    /// Direct read, bypassing the trait. Used to assert on written output.
    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.get(bucket, key)
            .ok_or_else(|| StorageError::NotFound(format!("object not found for key:{key}")))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.insert(bucket, key, bytes);
        Ok(())
    }
}
