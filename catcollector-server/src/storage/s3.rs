//! S3-compatible photo storage over plain HTTP
//!
//! Works against AWS S3, MinIO, or anything that accepts
//! `PUT {endpoint}/{bucket}/{key}`. Auth is an optional bearer token
//! for gateway-style deployments; a public-read bucket needs none.

use async_trait::async_trait;
use reqwest::Client;

use super::{ObjectStore, StoreError};

/// S3-like object store
pub struct S3LikeStore {
    endpoint: String,
    bucket: String,
    bearer_token: Option<String>,
    client: Client,
}

impl S3LikeStore {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            bearer_token: None,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.is_empty());
        self
    }
}

#[async_trait]
impl ObjectStore for S3LikeStore {
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut req = self
            .client
            .put(self.object_url(key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "s3-like put failed: {}",
                resp.status()
            )));
        }

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key.trim_start_matches('/')
        )
    }
}
