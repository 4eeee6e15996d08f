//! Random cat picture client

use crate::services::http_utils::get_bytes;
use crate::services::{ImageApi, ServiceError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client as HttpClient;

/// Client for `cataas.com`; the payload is forwarded as-is to the chat
pub struct CataasClient {
    http: HttpClient,
    url: String,
}

impl CataasClient {
    /// Create a client for `url`
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ImageApi for CataasClient {
    async fn fetch(&self) -> Result<Bytes, ServiceError> {
        let bytes = get_bytes(self.http.get(&self.url)).await?;
        if bytes.is_empty() {
            return Err(ServiceError::UpstreamRejected("Empty image".to_string()));
        }
        Ok(bytes)
    }
}
