//! HTTP utilities shared by the API clients

use crate::services::ServiceError;
use bytes::Bytes;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 300;

/// Creates an HTTP client with the given request timeout.
#[must_use]
pub fn create_http_client(timeout_secs: u64) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends the request and decodes a JSON body into `T`.
///
/// # Errors
///
/// Returns `ServiceError::NetworkUnavailable` on connectivity issues and
/// `ServiceError::UpstreamRejected` on non-success status codes or when the
/// body does not match `T`.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ServiceError> {
    let response = send_checked(request).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::UpstreamRejected(format!("Malformed payload: {e}")))
}

/// Sends the request and returns the raw body.
///
/// # Errors
///
/// Same classification as [`get_json`].
pub async fn get_bytes(request: RequestBuilder) -> Result<Bytes, ServiceError> {
    let response = send_checked(request).await?;
    response
        .bytes()
        .await
        .map_err(|e| ServiceError::NetworkUnavailable(e.to_string()))
}

async fn send_checked(request: RequestBuilder) -> Result<Response, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::NetworkUnavailable(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = crate::utils::truncate_str(body.trim(), MAX_ERROR_BODY);
        return Err(ServiceError::UpstreamRejected(format!("{status} - {body}")));
    }

    Ok(response)
}
