//! External API clients
//!
//! Stateless request/response wrappers around the weather, currency and
//! image services, plus the formatters that turn their payloads into replies.
//! Every client performs a single attempt per user action.

pub mod currency;
mod http_utils;
pub mod image;
pub mod weather;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use currency::{Conversion, CurrencyQuery, NinjasCurrencyClient};
pub use http_utils::create_http_client;
pub use image::CataasClient;
pub use weather::{Forecast, OpenWeatherClient};

/// Errors that can occur while talking to an upstream API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The call timed out or the host was unreachable
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),
    /// Non-success status or a payload without the expected fields
    #[error("Upstream rejected: {0}")]
    UpstreamRejected(String),
}

/// Current weather lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch the current conditions for a city
    async fn current(&self, city: &str) -> Result<Forecast, ServiceError>;
}

/// Currency conversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyApi: Send + Sync {
    /// Convert `query.amount` of `query.from` into `query.to`
    async fn convert(&self, query: &CurrencyQuery) -> Result<Conversion, ServiceError>;
}

/// Random picture source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageApi: Send + Sync {
    /// Fetch one image as raw bytes
    async fn fetch(&self) -> Result<Bytes, ServiceError>;
}
