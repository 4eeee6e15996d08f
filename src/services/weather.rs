//! `OpenWeatherMap` current weather client and formatter

use crate::locale::{Locale, Texts};
use crate::services::http_utils::get_json;
use crate::services::{ServiceError, WeatherApi};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

/// Current conditions in a city
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// Air temperature
    pub temp: f64,
    /// Perceived temperature
    pub feels_like: f64,
    /// Human readable conditions, already localized by the API
    pub description: String,
    /// Wind speed
    pub wind_speed: f64,
}

#[derive(Deserialize)]
struct WeatherPayload {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
}

#[derive(Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Deserialize)]
struct WindBlock {
    speed: f64,
}

impl TryFrom<WeatherPayload> for Forecast {
    type Error = ServiceError;

    fn try_from(payload: WeatherPayload) -> Result<Self, Self::Error> {
        let description = payload
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| ServiceError::UpstreamRejected("Empty weather list".to_string()))?;

        Ok(Self {
            temp: payload.main.temp,
            feels_like: payload.main.feels_like,
            description,
            wind_speed: payload.wind.speed,
        })
    }
}

/// Client for the `OpenWeatherMap` current weather endpoint
pub struct OpenWeatherClient {
    http: HttpClient,
    url: String,
    api_key: String,
    lang: &'static str,
    units: String,
}

impl OpenWeatherClient {
    /// Create a client for `url` authenticated with `api_key`
    #[must_use]
    pub fn new(
        http: HttpClient,
        url: impl Into<String>,
        api_key: impl Into<String>,
        locale: Locale,
        units: impl Into<String>,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            lang: locale.code(),
            units: units.into(),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<Forecast, ServiceError> {
        debug!(city = %city, "Requesting current weather");
        let request = self.http.get(&self.url).query(&[
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("lang", self.lang),
            ("units", self.units.as_str()),
        ]);
        let payload: WeatherPayload = get_json(request).await?;
        Forecast::try_from(payload)
    }
}

/// Render a forecast as four lines: temperature, feels like, conditions, wind.
///
/// Temperatures are truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_forecast(forecast: &Forecast, texts: &Texts) -> String {
    format!(
        "{}: {} °C\n{}: {} °C\n{}: {}\n{}: {} {}",
        texts.weather_temp,
        forecast.temp.trunc() as i64,
        texts.weather_feels_like,
        forecast.feels_like.trunc() as i64,
        texts.weather_condition,
        forecast.description,
        texts.weather_wind,
        forecast.wind_speed,
        texts.wind_unit,
    )
}
