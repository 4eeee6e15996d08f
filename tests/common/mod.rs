//! Stub API clients shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use multitool_bot::dialogue::Machine;
use multitool_bot::locale::Locale;
use multitool_bot::services::{
    Conversion, CurrencyApi, CurrencyQuery, Forecast, ImageApi, ServiceError, WeatherApi,
};
use std::sync::{Arc, Mutex};

/// Answers every city with the same forecast and records the requests
#[derive(Default)]
pub struct StubWeather {
    pub cities: Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherApi for StubWeather {
    async fn current(&self, city: &str) -> Result<Forecast, ServiceError> {
        if let Ok(mut cities) = self.cities.lock() {
            cities.push(city.to_string());
        }
        Ok(Forecast {
            temp: 21.4,
            feels_like: 20.6,
            description: "ясно".to_string(),
            wind_speed: 2.5,
        })
    }
}

/// Converts at a fixed rate of one hundredth
pub struct StubCurrency;

#[async_trait]
impl CurrencyApi for StubCurrency {
    async fn convert(&self, query: &CurrencyQuery) -> Result<Conversion, ServiceError> {
        let amount: f64 = query
            .amount
            .parse()
            .map_err(|_| ServiceError::UpstreamRejected("bad amount".to_string()))?;
        Ok(Conversion {
            new_amount: amount / 100.0,
        })
    }
}

/// Image server that is always down
pub struct DownImages;

#[async_trait]
impl ImageApi for DownImages {
    async fn fetch(&self) -> Result<Bytes, ServiceError> {
        Err(ServiceError::NetworkUnavailable("connection refused".to_string()))
    }
}

pub fn machine(locale: Locale) -> Machine {
    machine_with_weather(locale, Arc::new(StubWeather::default()))
}

pub fn machine_with_weather(locale: Locale, weather: Arc<StubWeather>) -> Machine {
    Machine::new(weather, Arc::new(StubCurrency), Arc::new(DownImages), locale)
}
