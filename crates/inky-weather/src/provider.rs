//! Open-Meteo forecast provider.

use crate::geolocate::USER_AGENT;
use crate::types::{Coordinates, Forecast, WeatherError};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum";

/// Anything that can produce a two-day forecast for a position.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    async fn forecast(&self, at: Coordinates) -> Result<Forecast, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Client,
    url: String,
}

impl OpenMeteoProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl WeatherSource for OpenMeteoProvider {
    async fn forecast(&self, at: Coordinates) -> Result<Forecast, WeatherError> {
        tracing::debug!(
            "Fetching forecast for ({:.4}, {:.4})",
            at.latitude,
            at.longitude
        );

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", "2".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Connectivity(format!(
                "forecast returned status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let forecast: Forecast = serde_json::from_slice(&bytes)?;
        Ok(forecast)
    }
}
