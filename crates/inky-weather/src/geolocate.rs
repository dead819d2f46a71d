//! IP geolocation: where is the station right now?
//! Uses ip-api.com - free, no API key required.

use crate::types::{Coordinates, GeoFix, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;
pub(crate) const USER_AGENT: &str = concat!("inky-station/", env!("CARGO_PKG_VERSION"));

/// Resolves the station's own position.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn locate(&self) -> Result<GeoFix, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

/// ip-api.com JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpApiGeolocator {
    client: Client,
    url: String,
}

impl IpApiGeolocator {
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

impl Geolocator for IpApiGeolocator {
    async fn locate(&self) -> Result<GeoFix, WeatherError> {
        tracing::debug!("Geolocating via {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Connectivity(format!(
                "geolocation returned status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let body: IpApiResponse = serde_json::from_slice(&bytes)?;

        if body.status.as_deref() == Some("fail") {
            return Err(WeatherError::Data(format!(
                "geolocation failed: {}",
                body.message.unwrap_or_default()
            )));
        }

        let (Some(lat), Some(lon), Some(city)) = (body.lat, body.lon, body.city) else {
            return Err(WeatherError::Data(
                "geolocation response missing lat/lon/city".to_string(),
            ));
        };

        tracing::info!("Geolocated to {} ({:.4}, {:.4})", city, lat, lon);
        Ok(GeoFix {
            coordinates: Coordinates::new(lat, lon),
            city,
        })
    }
}
