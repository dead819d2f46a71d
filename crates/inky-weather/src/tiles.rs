//! Map image sources: OSM slippy tiles and the static map server.

use crate::geolocate::USER_AGENT;
use crate::projection::{pixel_offset_within_tile, tile_for_coordinate};
use crate::types::{Coordinates, WeatherError};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 25;

/// How a fetched image lines up with the map panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPlacement {
    /// Image pixel `(x, y)` is the location and goes at the panel centre.
    /// The renderer marks it with a dot.
    CentredOn { x: u32, y: u32 },
    /// Image already carries its marker; draw from the panel's top-left corner.
    TopLeft,
}

/// Encoded image bytes plus placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MapImage {
    pub bytes: Vec<u8>,
    pub placement: MapPlacement,
}

/// Fetches a map image for a location.
#[allow(async_fn_in_trait)]
pub trait MapSource {
    async fn fetch_map(&self, at: Coordinates, city: &str) -> Result<MapImage, WeatherError>;
}

fn build_client() -> Result<Client, WeatherError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?)
}

async fn fetch_bytes(request: reqwest::RequestBuilder) -> Result<Vec<u8>, WeatherError> {
    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(WeatherError::Connectivity(format!(
            "map returned status {}",
            response.status()
        )));
    }
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(WeatherError::Data("empty map image".to_string()));
    }
    Ok(bytes.to_vec())
}

/// `{base}/{z}/{x}/{y}.png` tile server, OpenStreetMap by default.
#[derive(Debug, Clone)]
pub struct OsmTileSource {
    client: Client,
    base: String,
    zoom: u8,
}

impl OsmTileSource {
    pub fn new(base: impl Into<String>, zoom: u8) -> Result<Self, WeatherError> {
        Ok(Self {
            client: build_client()?,
            base: base.into().trim_end_matches('/').to_string(),
            zoom,
        })
    }

    pub fn tile_url(&self, at: Coordinates) -> String {
        let (x, y) = tile_for_coordinate(at.latitude, at.longitude, self.zoom);
        format!("{}/{}/{}/{}.png", self.base, self.zoom, x, y)
    }
}

impl MapSource for OsmTileSource {
    async fn fetch_map(&self, at: Coordinates, _city: &str) -> Result<MapImage, WeatherError> {
        let url = self.tile_url(at);
        tracing::debug!("Fetching tile {}", url);

        let bytes = fetch_bytes(self.client.get(&url)).await?;
        let (x, y) = pixel_offset_within_tile(at.latitude, at.longitude, self.zoom);
        tracing::debug!("Tile {}B, location at ({}, {})", bytes.len(), x, y);

        Ok(MapImage {
            bytes,
            placement: MapPlacement::CentredOn { x, y },
        })
    }
}

/// Local map server answering `GET /map?lat=..&lon=..&city=..` with a
/// pre-marked image sized for the map panel.
#[derive(Debug, Clone)]
pub struct StaticMapSource {
    client: Client,
    url: String,
}

impl StaticMapSource {
    pub fn new(base: impl Into<String>) -> Result<Self, WeatherError> {
        Ok(Self {
            client: build_client()?,
            url: format!("{}/map", base.into().trim_end_matches('/')),
        })
    }
}

impl MapSource for StaticMapSource {
    async fn fetch_map(&self, at: Coordinates, city: &str) -> Result<MapImage, WeatherError> {
        tracing::debug!("Fetching static map for {}", city);

        let request = self.client.get(&self.url).query(&[
            ("lat", format!("{:.4}", at.latitude)),
            ("lon", format!("{:.4}", at.longitude)),
            ("city", city.to_string()),
        ]);
        let bytes = fetch_bytes(request).await?;

        Ok(MapImage {
            bytes,
            placement: MapPlacement::TopLeft,
        })
    }
}

/// The configured remote map source.
#[derive(Debug, Clone)]
pub enum MapService {
    Tiles(OsmTileSource),
    Server(StaticMapSource),
}

impl MapSource for MapService {
    async fn fetch_map(&self, at: Coordinates, city: &str) -> Result<MapImage, WeatherError> {
        match self {
            MapService::Tiles(source) => source.fetch_map(at, city).await,
            MapService::Server(source) => source.fetch_map(at, city).await,
        }
    }
}
