//! Weather side of the station.
//!
//! City slots, coordinate projection, Open-Meteo forecasts with IP
//! geolocation for the Auto slot, map image sources, and the per-slot cache.

pub mod cache;
pub mod format;
pub mod geolocate;
pub mod projection;
pub mod provider;
pub mod slots;
pub mod tiles;
pub mod types;

pub use cache::{CacheEntry, WeatherCache};
pub use geolocate::{Geolocator, IpApiGeolocator};
pub use projection::{
    compass, dot_on_static_map, pixel_offset_within_tile, tile_for_coordinate, MapBounds,
    PixelBox, TILE_SIZE,
};
pub use provider::{OpenMeteoProvider, WeatherSource};
pub use slots::{CitySlot, CitySlots};
pub use tiles::{MapImage, MapPlacement, MapService, MapSource, OsmTileSource, StaticMapSource};
pub use types::*;
