//! Coordinate projection: Web-Mercator slippy tiles, the static base map, and
//! compass bearings. Everything here is pure.
//!
//! The Mercator functions are undefined at the poles (tan/sec blow up);
//! callers must not pass |lat| close to 90°.

use std::f64::consts::PI;

/// Edge length of a slippy-map tile in pixels.
pub const TILE_SIZE: u32 = 256;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Fractional tile coordinates at `zoom`.
fn mercator(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let n = 2f64.powi(i32::from(zoom));
    let lat_rad = lat.to_radians();
    let x = (lon + 180.0) / 360.0 * n;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    (x, y)
}

/// Tile index containing the coordinate, clamped to the `2^zoom` tiles per axis.
pub fn tile_for_coordinate(lat: f64, lon: f64, zoom: u8) -> (u32, u32) {
    let (x, y) = mercator(lat, lon, zoom);
    let last = 2f64.powi(i32::from(zoom)) - 1.0;
    let index = |v: f64| v.floor().clamp(0.0, last) as u32;
    (index(x), index(y))
}

/// Pixel position of the coordinate inside its tile, each component in `[0, 256)`.
pub fn pixel_offset_within_tile(lat: f64, lon: f64, zoom: u8) -> (u32, u32) {
    let (x, y) = mercator(lat, lon, zoom);
    let scale = |v: f64| (((v - v.floor()) * f64::from(TILE_SIZE)) as u32).min(TILE_SIZE - 1);
    (scale(x), scale(y))
}

/// Geographic extent of a static base map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl MapBounds {
    /// Bounding box of the Great Britain outline map.
    pub const GREAT_BRITAIN: MapBounds = MapBounds {
        lat_min: 49.8,
        lat_max: 60.9,
        lon_min: -6.5,
        lon_max: 2.1,
    };
}

/// Screen rectangle a static map is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Where a coordinate lands on a static map, clamped to the padded box.
///
/// North is up, so Y grows as latitude falls. Anything outside `bounds`
/// saturates to the nearest edge.
pub fn dot_on_static_map(
    lat: f64,
    lon: f64,
    bounds: &MapBounds,
    pixel_box: &PixelBox,
    padding: i32,
) -> (i32, i32) {
    let inner_w = f64::from(pixel_box.width - 2 * padding);
    let inner_h = f64::from(pixel_box.height - 2 * padding);

    let fx = (lon - bounds.lon_min) / (bounds.lon_max - bounds.lon_min) * inner_w;
    let fy = (bounds.lat_max - lat) / (bounds.lat_max - bounds.lat_min) * inner_h;

    let left = pixel_box.x + padding;
    let top = pixel_box.y + padding;
    let right = pixel_box.x + pixel_box.width - padding;
    let bottom = pixel_box.y + pixel_box.height - padding;

    // clamp in float space first so huge offsets can't wrap
    let x = (f64::from(left) + fx.trunc()).clamp(f64::from(left), f64::from(right));
    let y = (f64::from(top) + fy.trunc()).clamp(f64::from(top), f64::from(bottom));
    (x as i32, y as i32)
}

/// 8-point compass label for a bearing in degrees. 0 and 360 are both `"N"`.
pub fn compass(bearing: f64) -> &'static str {
    let sector = ((bearing.rem_euclid(360.0) + 22.5) / 45.0) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}
