//! Simplified Great Britain outline for drawing a static base map offline.

use embedded_graphics::prelude::Point;
use inky_weather::{dot_on_static_map, MapBounds, PixelBox};

/// Coastline as (lon, lat), clockwise from the south-west tip.
pub const GREAT_BRITAIN: [(f64, f64); 53] = [
    (-5.71, 50.07),
    (-5.20, 49.96),
    (-4.20, 50.06),
    (-3.39, 50.22),
    (-2.08, 50.61),
    (-1.85, 50.80),
    (-0.99, 50.84),
    (0.22, 50.90),
    (1.40, 51.13),
    (1.35, 51.35),
    (0.55, 51.47),
    (0.21, 52.01),
    (1.75, 52.49),
    (1.64, 52.99),
    (0.34, 53.74),
    (-0.09, 53.83),
    (-0.19, 54.10),
    (-1.74, 54.46),
    (-2.06, 55.01),
    (-1.44, 55.02),
    (-1.28, 55.12),
    (-1.77, 55.54),
    (-2.04, 55.96),
    (-2.19, 56.47),
    (-3.18, 56.51),
    (-3.47, 56.66),
    (-2.63, 57.06),
    (-2.05, 57.33),
    (-2.22, 57.77),
    (-2.44, 58.29),
    (-3.09, 58.64),
    (-4.10, 58.53),
    (-5.00, 58.67),
    (-5.18, 58.15),
    (-5.63, 57.86),
    (-5.81, 57.38),
    (-5.93, 56.88),
    (-6.16, 56.43),
    (-5.14, 55.75),
    (-4.80, 55.60),
    (-5.09, 55.18),
    (-4.97, 54.66),
    (-3.11, 53.73),
    (-3.07, 53.42),
    (-3.07, 53.11),
    (-4.73, 52.84),
    (-4.73, 52.49),
    (-5.08, 51.73),
    (-4.10, 51.55),
    (-3.10, 51.30),
    (-2.52, 51.17),
    (-1.60, 51.00),
    (-5.71, 50.07),
];

/// Cities marked on every outline map as (lat, lon).
pub const REFERENCE_CITIES: [(f64, f64); 4] = [
    (51.51, -0.13),  // London
    (53.48, -2.24),  // Manchester
    (55.86, -4.25),  // Glasgow
    (53.80, -1.55),  // Leeds
];

/// Place a coordinate on the outline map drawn in `pixel_box`.
pub fn place(lat: f64, lon: f64, pixel_box: &PixelBox, padding: i32) -> Point {
    let (x, y) = dot_on_static_map(lat, lon, &MapBounds::GREAT_BRITAIN, pixel_box, padding);
    Point::new(x, y)
}

/// Coastline vertices in screen space.
pub fn coastline(pixel_box: &PixelBox, padding: i32) -> Vec<Point> {
    GREAT_BRITAIN
        .iter()
        .map(|&(lon, lat)| place(lat, lon, pixel_box, padding))
        .collect()
}

pub fn reference_points(pixel_box: &PixelBox, padding: i32) -> Vec<Point> {
    REFERENCE_CITIES
        .iter()
        .map(|&(lat, lon)| place(lat, lon, pixel_box, padding))
        .collect()
}
