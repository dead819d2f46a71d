//! Turns a cache entry plus map output into the text and shapes to draw.

use crate::error::DisplayError;
use crate::layout::{CITY_MAX_CHARS, INK, MAP_BOX, MAP_CENTRE, MAP_PADDING, MAP_X, MAP_Y, PAPER};
use crate::outline;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use inky_weather::format::TIMESTAMP_PLACEHOLDER;
use inky_weather::{Coordinates, MapImage, MapPlacement, WeatherSnapshot};
use std::fmt;

/// Grey levels below this become ink.
const INK_THRESHOLD: u8 = 192;

/// Which mode the header advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMarker {
    Auto,
    /// `index` of `presets` named cities; Auto counts as 0.
    Manual { index: usize, presets: usize },
}

impl fmt::Display for ModeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeMarker::Auto => write!(f, "AUTO"),
            ModeMarker::Manual { index, presets } => write!(f, "{}/{}", index, presets),
        }
    }
}

/// A decoded map image reduced to one bit per pixel, positioned on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    origin: Point,
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl MonoBitmap {
    /// Decode PNG or JPEG bytes and threshold to ink/paper.
    pub fn decode(bytes: &[u8], origin: Point) -> Result<Self, DisplayError> {
        let gray = image::load_from_memory(bytes)?.to_luma8();
        let (width, height) = gray.dimensions();
        let ink = gray.pixels().map(|p| p.0[0] < INK_THRESHOLD).collect();

        Ok(Self {
            origin,
            width,
            height,
            ink,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Every pixel of the image in screen coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        let width = self.width.max(1) as usize;
        self.ink.iter().enumerate().map(move |(i, &ink)| {
            let offset = Point::new((i % width) as i32, (i / width) as i32);
            Pixel(self.origin + offset, if ink { INK } else { PAPER })
        })
    }
}

/// What the right-hand panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MapView {
    /// Fetched image. `marked` images get a location dot at the panel centre.
    Image { bitmap: MonoBitmap, marked: bool },
    /// Locally drawn Great Britain outline with the location at `dot`.
    Outline { dot: Point, label: String },
    /// No map available; show a crosshair and the raw position.
    Crosshair { coordinates: Coordinates },
    /// Nothing known about the location yet.
    Blank,
}

impl MapView {
    /// Decode a fetched image, falling back to the crosshair if it won't decode.
    pub fn from_image(image: &MapImage, coordinates: Coordinates) -> Self {
        let (origin, marked) = match image.placement {
            MapPlacement::CentredOn { x, y } => {
                (MAP_CENTRE - Point::new(x as i32, y as i32), true)
            }
            MapPlacement::TopLeft => (Point::new(MAP_X, MAP_Y), false),
        };

        match MonoBitmap::decode(&image.bytes, origin) {
            Ok(bitmap) => {
                tracing::debug!("Decoded map {:?} at {:?}", bitmap.size(), origin);
                MapView::Image { bitmap, marked }
            }
            Err(e) => {
                tracing::warn!("Map image unusable, drawing crosshair: {}", e);
                MapView::Crosshair { coordinates }
            }
        }
    }

    pub fn outline(coordinates: Coordinates, city: &str) -> Self {
        MapView::Outline {
            dot: outline::place(
                coordinates.latitude,
                coordinates.longitude,
                &MAP_BOX,
                MAP_PADDING,
            ),
            label: city.chars().take(10).collect(),
        }
    }

    pub fn crosshair(coordinates: Coordinates) -> Self {
        MapView::Crosshair { coordinates }
    }
}

/// Text for the header bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub city: String,
    pub marker: String,
    pub timestamp: String,
}

/// Text for the left panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings {
    pub temperature: String,
    pub desc: String,
    pub today_range: String,
    pub wind: String,
    pub rain_today: String,
    pub rain_tomorrow: String,
    pub tomorrow_desc: String,
    pub tomorrow_range: String,
}

impl Readings {
    fn from_snapshot(s: &WeatherSnapshot) -> Self {
        Self {
            temperature: format!("{}C", s.temp),
            desc: s.desc.to_string(),
            today_range: format!("H:{}  L:{}", s.today_high, s.today_low),
            wind: format!("{} {}km/h", s.wind_dir, s.wind_speed),
            rain_today: format!("Rain {}", s.rain_today),
            rain_tomorrow: format!("Rain {}", s.rain_tomorrow),
            tomorrow_desc: s.tomorrow_desc.to_string(),
            tomorrow_range: format!("H:{}  L:{}", s.tomorrow_high, s.tomorrow_low),
        }
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub header: Header,
    /// `None` when the slot has never been fetched.
    pub readings: Option<Readings>,
    pub map: MapView,
}

impl Dashboard {
    pub fn assemble(
        slot_label: &str,
        snapshot: Option<&WeatherSnapshot>,
        marker: ModeMarker,
        map: MapView,
    ) -> Self {
        let city = snapshot.map_or(slot_label, |s| s.city.as_str());
        let header = Header {
            city: city.chars().take(CITY_MAX_CHARS).collect(),
            marker: marker.to_string(),
            timestamp: snapshot
                .map_or(TIMESTAMP_PLACEHOLDER, |s| s.observed.as_str())
                .to_string(),
        };

        Self {
            header,
            readings: snapshot.map(Readings::from_snapshot),
            map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Newcastle upon Tyne".to_string(),
            coordinates: Coordinates::new(54.9783, -1.6178),
            temp: -2,
            desc: "Lt Snow",
            wind_dir: "NE",
            wind_speed: 23,
            today_high: 1,
            today_low: -4,
            tomorrow_high: 3,
            tomorrow_low: -1,
            tomorrow_desc: "Overcast",
            rain_today: "1.2mm".to_string(),
            rain_tomorrow: "--".to_string(),
            observed: "14/1 07:30".to_string(),
        }
    }

    fn png(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Vec<u8> {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([f(x, y)]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_marker_text() {
        assert_eq!(ModeMarker::Auto.to_string(), "AUTO");
        assert_eq!(
            ModeMarker::Manual {
                index: 2,
                presets: 10
            }
            .to_string(),
            "2/10"
        );
    }

    #[test]
    fn test_assemble_with_snapshot() {
        let snap = snapshot();
        let dash = Dashboard::assemble("Newcastle", Some(&snap), ModeMarker::Auto, MapView::Blank);

        assert_eq!(dash.header.city, "Newcastle upon");
        assert_eq!(dash.header.timestamp, "14/1 07:30");
        assert_eq!(dash.header.marker, "AUTO");

        let r = dash.readings.unwrap();
        assert_eq!(r.temperature, "-2C");
        assert_eq!(r.desc, "Lt Snow");
        assert_eq!(r.today_range, "H:1  L:-4");
        assert_eq!(r.wind, "NE 23km/h");
        assert_eq!(r.rain_today, "Rain 1.2mm");
        assert_eq!(r.rain_tomorrow, "Rain --");
        assert_eq!(r.tomorrow_desc, "Overcast");
        assert_eq!(r.tomorrow_range, "H:3  L:-1");
    }

    #[test]
    fn test_assemble_without_snapshot() {
        let dash = Dashboard::assemble(
            "Auto",
            None,
            ModeMarker::Manual {
                index: 0,
                presets: 10,
            },
            MapView::Blank,
        );
        assert_eq!(dash.header.city, "Auto");
        assert_eq!(dash.header.timestamp, "--/-- --:--");
        assert!(dash.readings.is_none());
    }

    #[test]
    fn test_tile_is_centred_on_location() {
        let image = MapImage {
            bytes: png(256, 256, |_, _| 255),
            placement: MapPlacement::CentredOn { x: 100, y: 40 },
        };
        let view = MapView::from_image(&image, Coordinates::new(52.2, 0.12));
        match view {
            MapView::Image { bitmap, marked } => {
                assert!(marked);
                assert_eq!(bitmap.origin(), Point::new(122, 30));
                assert_eq!(bitmap.size(), Size::new(256, 256));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_static_map_at_panel_corner() {
        let image = MapImage {
            bytes: png(148, 108, |x, _| if x < 10 { 0 } else { 255 }),
            placement: MapPlacement::TopLeft,
        };
        let view = MapView::from_image(&image, Coordinates::new(52.2, 0.12));
        let MapView::Image { bitmap, marked } = view else {
            panic!("expected image");
        };
        assert!(!marked);
        assert_eq!(bitmap.origin(), Point::new(148, 14));

        let first: Vec<_> = bitmap.pixels().take(11).collect();
        assert_eq!(first[0], Pixel(Point::new(148, 14), INK));
        assert_eq!(first[9], Pixel(Point::new(157, 14), INK));
        assert_eq!(first[10], Pixel(Point::new(158, 14), PAPER));
    }

    #[test]
    fn test_undecodable_image_falls_back_to_crosshair() {
        let image = MapImage {
            bytes: b"<html>rate limited</html>".to_vec(),
            placement: MapPlacement::CentredOn { x: 0, y: 0 },
        };
        let at = Coordinates::new(51.5, -0.12);
        assert_eq!(MapView::from_image(&image, at), MapView::Crosshair { coordinates: at });
    }

    #[test]
    fn test_outline_dot_inside_map() {
        let MapView::Outline { dot, label } =
            MapView::outline(Coordinates::new(52.2053, 0.1218), "Cambridgeshire")
        else {
            panic!("expected outline");
        };
        assert_eq!(label, "Cambridges");
        assert!(dot.x > MAP_X + MAP_PADDING && dot.x < MAP_X + 148 - MAP_PADDING);
        assert!(dot.y > MAP_Y + MAP_PADDING && dot.y < MAP_Y + 113 - MAP_PADDING);
    }
}
