//! Paints a [`Dashboard`] or a full-screen message onto any monochrome draw target.

use crate::dashboard::{Dashboard, Header, MapView, Readings};
use crate::layout::*;
use crate::outline;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Polyline, Rectangle};
use embedded_graphics::text::Text;
use inky_weather::Coordinates;

const NO_DATA: &str = "No data";

/// Draw a complete frame. The target is cleared first.
pub fn render_dashboard<D>(dashboard: &Dashboard, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(PAPER)?;

    // map first, clipped so tiles can't bleed into the left panel
    draw_map(&dashboard.map, &mut target.clipped(&MAP_RECT))?;

    draw_header(&dashboard.header, target)?;
    match &dashboard.readings {
        Some(readings) => draw_readings(readings, target)?,
        None => {
            Text::with_text_style(NO_DATA, NO_DATA_POS, LARGE_INK, TOP_LEFT).draw(target)?;
        }
    }

    Line::new(PANEL_DIVIDER_START, PANEL_DIVIDER_END)
        .into_styled(LINE)
        .draw(target)?;
    Line::new(BOTTOM_BORDER_START, BOTTOM_BORDER_END)
        .into_styled(LINE)
        .draw(target)?;
    Ok(())
}

/// "Connecting..." and similar one-line screens.
pub fn render_splash<D>(message: &str, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(PAPER)?;
    Text::with_text_style(message, SPLASH_POS, SMALL_INK, TOP_LEFT).draw(target)?;
    Ok(())
}

/// Large-font failure screen, e.g. "WiFi Failed!".
pub fn render_error<D>(message: &str, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(PAPER)?;
    Text::with_text_style(message, ERROR_POS, LARGE_INK, TOP_LEFT).draw(target)?;
    Ok(())
}

fn draw_header<D>(header: &Header, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, HEADER_HEIGHT))
        .into_styled(HEADER_FILL)
        .draw(target)?;
    Text::with_text_style(&header.city, CITY_POS, SMALL_PAPER, TOP_LEFT).draw(target)?;
    Text::with_text_style(&header.marker, MARKER_POS, SMALL_PAPER, TOP_LEFT).draw(target)?;
    Text::with_text_style(&header.timestamp, TIMESTAMP_POS, SMALL_PAPER, TOP_RIGHT)
        .draw(target)?;
    Ok(())
}

fn draw_readings<D>(r: &Readings, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_text_style(&r.temperature, TEMP_POS, LARGE_INK, TOP_LEFT).draw(target)?;

    let small = [
        (r.desc.as_str(), DESC_POS),
        (r.today_range.as_str(), TODAY_RANGE_POS),
        (r.wind.as_str(), WIND_POS),
        (r.rain_today.as_str(), RAIN_TODAY_POS),
        ("Tmr", TOMORROW_POS),
        (r.rain_tomorrow.as_str(), RAIN_TOMORROW_POS),
        (r.tomorrow_desc.as_str(), TOMORROW_DESC_POS),
        (r.tomorrow_range.as_str(), TOMORROW_RANGE_POS),
    ];
    for (text, pos) in small {
        Text::with_text_style(text, pos, SMALL_INK, TOP_LEFT).draw(target)?;
    }

    Line::new(DAY_DIVIDER_START, DAY_DIVIDER_END)
        .into_styled(LINE)
        .draw(target)?;
    Ok(())
}

fn draw_map<D>(map: &MapView, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    match map {
        MapView::Image { bitmap, marked } => {
            target.draw_iter(bitmap.pixels())?;
            if *marked {
                draw_location_dot(target)?;
            }
        }
        MapView::Outline { dot, label } => draw_outline(*dot, label, target)?,
        MapView::Crosshair { coordinates } => draw_crosshair(*coordinates, target)?,
        MapView::Blank => {}
    }
    Ok(())
}

fn draw_location_dot<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(MAP_CENTRE, 11)
        .into_styled(INK_FILL)
        .draw(target)?;
    Circle::with_center(MAP_CENTRE, 5)
        .into_styled(PAPER_FILL)
        .draw(target)?;
    Ok(())
}

fn draw_outline<D>(dot: Point, label: &str, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let coast = outline::coastline(&MAP_BOX, MAP_PADDING);
    Polyline::new(&coast).into_styled(LINE).draw(target)?;

    for p in outline::reference_points(&MAP_BOX, MAP_PADDING) {
        Circle::with_center(p, 5).into_styled(INK_FILL).draw(target)?;
    }

    // target marker: short cross under a ringed dot
    Line::new(dot - Point::new(8, 0), dot + Point::new(8, 0))
        .into_styled(LINE)
        .draw(target)?;
    Line::new(dot - Point::new(0, 8), dot + Point::new(0, 8))
        .into_styled(LINE)
        .draw(target)?;
    Circle::with_center(dot, 11).into_styled(INK_FILL).draw(target)?;
    Circle::with_center(dot, 7).into_styled(PAPER_FILL).draw(target)?;
    Circle::with_center(dot, 3).into_styled(INK_FILL).draw(target)?;

    // label right of the dot unless that runs off the panel, above unless near the top
    let width = label.chars().count() as i32 * SMALL_FONT.character_size.width as i32;
    let x = if dot.x < MAP_X + MAP_W - 30 {
        dot.x + 7
    } else {
        dot.x - width - 7
    };
    let y = if dot.y > MAP_Y + 15 { dot.y - 11 } else { dot.y + 7 };
    let origin = Point::new(x, y);

    Rectangle::new(
        origin - Point::new(1, 1),
        Size::new(width as u32 + 2, SMALL_FONT.character_size.height + 1),
    )
    .into_styled(PAPER_FILL)
    .draw(target)?;
    Text::with_text_style(label, origin, SMALL_INK, TOP_LEFT).draw(target)?;
    Ok(())
}

fn draw_crosshair<D>(at: Coordinates, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(MAP_CENTRE, 51)
        .into_styled(LINE)
        .draw(target)?;
    Line::new(MAP_CENTRE - Point::new(30, 0), MAP_CENTRE + Point::new(30, 0))
        .into_styled(LINE)
        .draw(target)?;
    Line::new(MAP_CENTRE - Point::new(0, 30), MAP_CENTRE + Point::new(0, 30))
        .into_styled(LINE)
        .draw(target)?;
    Circle::with_center(MAP_CENTRE, 9)
        .into_styled(INK_FILL)
        .draw(target)?;
    Circle::with_center(MAP_CENTRE, 5)
        .into_styled(PAPER_FILL)
        .draw(target)?;

    let text = format!("{:.2}N {:.2}E", at.latitude, at.longitude);
    Text::with_text_style(&text, CROSSHAIR_LABEL_POS, SMALL_INK, TOP_LEFT).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{ModeMarker, MonoBitmap};
    use crate::panel::FrameBuffer;
    use inky_weather::WeatherSnapshot;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Cambridge".to_string(),
            coordinates: Coordinates::new(52.2053, 0.1218),
            temp: 12,
            desc: "Overcast",
            wind_dir: "W",
            wind_speed: 18,
            today_high: 14,
            today_low: 8,
            tomorrow_high: 11,
            tomorrow_low: 5,
            tomorrow_desc: "Lt Rain",
            rain_today: "0.5mm".to_string(),
            rain_tomorrow: "2.1mm".to_string(),
            observed: "22/2 08:00".to_string(),
        }
    }

    fn ink_in(frame: &FrameBuffer, area: Rectangle) -> usize {
        area.points().filter(|&p| frame.pixel(p) == Some(INK)).count()
    }

    #[test]
    fn test_frame_chrome() {
        let snap = snapshot();
        let dash = Dashboard::assemble("Cambridge", Some(&snap), ModeMarker::Auto, MapView::Blank);
        let mut frame = FrameBuffer::new();
        render_dashboard(&dash, &mut frame).unwrap();

        // header bar is solid ink apart from text
        assert_eq!(frame.pixel(Point::new(0, 0)), Some(INK));
        assert_eq!(frame.pixel(Point::new(295, 13)), Some(INK));
        // dividers and border
        assert_eq!(frame.pixel(Point::new(148, 60)), Some(INK));
        assert_eq!(frame.pixel(Point::new(200, 127)), Some(INK));
        assert_eq!(frame.pixel(Point::new(70, 84)), Some(INK));
        // blank map stays paper
        assert_eq!(ink_in(&frame, Rectangle::new(Point::new(149, 14), Size::new(147, 113))), 0);
        // temperature drawn
        assert!(ink_in(&frame, Rectangle::new(TEMP_POS, Size::new(40, 20))) > 0);
    }

    #[test]
    fn test_no_data_placeholder() {
        let dash = Dashboard::assemble("Leeds", None, ModeMarker::Auto, MapView::Blank);
        let mut frame = FrameBuffer::new();
        render_dashboard(&dash, &mut frame).unwrap();

        assert!(ink_in(&frame, Rectangle::new(NO_DATA_POS, Size::new(70, 20))) > 0);
        // nothing below the placeholder
        assert_eq!(ink_in(&frame, Rectangle::new(Point::new(0, 86), Size::new(147, 40))), 0);
    }

    #[test]
    fn test_tile_does_not_bleed_into_left_panel() {
        let bitmap_bytes = {
            let img = image::GrayImage::from_fn(256, 256, |_, _| image::Luma([0]));
            let mut out = std::io::Cursor::new(Vec::new());
            img.write_to(&mut out, image::ImageFormat::Png).unwrap();
            out.into_inner()
        };
        let bitmap = MonoBitmap::decode(&bitmap_bytes, Point::new(0, 0)).unwrap();
        let dash = Dashboard::assemble(
            "Auto",
            None,
            ModeMarker::Auto,
            MapView::Image {
                bitmap,
                marked: true,
            },
        );
        let mut frame = FrameBuffer::new();
        render_dashboard(&dash, &mut frame).unwrap();

        // the all-ink tile reaches x = 255 but is clipped to the map panel
        assert_eq!(frame.pixel(Point::new(200, 100)), Some(INK));
        assert_eq!(frame.pixel(Point::new(20, 110)), Some(PAPER));
        // dot has a paper centre
        assert_eq!(frame.pixel(MAP_CENTRE), Some(PAPER));
    }

    #[test]
    fn test_crosshair() {
        let dash = Dashboard::assemble(
            "Auto",
            None,
            ModeMarker::Auto,
            MapView::crosshair(Coordinates::new(52.2, 0.12)),
        );
        let mut frame = FrameBuffer::new();
        render_dashboard(&dash, &mut frame).unwrap();

        assert_eq!(frame.pixel(MAP_CENTRE + Point::new(28, 0)), Some(INK));
        assert_eq!(frame.pixel(MAP_CENTRE - Point::new(0, 28)), Some(INK));
        assert_eq!(frame.pixel(MAP_CENTRE), Some(PAPER));
        assert!(ink_in(&frame, Rectangle::new(CROSSHAIR_LABEL_POS, Size::new(80, 10))) > 0);
    }

    #[test]
    fn test_outline_map() {
        let dash = Dashboard::assemble(
            "Edinburgh",
            None,
            ModeMarker::Manual {
                index: 9,
                presets: 10,
            },
            MapView::outline(Coordinates::new(55.9533, -3.1883), "Edinburgh"),
        );
        let mut frame = FrameBuffer::new();
        render_dashboard(&dash, &mut frame).unwrap();

        let MapView::Outline { dot, .. } = dash.map else {
            panic!("expected outline");
        };
        assert_eq!(frame.pixel(dot), Some(INK));
        assert!(ink_in(&frame, MAP_RECT) > 100);
    }

    #[test]
    fn test_error_screen() {
        let mut frame = FrameBuffer::new();
        render_error("WiFi Failed!", &mut frame).unwrap();
        assert!(ink_in(&frame, Rectangle::new(ERROR_POS, Size::new(120, 20))) > 0);
        assert_eq!(ink_in(&frame, Rectangle::new(Point::zero(), Size::new(296, 40))), 0);

        render_splash("Connecting...", &mut frame).unwrap();
        assert!(ink_in(&frame, Rectangle::new(SPLASH_POS, Size::new(78, 10))) > 0);
        assert_eq!(ink_in(&frame, Rectangle::new(ERROR_POS + Point::new(0, 16), Size::new(120, 4))), 0);
    }
}
