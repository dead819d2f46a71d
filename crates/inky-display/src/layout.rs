//! Fixed positions on the 296x128 panel.
//!
//! Header:      y = 0..13    full width, black background
//! Left panel:  x = 0..147,  y = 14..127  today + tomorrow
//! Right panel: x = 148..295, y = 14..127  map, 148 x 113 px
//! Divider:     x = 148,     y = 14..127

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use inky_weather::PixelBox;

pub const SCREEN_WIDTH: u32 = 296;
pub const SCREEN_HEIGHT: u32 = 128;

/// Black ink on white paper.
pub const INK: BinaryColor = BinaryColor::On;
pub const PAPER: BinaryColor = BinaryColor::Off;

pub const HEADER_HEIGHT: u32 = 14;
/// Weather readings take the left half, the map the right.
pub const MAP_X: i32 = (SCREEN_WIDTH / 2) as i32;
pub const MAP_Y: i32 = 14;
pub const MAP_W: i32 = 148;
pub const MAP_H: i32 = 113;
pub const MAP_CENTRE: Point = Point::new(MAP_X + MAP_W / 2, MAP_Y + MAP_H / 2);
pub const MAP_BOX: PixelBox = PixelBox {
    x: MAP_X,
    y: MAP_Y,
    width: MAP_W,
    height: MAP_H,
};
pub const MAP_RECT: Rectangle = Rectangle::new(
    Point::new(MAP_X, MAP_Y),
    Size::new(MAP_W as u32, MAP_H as u32),
);
/// Inset applied when placing points on the outline map.
pub const MAP_PADDING: i32 = 6;

/// Longest city name that fits the header beside the marker and clock.
pub const CITY_MAX_CHARS: usize = 14;

// header
pub const CITY_POS: Point = Point::new(3, 2);
pub const MARKER_POS: Point = Point::new(96, 2);
pub const TIMESTAMP_POS: Point = Point::new(293, 2);

// left panel, today
pub const TEMP_POS: Point = Point::new(4, 17);
pub const DESC_POS: Point = Point::new(4, 40);
pub const TODAY_RANGE_POS: Point = Point::new(4, 51);
pub const WIND_POS: Point = Point::new(4, 62);
pub const RAIN_TODAY_POS: Point = Point::new(4, 73);
pub const NO_DATA_POS: Point = Point::new(4, 40);

pub const DAY_DIVIDER_START: Point = Point::new(4, 84);
pub const DAY_DIVIDER_END: Point = Point::new(143, 84);

// left panel, tomorrow
pub const TOMORROW_POS: Point = Point::new(4, 88);
pub const RAIN_TOMORROW_POS: Point = Point::new(40, 88);
pub const TOMORROW_DESC_POS: Point = Point::new(4, 101);
pub const TOMORROW_RANGE_POS: Point = Point::new(4, 113);

pub const PANEL_DIVIDER_START: Point = Point::new(MAP_X, MAP_Y);
pub const PANEL_DIVIDER_END: Point = Point::new(MAP_X, SCREEN_HEIGHT as i32 - 1);
pub const BOTTOM_BORDER_START: Point = Point::new(0, SCREEN_HEIGHT as i32 - 1);
pub const BOTTOM_BORDER_END: Point = Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1);

pub const CROSSHAIR_LABEL_POS: Point = Point::new(MAP_X + 2, MAP_Y + MAP_H - 14);

// full-screen messages
pub const SPLASH_POS: Point = Point::new(10, 55);
pub const ERROR_POS: Point = Point::new(8, 50);

pub const SMALL_FONT: &MonoFont<'static> = &FONT_6X10;
pub const LARGE_FONT: &MonoFont<'static> = &FONT_10X20;

pub const SMALL_INK: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(SMALL_FONT, INK);
pub const SMALL_PAPER: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(SMALL_FONT, PAPER);
pub const LARGE_INK: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(LARGE_FONT, INK);

pub const TOP_LEFT: TextStyle = TextStyleBuilder::new().baseline(Baseline::Top).build();
pub const TOP_RIGHT: TextStyle = TextStyleBuilder::new()
    .baseline(Baseline::Top)
    .alignment(Alignment::Right)
    .build();

pub const HEADER_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(INK);
pub const LINE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(INK, 1);
pub const INK_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(INK);
pub const PAPER_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(PAPER);
