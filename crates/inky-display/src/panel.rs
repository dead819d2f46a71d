//! Render sinks: an in-memory frame buffer and panels built on it.

use crate::error::DisplayError;
use crate::layout::{INK, PAPER, SCREEN_HEIGHT, SCREEN_WIDTH};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use image::{GrayImage, ImageFormat, Luma};
use std::convert::Infallible;
use std::path::{Path, PathBuf};

/// A drawable E-Ink panel. Drawing only touches a local buffer and can't
/// fail; `update` pushes the buffer to the glass.
pub trait Panel: DrawTarget<Color = BinaryColor, Error = Infallible> {
    fn update(&mut self) -> Result<(), DisplayError>;
}

/// 296x128 one-bit frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<BinaryColor>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![PAPER; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    fn index(point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * SCREEN_WIDTH as usize + x as usize)
    }

    /// Colour at `point`, `None` off-screen.
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        Self::index(point).and_then(|i| self.pixels.get(i).copied())
    }

    /// Greyscale copy with ink as black.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(SCREEN_WIDTH, SCREEN_HEIGHT, |x, y| {
            let ink = self.pixel(Point::new(x as i32, y as i32)) == Some(INK);
            Luma([if ink { 0 } else { 255 }])
        })
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = Self::index(point).and_then(|i| self.pixels.get_mut(i)) {
                *slot = color;
            }
        }
        Ok(())
    }
}

/// Panel that writes each update to a PNG file.
#[derive(Debug)]
pub struct PngPanel {
    frame: FrameBuffer,
    path: PathBuf,
}

impl PngPanel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            frame: FrameBuffer::new(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OriginDimensions for PngPanel {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl DrawTarget for PngPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels)
    }
}

impl Panel for PngPanel {
    fn update(&mut self) -> Result<(), DisplayError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.frame
            .to_image()
            .save_with_format(&self.path, ImageFormat::Png)?;
        tracing::debug!("Panel written to {}", self.path.display());
        Ok(())
    }
}

/// Panel that keeps every flushed frame in memory.
#[derive(Debug, Default)]
pub struct MemoryPanel {
    frame: FrameBuffer,
    flushed: Vec<FrameBuffer>,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self) -> usize {
        self.flushed.len()
    }

    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.flushed.last()
    }
}

impl OriginDimensions for MemoryPanel {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl DrawTarget for MemoryPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels)
    }
}

impl Panel for MemoryPanel {
    fn update(&mut self) -> Result<(), DisplayError> {
        self.flushed.push(self.frame.clone());
        Ok(())
    }
}
