//! Panel side of the station: layout, dashboard assembly and rendering
//! for the 296x128 monochrome E-Ink display.

pub mod dashboard;
pub mod error;
pub mod layout;
pub mod outline;
pub mod panel;
pub mod render;

pub use dashboard::{Dashboard, Header, MapView, ModeMarker, MonoBitmap, Readings};
pub use error::DisplayError;
pub use panel::{FrameBuffer, MemoryPanel, Panel, PngPanel};
pub use render::{render_dashboard, render_error, render_splash};
