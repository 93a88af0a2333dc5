#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod components;
pub mod controller;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod settings;
pub mod tool;
pub mod util;

pub use app::PaintApp;
pub use canvas::{Canvas, PixelSnapshot};
pub use controller::{DrawingController, InteractionState, StrokeState};
pub use error::{PaintError, PaintResult};
pub use export::{ExportFormat, ExportedImage};
pub use input::{InputEvent, InputLocation};
pub use palette::Palette;
pub use raster::RasterCanvas;
pub use settings::PaintSettings;
pub use tool::Tool;
