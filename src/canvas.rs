use egui::{Color32, Pos2, Vec2};

use crate::error::PaintResult;
use crate::export::ExportFormat;

/// A full copy of the canvas pixels, premultiplied RGBA, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelSnapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

// Custom Debug so test failures don't dump megabytes of pixels
impl std::fmt::Debug for PixelSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PixelSnapshot {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The immediate-mode 2D drawing capability the controller drives.
///
/// Mirrors an HTML canvas 2D context: a current path, a stroke style, a fill
/// style and a line width live inside the canvas and are applied by the
/// painting calls. Rectangles take an origin and a size that may be negative.
pub trait Canvas {
    /// Pixel dimensions, fixed for the lifetime of the canvas
    fn size(&self) -> (u32, u32);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, point: Pos2);

    /// Without a current point this behaves like `move_to`
    fn line_to(&mut self, point: Pos2);

    /// Clockwise arc, angles in radians; connected to the current point by a line
    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32);

    /// Paint the current path's interior with the fill style
    fn fill(&mut self);

    /// Paint the current path's outline with the stroke style and line width
    fn stroke(&mut self);

    fn stroke_rect(&mut self, origin: Pos2, size: Vec2);
    fn fill_rect(&mut self, origin: Pos2, size: Vec2);

    /// Reset the pixels in the rect to transparent
    fn clear_rect(&mut self, origin: Pos2, size: Vec2);

    fn set_stroke_style(&mut self, color: Color32);
    fn set_fill_style(&mut self, color: Color32);
    fn set_line_width(&mut self, width: f32);

    fn snapshot(&self) -> PixelSnapshot;
    fn restore(&mut self, snapshot: &PixelSnapshot) -> PaintResult<()>;

    /// Encode the current pixels as an image file
    fn encode(&self, format: ExportFormat) -> PaintResult<Vec<u8>>;

    /// `data:<mime>;base64,...` of the encoded image
    fn to_data_url(&self, format: ExportFormat) -> PaintResult<String> {
        let bytes = self.encode(format)?;
        Ok(format.data_url(&bytes))
    }
}
