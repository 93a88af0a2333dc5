use std::io::Cursor;

use egui::{Color32, Pos2, Vec2, pos2};
use image::{DynamicImage, RgbaImage};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PremultipliedColorU8, Stroke,
    Transform,
};

use crate::canvas::{Canvas, PixelSnapshot};
use crate::error::{PaintError, PaintResult};
use crate::export::ExportFormat;
use crate::geometry::{flatten_arc, normalized_rect};

/// HTML canvas default miter limit
const MITER_LIMIT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathOp {
    MoveTo(Pos2),
    LineTo(Pos2),
    CubicTo(Pos2, Pos2, Pos2),
    Close,
}

/// CPU raster canvas backed by a `tiny-skia` pixmap.
pub struct RasterCanvas {
    pixmap: Pixmap,
    path: Vec<PathOp>,
    current_point: Option<Pos2>,
    subpath_start: Option<Pos2>,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("path_ops", &self.path.len())
            .field("stroke_color", &self.stroke_color)
            .field("fill_color", &self.fill_color)
            .field("line_width", &self.line_width)
            .finish()
    }
}

impl RasterCanvas {
    /// Create a fully transparent canvas; callers paint the background.
    pub fn new(width: u32, height: u32) -> PaintResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(PaintError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            path: Vec::new(),
            current_point: None,
            subpath_start: None,
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            line_width: 1.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Straight-alpha color of one pixel, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        // tiny-skia only checks the flat index, so x past the edge would wrap
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Premultiplied pixels, ready for an egui texture
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }

    /// Straight-alpha copy of the pixels
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut raw = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let color = pixel.demultiply();
            raw.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        // Length always matches the pixmap dimensions
        RgbaImage::from_raw(self.width(), self.height(), raw)
            .unwrap_or_else(|| RgbaImage::new(self.width(), self.height()))
    }

    fn push(&mut self, op: PathOp) {
        self.path.push(op);
    }

    fn build_path(&self) -> Option<Path> {
        let mut builder = PathBuilder::new();
        for op in &self.path {
            match *op {
                PathOp::MoveTo(p) => builder.move_to(p.x, p.y),
                PathOp::LineTo(p) => builder.line_to(p.x, p.y),
                PathOp::CubicTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathOp::Close => builder.close(),
            }
        }
        builder.finish()
    }

    fn paint_for(color: Color32) -> Paint<'static> {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn stroke_options(&self) -> Stroke {
        Stroke {
            width: self.line_width,
            miter_limit: MITER_LIMIT,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Stroke::default()
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current_point = None;
        self.subpath_start = None;
    }

    fn close_path(&mut self) {
        if let Some(start) = self.subpath_start {
            self.push(PathOp::Close);
            self.current_point = Some(start);
        }
    }

    fn move_to(&mut self, point: Pos2) {
        self.push(PathOp::MoveTo(point));
        self.current_point = Some(point);
        self.subpath_start = Some(point);
    }

    fn line_to(&mut self, point: Pos2) {
        if self.current_point.is_none() {
            self.move_to(point);
            return;
        }
        self.push(PathOp::LineTo(point));
        self.current_point = Some(point);
    }

    fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) {
        let (sin, cos) = start_angle.sin_cos();
        let start = pos2(center.x + radius * cos, center.y + radius * sin);
        self.line_to(start);

        for segment in flatten_arc(center, radius, start_angle, end_angle) {
            self.push(PathOp::CubicTo(segment.ctrl1, segment.ctrl2, segment.to));
            self.current_point = Some(segment.to);
        }
    }

    fn fill(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        let paint = Self::paint_for(self.fill_color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        let paint = Self::paint_for(self.stroke_color);
        let stroke = self.stroke_options();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn stroke_rect(&mut self, origin: Pos2, size: Vec2) {
        let rect = normalized_rect(origin, size);
        if rect.width() == 0.0 && rect.height() == 0.0 {
            return;
        }

        // A separate path: stroke_rect leaves the current path alone
        let mut builder = PathBuilder::new();
        builder.move_to(rect.min.x, rect.min.y);
        builder.line_to(rect.max.x, rect.min.y);
        builder.line_to(rect.max.x, rect.max.y);
        builder.line_to(rect.min.x, rect.max.y);
        builder.close();
        let Some(path) = builder.finish() else {
            return;
        };

        let paint = Self::paint_for(self.stroke_color);
        let stroke = self.stroke_options();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill_rect(&mut self, origin: Pos2, size: Vec2) {
        let rect = normalized_rect(origin, size);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let Some(rect) =
            tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
        else {
            return;
        };
        let paint = Self::paint_for(self.fill_color);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn clear_rect(&mut self, origin: Pos2, size: Vec2) {
        let rect = normalized_rect(origin, size);
        let width = self.width() as usize;
        let x0 = rect.min.x.floor().clamp(0.0, self.width() as f32) as usize;
        let x1 = rect.max.x.ceil().clamp(0.0, self.width() as f32) as usize;
        let y0 = rect.min.y.floor().clamp(0.0, self.height() as f32) as usize;
        let y1 = rect.max.y.ceil().clamp(0.0, self.height() as f32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let pixels = self.pixmap.pixels_mut();
        for y in y0..y1 {
            pixels[y * width + x0..y * width + x1].fill(PremultipliedColorU8::TRANSPARENT);
        }
    }

    fn set_stroke_style(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    fn set_fill_style(&mut self, color: Color32) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        // Same as the 2D context: non-positive and non-finite widths are ignored
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn snapshot(&self) -> PixelSnapshot {
        PixelSnapshot::new(self.width(), self.height(), self.pixmap.data().to_vec())
    }

    fn restore(&mut self, snapshot: &PixelSnapshot) -> PaintResult<()> {
        if snapshot.size() != self.size() {
            return Err(PaintError::SnapshotMismatch {
                expected: self.size(),
                found: snapshot.size(),
            });
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.data());
        Ok(())
    }

    fn encode(&self, format: ExportFormat) -> PaintResult<Vec<u8>> {
        let rgba = DynamicImage::ImageRgba8(self.to_rgba_image());
        let image = if format.supports_alpha() {
            rgba
        } else {
            DynamicImage::ImageRgb8(rgba.to_rgb8())
        };

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
        Ok(bytes)
    }
}
