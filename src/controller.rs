//! The drawing surface controller.
//!
//! Translates pointer and control events into canvas mutations. Every stroke
//! follows the same preview protocol:
//!
//! ```text
//!   pointer down ──► snapshot canvas ──► Stroking { anchor, snapshot }
//!   pointer move ──► restore snapshot ──► draw current tool at pointer
//!   pointer up   ──► Idle (last preview stays on the canvas)
//! ```
//!
//! Restoring before each redraw means exactly one preview is ever visible.

use std::f32::consts::TAU;

use egui::{Color32, Pos2, Vec2};

use crate::canvas::{Canvas, PixelSnapshot};
use crate::color::BACKGROUND;
use crate::error::{PaintError, PaintResult};
use crate::export::{ExportFormat, ExportedImage};
use crate::geometry::{circle_radius, rect_from_anchor, triangle_vertices};
use crate::settings::{DEFAULT_BRUSH_WIDTH, PaintSettings};
use crate::tool::Tool;
use crate::util::time;

/// The user's current choices. Survives `clear()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub selected_tool: Tool,
    pub selected_color: Color32,
    pub brush_width: u32,
    pub fill_shapes: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            selected_tool: Tool::Brush,
            selected_color: Color32::BLACK,
            brush_width: DEFAULT_BRUSH_WIDTH,
            fill_shapes: false,
        }
    }
}

impl InteractionState {
    pub fn from_settings(settings: &PaintSettings, color: Color32) -> Self {
        Self {
            selected_tool: settings.tool,
            selected_color: color,
            brush_width: settings.brush_width.max(1),
            fill_shapes: settings.fill_shapes,
        }
    }
}

/// Idle between strokes, Stroking from pointer down to pointer up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking {
        anchor: Pos2,
        snapshot: PixelSnapshot,
    },
}

impl StrokeState {
    pub fn name(&self) -> &'static str {
        match self {
            StrokeState::Idle => "Idle",
            StrokeState::Stroking { .. } => "Stroking",
        }
    }
}

/// Owns the interaction state and the canvas it draws on.
///
/// The canvas is created by `initialize`, so the controller can exist before
/// the host knows how large the drawing area is.
pub struct DrawingController<C: Canvas> {
    canvas: Option<C>,
    interaction: InteractionState,
    stroke: StrokeState,
    revision: u64,
}

impl<C: Canvas> Default for DrawingController<C> {
    fn default() -> Self {
        Self::new(InteractionState::default())
    }
}

impl<C: Canvas> DrawingController<C> {
    pub fn new(interaction: InteractionState) -> Self {
        Self {
            canvas: None,
            interaction,
            stroke: StrokeState::Idle,
            revision: 0,
        }
    }

    /// Take ownership of a freshly sized canvas and paint the background.
    ///
    /// Only the first call is accepted; the canvas never resizes afterwards.
    pub fn initialize(&mut self, canvas: C) -> PaintResult<()> {
        if let Some(existing) = &self.canvas {
            let (width, height) = existing.size();
            return Err(PaintError::AlreadyInitialized { width, height });
        }
        let (width, height) = canvas.size();
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }

        let canvas = self.canvas.insert(canvas);
        paint_background(canvas, self.interaction.selected_color);
        self.revision += 1;
        log::info!("Canvas initialized at {}x{}", width, height);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.canvas.as_ref().map(Canvas::size)
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn stroke_state(&self) -> &StrokeState {
        &self.stroke
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.stroke, StrokeState::Stroking { .. })
    }

    pub fn anchor(&self) -> Option<Pos2> {
        match &self.stroke {
            StrokeState::Stroking { anchor, .. } => Some(*anchor),
            StrokeState::Idle => None,
        }
    }

    /// Bumped on every pixel mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn on_pointer_down(&mut self, pos: Pos2) -> PaintResult<()> {
        validate_position(pos)?;
        let interaction = self.interaction;
        let canvas = self.canvas.as_mut().ok_or(PaintError::NotInitialized)?;

        canvas.begin_path();
        canvas.move_to(pos);
        canvas.set_line_width(interaction.brush_width as f32);
        canvas.set_stroke_style(interaction.selected_color);
        canvas.set_fill_style(interaction.selected_color);
        let snapshot = canvas.snapshot();

        if self.is_drawing() {
            log::debug!("Pointer down while stroking, restarting stroke at {:?}", pos);
        }
        self.stroke = StrokeState::Stroking { anchor: pos, snapshot };
        log::debug!("Stroke started with {} at {:?}", interaction.selected_tool, pos);
        Ok(())
    }

    /// Redraw the preview of the current tool at `pos`. Ignored while idle.
    pub fn on_pointer_move(&mut self, pos: Pos2) -> PaintResult<()> {
        validate_position(pos)?;
        let StrokeState::Stroking { anchor, snapshot } = &self.stroke else {
            return Ok(());
        };
        let canvas = self.canvas.as_mut().ok_or(PaintError::NotInitialized)?;

        canvas.restore(snapshot)?;
        let interaction = &self.interaction;
        match interaction.selected_tool {
            Tool::Brush => draw_freehand(canvas, interaction.selected_color, pos),
            Tool::Eraser => draw_freehand(canvas, BACKGROUND, pos),
            Tool::Rectangle => draw_rectangle(canvas, *anchor, pos, interaction.fill_shapes),
            Tool::Circle => draw_circle(canvas, *anchor, pos, interaction.fill_shapes),
            Tool::Triangle => draw_triangle(canvas, *anchor, pos, interaction.fill_shapes),
        }
        self.revision += 1;
        Ok(())
    }

    /// End the stroke, keeping whatever the last move drew
    pub fn on_pointer_up(&mut self) {
        if let StrokeState::Stroking { anchor, .. } = std::mem::take(&mut self.stroke) {
            log::debug!("Stroke anchored at {:?} committed", anchor);
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.interaction.selected_tool != tool {
            log::debug!("Tool selected: {} -> {}", self.interaction.selected_tool, tool);
        }
        self.interaction.selected_tool = tool;
    }

    pub fn select_tool_by_id(&mut self, id: &str) -> PaintResult<Tool> {
        let tool = id.parse::<Tool>()?;
        self.select_tool(tool);
        Ok(tool)
    }

    pub fn select_color(&mut self, color: Color32) {
        log::debug!("Color selected: {:?}", color);
        self.interaction.selected_color = color;
    }

    pub fn set_brush_width(&mut self, width: u32) -> PaintResult<()> {
        if width == 0 {
            log::warn!("Rejected brush width {}", width);
            return Err(PaintError::InvalidBrushWidth(width));
        }
        self.interaction.brush_width = width;
        Ok(())
    }

    pub fn set_fill_shapes(&mut self, fill: bool) {
        self.interaction.fill_shapes = fill;
    }

    /// Wipe every pixel and repaint the background. Selections are kept.
    pub fn clear(&mut self) -> PaintResult<()> {
        let canvas = self.canvas.as_mut().ok_or(PaintError::NotInitialized)?;
        let (width, height) = canvas.size();
        canvas.clear_rect(Pos2::ZERO, Vec2::new(width as f32, height as f32));
        paint_background(canvas, self.interaction.selected_color);

        // A live snapshot would bring the cleared pixels back on the next move
        self.stroke = StrokeState::Idle;
        self.revision += 1;
        log::info!("Canvas cleared");
        Ok(())
    }

    /// Encode the canvas, named after the current time
    pub fn export_image(&self, format: ExportFormat) -> PaintResult<ExportedImage> {
        self.export_image_at(format, time::timestamp_millis())
    }

    pub fn export_image_at(
        &self,
        format: ExportFormat,
        timestamp_ms: u64,
    ) -> PaintResult<ExportedImage> {
        let canvas = self.canvas.as_ref().ok_or(PaintError::NotInitialized)?;
        let (width, height) = canvas.size();
        let bytes = canvas.encode(format)?;
        let file_name = ExportedImage::file_name_for(timestamp_ms, format);
        log::info!("Exported {} ({}x{}, {} bytes)", file_name, width, height, bytes.len());
        Ok(ExportedImage {
            file_name,
            format,
            width,
            height,
            bytes,
        })
    }
}

fn validate_position(pos: Pos2) -> PaintResult<()> {
    if pos.x.is_finite() && pos.y.is_finite() {
        Ok(())
    } else {
        log::warn!("Rejected pointer position {:?}", pos);
        Err(PaintError::InvalidCoordinate { x: pos.x, y: pos.y })
    }
}

/// Fill the whole canvas white, then hand the fill style back to the brush color
fn paint_background<C: Canvas>(canvas: &mut C, brush_color: Color32) {
    let (width, height) = canvas.size();
    canvas.set_fill_style(BACKGROUND);
    canvas.fill_rect(Pos2::ZERO, Vec2::new(width as f32, height as f32));
    canvas.set_fill_style(brush_color);
}

fn fill_or_stroke<C: Canvas>(canvas: &mut C, fill: bool) {
    if fill {
        canvas.fill();
    } else {
        canvas.stroke();
    }
}

// Brush and eraser grow one path for the whole stroke and re-stroke all of it
fn draw_freehand<C: Canvas>(canvas: &mut C, color: Color32, pos: Pos2) {
    canvas.set_stroke_style(color);
    canvas.line_to(pos);
    canvas.stroke();
}

fn draw_rectangle<C: Canvas>(canvas: &mut C, anchor: Pos2, pos: Pos2, fill: bool) {
    let (origin, size) = rect_from_anchor(anchor, pos);
    if fill {
        canvas.fill_rect(origin, size);
    } else {
        canvas.stroke_rect(origin, size);
    }
}

fn draw_circle<C: Canvas>(canvas: &mut C, anchor: Pos2, pos: Pos2, fill: bool) {
    canvas.begin_path();
    canvas.arc(anchor, circle_radius(anchor, pos), 0.0, TAU);
    fill_or_stroke(canvas, fill);
}

fn draw_triangle<C: Canvas>(canvas: &mut C, anchor: Pos2, pos: Pos2, fill: bool) {
    let [apex, corner, mirrored] = triangle_vertices(anchor, pos);
    canvas.begin_path();
    canvas.move_to(apex);
    canvas.line_to(corner);
    canvas.line_to(mirrored);
    canvas.close_path();
    fill_or_stroke(canvas, fill);
}
