use std::f32::consts::TAU;

use eframe_sketch::{
    Canvas, DrawingController, ExportFormat, InteractionState, PaintError, PaintResult,
    PixelSnapshot, Tool,
};
use egui::{Color32, Pos2, Vec2, pos2, vec2};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Move(Pos2),
    Line(Pos2),
    Arc { center: Pos2, radius: f32, start: f32, end: f32 },
    Close,
}

/// What ended up on the surface, in paint order
#[derive(Debug, Clone, PartialEq)]
enum Painted {
    Stroke { path: Vec<Segment>, color: Color32, width: f32 },
    Fill { path: Vec<Segment>, color: Color32 },
    StrokeRect { origin: Pos2, size: Vec2, color: Color32 },
    FillRect { origin: Pos2, size: Vec2, color: Color32 },
}

/// Canvas double that keeps the painted operations instead of pixels.
///
/// Snapshots store the visible operation list and hand back its index as the
/// "pixels", so restoring really rewinds what is visible.
#[derive(Default)]
struct RecordingCanvas {
    path: Vec<Segment>,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
    visible: Vec<Painted>,
    saved: Vec<Vec<Painted>>,
    restores: usize,
}

impl RecordingCanvas {
    fn shapes(&self) -> &[Painted] {
        // First entry is always the background
        &self.visible[1..]
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (1, 1)
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.push(Segment::Close);
    }

    fn move_to(&mut self, point: Pos2) {
        self.path.push(Segment::Move(point));
    }

    fn line_to(&mut self, point: Pos2) {
        self.path.push(Segment::Line(point));
    }

    fn arc(&mut self, center: Pos2, radius: f32, start: f32, end: f32) {
        self.path.push(Segment::Arc { center, radius, start, end });
    }

    fn fill(&mut self) {
        self.visible.push(Painted::Fill {
            path: self.path.clone(),
            color: self.fill_color,
        });
    }

    fn stroke(&mut self) {
        self.visible.push(Painted::Stroke {
            path: self.path.clone(),
            color: self.stroke_color,
            width: self.line_width,
        });
    }

    fn stroke_rect(&mut self, origin: Pos2, size: Vec2) {
        self.visible.push(Painted::StrokeRect { origin, size, color: self.stroke_color });
    }

    fn fill_rect(&mut self, origin: Pos2, size: Vec2) {
        self.visible.push(Painted::FillRect { origin, size, color: self.fill_color });
    }

    fn clear_rect(&mut self, _origin: Pos2, _size: Vec2) {
        self.visible.clear();
    }

    fn set_stroke_style(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    fn set_fill_style(&mut self, color: Color32) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn snapshot(&self) -> PixelSnapshot {
        let id = self.saved.len() as u32;
        PixelSnapshot::new(1, 1, id.to_le_bytes().to_vec())
    }

    fn restore(&mut self, snapshot: &PixelSnapshot) -> PaintResult<()> {
        let mut id = [0u8; 4];
        id.copy_from_slice(&snapshot.data()[..4]);
        let id = u32::from_le_bytes(id) as usize;
        self.visible = self.saved[id].clone();
        self.restores += 1;
        Ok(())
    }

    fn encode(&self, _format: ExportFormat) -> PaintResult<Vec<u8>> {
        Ok(vec![0xFF, 0xD8])
    }
}

/// Controller over a recording canvas; `down` files the visible state under the snapshot id
struct Harness {
    controller: DrawingController<RecordingCanvas>,
}

impl Harness {
    fn new() -> Self {
        let mut controller = DrawingController::default();
        controller.initialize(RecordingCanvas::default()).unwrap();
        Self { controller }
    }

    fn canvas(&self) -> &RecordingCanvas {
        self.controller.canvas().unwrap()
    }

    fn down(&mut self, x: f32, y: f32) {
        self.controller.on_pointer_down(pos2(x, y)).unwrap();
        // The snapshot id handed out above is the next free slot
        let canvas = self.controller.canvas_mut().unwrap();
        let visible = canvas.visible.clone();
        canvas.saved.push(visible);
    }

    fn drag(&mut self, x: f32, y: f32) {
        self.controller.on_pointer_move(pos2(x, y)).unwrap();
    }

    fn up(&mut self) {
        self.controller.on_pointer_up();
    }

    fn stroke(&mut self, tool: Tool, from: (f32, f32), moves: &[(f32, f32)]) {
        self.controller.select_tool(tool);
        self.down(from.0, from.1);
        for &(x, y) in moves {
            self.drag(x, y);
        }
        self.up();
    }
}

#[test]
fn test_initialize_paints_white_background() {
    let harness = Harness::new();
    assert_eq!(
        harness.canvas().visible,
        vec![Painted::FillRect {
            origin: Pos2::ZERO,
            size: vec2(1.0, 1.0),
            color: Color32::WHITE,
        }]
    );
    // fill style goes back to the brush color
    assert_eq!(harness.canvas().fill_color, Color32::BLACK);
    assert!(!harness.controller.is_drawing());
}

#[test]
fn test_pointer_down_applies_current_style() {
    let mut harness = Harness::new();
    let red = Color32::from_rgb(0xE0, 0x20, 0x20);
    harness.controller.select_color(red);
    harness.controller.set_brush_width(12).unwrap();
    harness.down(40.0, 30.0);

    let canvas = harness.canvas();
    assert_eq!(canvas.line_width, 12.0);
    assert_eq!(canvas.stroke_color, red);
    assert_eq!(canvas.fill_color, red);
    assert_eq!(canvas.path, vec![Segment::Move(pos2(40.0, 30.0))]);
    assert!(harness.controller.is_drawing());
    assert_eq!(harness.controller.anchor(), Some(pos2(40.0, 30.0)));
    assert_eq!(harness.controller.stroke_state().name(), "Stroking");
}

#[test]
fn test_move_while_idle_is_ignored() {
    let mut harness = Harness::new();
    harness.drag(10.0, 10.0);
    assert_eq!(harness.canvas().restores, 0);
    assert!(harness.canvas().shapes().is_empty());
}

#[test]
fn test_rectangle_spans_pointer_to_anchor() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Rectangle, (40.0, 50.0), &[(10.0, 20.0)]);
    assert_eq!(
        harness.canvas().shapes(),
        &[Painted::StrokeRect {
            origin: pos2(10.0, 20.0),
            size: vec2(30.0, 30.0),
            color: Color32::BLACK,
        }]
    );
}

#[test]
fn test_only_one_shape_preview_is_visible() {
    let mut harness = Harness::new();
    harness.stroke(
        Tool::Rectangle,
        (10.0, 10.0),
        &[(50.0, 50.0), (80.0, 20.0), (30.0, 40.0)],
    );
    assert_eq!(harness.canvas().restores, 3);
    assert_eq!(
        harness.canvas().shapes(),
        &[Painted::StrokeRect {
            origin: pos2(30.0, 40.0),
            size: vec2(-20.0, -30.0),
            color: Color32::BLACK,
        }]
    );
}

#[test]
fn test_fill_toggle_fills_rectangle() {
    let mut harness = Harness::new();
    harness.controller.set_fill_shapes(true);
    harness.stroke(Tool::Rectangle, (0.0, 0.0), &[(5.0, 5.0)]);
    assert!(matches!(harness.canvas().shapes(), [Painted::FillRect { .. }]));
}

#[test]
fn test_circle_radius_and_center() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Circle, (0.0, 0.0), &[(3.0, 4.0)]);
    assert_eq!(
        harness.canvas().shapes(),
        &[Painted::Stroke {
            path: vec![Segment::Arc {
                center: pos2(0.0, 0.0),
                radius: 5.0,
                start: 0.0,
                end: TAU,
            }],
            color: Color32::BLACK,
            width: 5.0,
        }]
    );
}

#[test]
fn test_filled_circle() {
    let mut harness = Harness::new();
    harness.controller.set_fill_shapes(true);
    harness.stroke(Tool::Circle, (10.0, 10.0), &[(10.0, 30.0)]);
    match harness.canvas().shapes() {
        [Painted::Fill { path, .. }] => {
            assert!(matches!(path[..], [Segment::Arc { radius, .. }] if radius == 20.0));
        }
        other => panic!("expected one filled circle, got {other:?}"),
    }
}

#[test]
fn test_triangle_mirrors_pointer_through_anchor() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Triangle, (10.0, 10.0), &[(15.0, 20.0)]);
    match harness.canvas().shapes() {
        [Painted::Stroke { path, .. }] => assert_eq!(
            path,
            &vec![
                Segment::Move(pos2(10.0, 10.0)),
                Segment::Line(pos2(15.0, 20.0)),
                Segment::Line(pos2(5.0, 20.0)),
                Segment::Close,
            ]
        ),
        other => panic!("expected one triangle, got {other:?}"),
    }
}

#[test]
fn test_brush_extends_one_path() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Brush, (100.0, 100.0), &[(150.0, 100.0), (150.0, 150.0)]);
    assert_eq!(
        harness.canvas().shapes(),
        &[Painted::Stroke {
            path: vec![
                Segment::Move(pos2(100.0, 100.0)),
                Segment::Line(pos2(150.0, 100.0)),
                Segment::Line(pos2(150.0, 150.0)),
            ],
            color: Color32::BLACK,
            width: 5.0,
        }]
    );
}

#[test]
fn test_eraser_strokes_background_color() {
    let mut harness = Harness::new();
    harness.controller.select_color(Color32::from_rgb(0x6D, 0xD4, 0x00));
    harness.stroke(Tool::Eraser, (0.0, 0.0), &[(20.0, 0.0)]);
    assert!(matches!(
        harness.canvas().shapes(),
        [Painted::Stroke { color, .. }] if *color == Color32::WHITE
    ));
}

#[test]
fn test_strokes_accumulate_across_pointer_ups() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Rectangle, (0.0, 0.0), &[(10.0, 10.0)]);
    harness.stroke(Tool::Circle, (50.0, 50.0), &[(60.0, 50.0), (70.0, 50.0)]);
    let shapes = harness.canvas().shapes();
    assert_eq!(shapes.len(), 2);
    assert!(matches!(shapes[0], Painted::StrokeRect { .. }));
    assert!(matches!(shapes[1], Painted::Stroke { .. }));
}

#[test]
fn test_pointer_up_commits_and_stops_previews() {
    let mut harness = Harness::new();
    harness.stroke(Tool::Rectangle, (0.0, 0.0), &[(10.0, 10.0)]);
    assert!(!harness.controller.is_drawing());

    harness.drag(99.0, 99.0);
    assert_eq!(harness.canvas().shapes().len(), 1);
    // a stray pointer up while idle stays idle
    harness.up();
    assert!(!harness.controller.is_drawing());
}

#[test]
fn test_second_pointer_down_restarts_at_new_anchor() {
    let mut harness = Harness::new();
    harness.controller.select_tool(Tool::Rectangle);
    harness.down(0.0, 0.0);
    harness.drag(10.0, 10.0);

    // No pointer up in between: the first preview stays, the new anchor takes over
    harness.down(50.0, 50.0);
    assert_eq!(harness.controller.anchor(), Some(pos2(50.0, 50.0)));
    harness.drag(70.0, 80.0);
    harness.drag(60.0, 70.0);
    harness.up();

    assert_eq!(
        harness.canvas().shapes(),
        &[
            Painted::StrokeRect {
                origin: pos2(10.0, 10.0),
                size: vec2(-10.0, -10.0),
                color: Color32::BLACK,
            },
            Painted::StrokeRect {
                origin: pos2(60.0, 70.0),
                size: vec2(-10.0, -20.0),
                color: Color32::BLACK,
            },
        ]
    );
}

#[test]
fn test_clear_keeps_selections() {
    let mut harness = Harness::new();
    let green = Color32::from_rgb(0x6D, 0xD4, 0x00);
    harness.controller.select_color(green);
    harness.controller.set_brush_width(9).unwrap();
    harness.controller.set_fill_shapes(true);
    harness.stroke(Tool::Triangle, (10.0, 10.0), &[(20.0, 20.0)]);
    let before = *harness.controller.interaction();

    harness.controller.clear().unwrap();

    assert!(harness.canvas().shapes().is_empty());
    assert!(matches!(
        harness.canvas().visible[..],
        [Painted::FillRect { color, .. }] if color == Color32::WHITE
    ));
    assert_eq!(*harness.controller.interaction(), before);
    assert_eq!(
        before,
        InteractionState {
            selected_tool: Tool::Triangle,
            selected_color: green,
            brush_width: 9,
            fill_shapes: true,
        }
    );
}

#[test]
fn test_clear_mid_stroke_ends_stroke() {
    let mut harness = Harness::new();
    harness.controller.select_tool(Tool::Rectangle);
    harness.down(0.0, 0.0);
    harness.drag(10.0, 10.0);
    harness.controller.clear().unwrap();
    assert!(!harness.controller.is_drawing());

    harness.drag(20.0, 20.0);
    assert!(harness.canvas().shapes().is_empty());
}

#[test]
fn test_invalid_input_is_rejected_without_state_change() {
    let mut harness = Harness::new();

    assert!(matches!(
        harness.controller.on_pointer_down(pos2(f32::NAN, 1.0)),
        Err(PaintError::InvalidCoordinate { .. })
    ));
    assert!(!harness.controller.is_drawing());

    assert!(matches!(
        harness.controller.set_brush_width(0),
        Err(PaintError::InvalidBrushWidth(0))
    ));
    assert_eq!(harness.controller.interaction().brush_width, 5);

    assert!(matches!(
        harness.controller.select_tool_by_id("spray"),
        Err(PaintError::UnknownTool(_))
    ));
    assert_eq!(harness.controller.interaction().selected_tool, Tool::Brush);
    assert_eq!(harness.controller.select_tool_by_id("circle").unwrap(), Tool::Circle);
}

#[test]
fn test_operations_require_initialization() {
    let mut controller: DrawingController<RecordingCanvas> = DrawingController::default();
    assert!(matches!(
        controller.on_pointer_down(pos2(1.0, 1.0)),
        Err(PaintError::NotInitialized)
    ));
    assert!(matches!(controller.clear(), Err(PaintError::NotInitialized)));
    assert!(matches!(
        controller.export_image(ExportFormat::Jpeg),
        Err(PaintError::NotInitialized)
    ));
}

#[test]
fn test_initialize_only_once() {
    let mut harness = Harness::new();
    assert!(matches!(
        harness.controller.initialize(RecordingCanvas::default()),
        Err(PaintError::AlreadyInitialized { width: 1, height: 1 })
    ));
}

#[test]
fn test_export_names_file_after_timestamp() {
    let harness = Harness::new();
    let image = harness
        .controller
        .export_image_at(ExportFormat::Jpeg, 1_700_000_000_000)
        .unwrap();
    assert_eq!(image.file_name, "1700000000000.jpg");
    assert_eq!((image.width, image.height), (1, 1));
    assert!(image.data_url().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn test_revision_tracks_pixel_changes() {
    let mut harness = Harness::new();
    let start = harness.controller.revision();
    harness.controller.select_tool(Tool::Circle);
    assert_eq!(harness.controller.revision(), start);
    harness.stroke(Tool::Circle, (0.0, 0.0), &[(1.0, 1.0), (2.0, 2.0)]);
    assert_eq!(harness.controller.revision(), start + 2);
}
