use egui::{Context, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Offset from the canvas' top-left corner
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events in canvas-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Pointer moved, with or without the primary button held
    PointerMove { location: InputLocation, primary_down: bool },
    /// Primary button was released
    PointerUp { location: InputLocation },
}

/// Handles converting raw egui input into canvas `InputEvent`s
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Survives the pointer leaving the window, for late releases
    last_known_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            last_known_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. once the layout is known)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Creates an InputLocation from a screen position
    pub fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: (screen_pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(screen_pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| {
            let pos = input.pointer.interact_pos().or(input.pointer.hover_pos());
            self.translate(
                pos,
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_down(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
            )
        })
    }

    /// One frame of pointer state to events: moves first, then press, then release
    pub fn translate(
        &mut self,
        pos: Option<Pos2>,
        pressed: bool,
        down: bool,
        released: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let Some(pos) = pos else {
            self.last_pointer_pos = None;
            // A release off-window still ends the stroke
            if released {
                let last = self.last_known_pos.unwrap_or(self.canvas_rect.min);
                events.push(InputEvent::PointerUp {
                    location: self.make_location(last),
                });
            }
            return events;
        };

        if Some(pos) != self.last_pointer_pos {
            events.push(InputEvent::PointerMove {
                location: self.make_location(pos),
                primary_down: down,
            });
        }
        self.last_pointer_pos = Some(pos);
        self.last_known_pos = Some(pos);

        if pressed {
            events.push(InputEvent::PointerDown {
                location: self.make_location(pos),
            });
        }
        if released {
            events.push(InputEvent::PointerUp {
                location: self.make_location(pos),
            });
        }
        events
    }
}
