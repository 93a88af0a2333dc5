use egui::{Pos2, Rect, Vec2, pos2};

/// Rectangle spanned by the pointer and the anchor, in origin + size form.
///
/// The origin is the pointer and the size points back toward the anchor, so
/// width and height are negative whenever the pointer is right of / below it.
pub fn rect_from_anchor(anchor: Pos2, pointer: Pos2) -> (Pos2, Vec2) {
    (pointer, anchor - pointer)
}

/// Origin + (possibly negative) size to a well-formed rect
pub fn normalized_rect(origin: Pos2, size: Vec2) -> Rect {
    Rect::from_two_pos(origin, origin + size)
}

/// Circle tool radius: the distance dragged from the anchor
pub fn circle_radius(anchor: Pos2, pointer: Pos2) -> f32 {
    anchor.distance(pointer)
}

/// The pointer reflected horizontally through the anchor
fn mirrored_vertex(anchor: Pos2, pointer: Pos2) -> Pos2 {
    pos2(2.0 * anchor.x - pointer.x, pointer.y)
}

/// Apex at the anchor, base between the pointer and its mirror image
pub fn triangle_vertices(anchor: Pos2, pointer: Pos2) -> [Pos2; 3] {
    [anchor, pointer, mirrored_vertex(anchor, pointer)]
}
