mod arc;
mod shapes;

pub use arc::flatten_arc;
pub use shapes::{circle_radius, normalized_rect, rect_from_anchor, triangle_vertices};
