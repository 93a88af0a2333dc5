use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Pos2, pos2};

/// One cubic Bézier piece of a flattened arc, continuing from the previous end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Pos2,
    pub ctrl2: Pos2,
    pub to: Pos2,
}

/// Clockwise sweep of an arc from `start` to `end`, canvas style.
///
/// A difference of a full turn or more draws the whole circle, anything
/// smaller wraps into `[0, TAU)`.
pub fn arc_sweep(start: f32, end: f32) -> f32 {
    let delta = end - start;
    if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

/// Approximate an arc with cubic Béziers, at most a quarter turn each.
pub fn flatten_arc(center: Pos2, radius: f32, start: f32, end: f32) -> Vec<CubicSegment> {
    let sweep = arc_sweep(start, end);
    if radius <= 0.0 || sweep <= 0.0 {
        return Vec::new();
    }

    let count = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / count as f32;
    // Control distance for a unit arc of `step` radians
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let point_at = |angle: f32| {
        pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    };

    (0..count)
        .map(|i| {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            let (sin0, cos0) = a0.sin_cos();
            let (sin1, cos1) = a1.sin_cos();
            let from = point_at(a0);
            let to = point_at(a1);
            CubicSegment {
                ctrl1: pos2(from.x - k * radius * sin0, from.y + k * radius * cos0),
                ctrl2: pos2(to.x + k * radius * sin1, to.y - k * radius * cos1),
                to,
            }
        })
        .collect()
}
