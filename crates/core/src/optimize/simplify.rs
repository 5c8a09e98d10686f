//! Collinear point removal.

use crate::model::{Coords, Stroke};

/// Tolerance for the collinearity test. Tunable; the value compensates for
/// float inaccuracy in the dot product comparison and was chosen by testing
/// against real documents.
const COLLINEAR_EPSILON: f64 = 0.99999;

/// Remove interior points that lie on the line between their neighbors.
///
/// Scans consecutive point triples (a, b, c) and drops b whenever the
/// segments a→b and b→c are collinear within tolerance: the vectors point
/// the same way exactly when their dot product equals the product of their
/// lengths. After a removal the same index is re-tested against its new
/// neighbors.
///
/// Strokes with per-point widths are left untouched; removing a point
/// would change their rendered width profile.
pub fn simplify(stroke: &mut Stroke) {
    let Coords::Fixed(points) = &mut stroke.coords else {
        return;
    };

    let mut s = 0;
    while s + 2 < points.len() {
        let (ax, ay) = points[s];
        let (bx, by) = points[s + 1];
        let (cx, cy) = points[s + 2];

        let scalar_product = (ax - bx) * (bx - cx) + (ay - by) * (by - cy);
        let first_length = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
        let second_length = ((bx - cx).powi(2) + (by - cy).powi(2)).sqrt();

        if first_length * second_length * COLLINEAR_EPSILON < scalar_product {
            points.remove(s + 1);
        } else {
            s += 1;
        }
    }
}
