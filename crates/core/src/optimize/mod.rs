//! Stroke simplification and shape detection.
//!
//! A fixed pipeline of per-item passes that rewrites raw freehand strokes
//! into simpler polylines or exact geometric primitives, improving both the
//! quality and the size of the rendered output.
//!
//! Pass order matters: the detectors assume collinear points were already
//! collapsed by simplification, and ellipse detection must run after circle
//! detection because every circle also satisfies the ellipse test.

mod detect;
mod simplify;

pub use detect::{Tolerance, detect_circle, detect_ellipse, detect_rectangle};
pub use simplify::simplify;

use crate::model::{Document, Item, Layer, Stroke};

/// Run all optimization passes over every layer of the document.
///
/// Items are rewritten in place, position-preserving: a recognized shape is
/// substituted at the index of the stroke it replaces, so paint order never
/// changes.
pub fn run_all(document: &mut Document) {
    for page in document.iter_mut() {
        for layer in page.layers.iter_mut() {
            for item in layer.items.iter_mut() {
                if let Item::Stroke(stroke) = item {
                    simplify(stroke);
                }
            }
            replace_strokes(layer, |s| detect_rectangle(s).map(Item::Rectangle));
            replace_strokes(layer, |s| detect_circle(s, Tolerance::Normal).map(Item::Circle));
            replace_strokes(layer, |s| detect_ellipse(s).map(Item::Ellipse));
        }
    }
}

/// Apply one detector to every stroke of a layer, substituting matches at
/// their original index. Non-strokes and non-matches are left untouched.
fn replace_strokes(layer: &mut Layer, detect: impl Fn(&Stroke) -> Option<Item>) {
    for item in layer.items.iter_mut() {
        if let Item::Stroke(stroke) = item {
            if let Some(replacement) = detect(stroke) {
                *item = replacement;
            }
        }
    }
}
