//! Shape detectors: rectangle, circle, ellipse.
//!
//! Every detector is total: a stroke that does not match is a normal
//! outcome reported as `None`, never an error. Detectors only consider
//! closed plain-2D strokes; per-point-width strokes pass through unchanged.

use itertools::Itertools;

use crate::model::{Circle, Coords, Ellipse, Point, Rectangle, Stroke};

/// Spread limit for the center candidates of a circle fit, in page units.
/// Empirically determined.
const CENTER_SPREAD_EPSILON: f64 = 0.02;

/// Spread limit for the per-segment radius estimates. Empirically
/// determined.
const RADIUS_SPREAD_EPSILON: f64 = 0.02;

/// Radius at which simplification starts discarding points of a circular
/// stroke (observed around ~300 units), used to relax the chord-length
/// bound for large circles. Tunable together with the chord tolerances.
const LARGE_RADIUS_SCALE: f64 = 275.0;

/// Chord-length tolerance profile for circle detection.
///
/// `Relaxed` accepts a much larger variation between the individual chord
/// lengths; it is used only when testing a normalized stroke during
/// ellipse detection, where the aspect-ratio rescaling distorts chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tolerance {
    Normal,
    Relaxed,
}

impl Tolerance {
    /// (maximum chord-length spread, maximum mean chord length).
    /// Both limits were empirically determined.
    const fn chord_limits(self) -> (f64, f64) {
        match self {
            Tolerance::Normal => (0.04, 3.5),
            Tolerance::Relaxed => (0.5, 10.0),
        }
    }
}

/// Detect an axis-aligned rectangle.
///
/// Applies to closed strokes of exactly 5 points (four corners plus the
/// closing point). The stroke matches when all four corners of its
/// bounding box appear among the points and every point lies exactly on
/// one of the four bounding lines.
pub fn detect_rectangle(stroke: &Stroke) -> Option<Rectangle> {
    let Coords::Fixed(points) = &stroke.coords else {
        return None;
    };
    if points.len() != 5 || !stroke.is_closed() {
        return None;
    }

    let (mut left, mut bottom) = points[0];
    let (mut right, mut top) = points[0];
    for &(x, y) in &points[1..] {
        left = left.min(x);
        right = right.max(x);
        top = top.max(y);
        bottom = bottom.min(y);
    }

    let corners = [(left, top), (right, top), (left, bottom), (right, bottom)];
    if !corners.iter().all(|corner| points.contains(corner)) {
        return None;
    }
    if points
        .iter()
        .any(|&(x, y)| x != left && x != right && y != top && y != bottom)
    {
        return None;
    }

    Some(Rectangle {
        color: stroke.color,
        x1: left,
        y1: bottom,
        x2: right,
        y2: top,
        width: stroke.width,
    })
}

/// Detect a circle and calculate its center and radius.
///
/// For every point the detector picks two more points roughly a third and
/// two thirds around the loop and intersects the perpendicular bisectors
/// of the two chords, yielding one center candidate per starting point.
/// The stroke is a circle when the candidates agree, the per-segment
/// radius estimates agree, and the chord lengths stay within the selected
/// tolerance profile.
pub fn detect_circle(stroke: &Stroke, tolerance: Tolerance) -> Option<Circle> {
    let Coords::Fixed(points) = &stroke.coords else {
        return None;
    };
    let length = points.len();
    if length < 10 || !stroke.is_closed() {
        return None;
    }

    let mut center_xs = Vec::with_capacity(length);
    let mut center_ys = Vec::with_capacity(length);
    for i in 0..length {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + length / 3) % length];
        let (x3, y3) = points[(i + 2 * length / 3) % length];

        // Chord midpoints and one more point on each perpendicular
        // bisector; the bisector intersection is the center candidate.
        let x12 = (x1 + x2) / 2.0;
        let y12 = (y1 + y2) / 2.0;
        let x23 = (x2 + x3) / 2.0;
        let y23 = (y2 + y3) / 2.0;
        let perp_x12 = x12 + (y1 - y2);
        let perp_y12 = y12 - (x1 - x2);
        let perp_x23 = x23 + (y2 - y3);
        let perp_y23 = y23 - (x2 - x3);

        let denominator =
            (x12 - perp_x12) * (y23 - perp_y23) - (y12 - perp_y12) * (x23 - perp_x23);
        if denominator == 0.0 {
            // Degenerate sample triple; the bisectors are parallel.
            return None;
        }
        let cross12 = x12 * perp_y12 - y12 * perp_x12;
        let cross23 = x23 * perp_y23 - y23 * perp_x23;
        center_xs.push((cross12 * (x23 - perp_x23) - (x12 - perp_x12) * cross23) / denominator);
        center_ys.push((cross12 * (y23 - perp_y23) - (y12 - perp_y12) * cross23) / denominator);
    }

    let x_avg = center_xs.iter().sum::<f64>() / center_xs.len() as f64;
    let y_avg = center_ys.iter().sum::<f64>() / center_ys.len() as f64;

    // Estimate the radius from every consecutive point pair: average the
    // distance to the point itself and to the segment midpoint.
    let mut radii = Vec::with_capacity(length - 1);
    let mut chords = Vec::with_capacity(length - 1);
    for (&(x1, y1), &(x2, y2)) in points.iter().tuple_windows() {
        let x12 = (x1 + x2) / 2.0;
        let y12 = (y1 + y2) / 2.0;
        chords.push(((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt());
        let radius1 = ((x1 - x_avg).powi(2) + (y1 - y_avg).powi(2)).sqrt();
        let radius2 = ((x12 - x_avg).powi(2) + (y12 - y_avg).powi(2)).sqrt();
        radii.push((radius1 + radius2) / 2.0);
    }
    let radius = radii.iter().sum::<f64>() / radii.len() as f64;

    // Chord lengths that vary too much or grow too long indicate the
    // stroke is not a circle, except for very large circles where
    // simplification may have already thinned the points.
    let (spread_limit, mean_limit) = tolerance.chord_limits();
    let (chord_min, chord_max) = chords.iter().copied().minmax().into_option()?;
    let chord_mean = chords.iter().sum::<f64>() / chords.len() as f64;
    if chord_max - chord_min > spread_limit || chord_mean > mean_limit {
        if radius / LARGE_RADIUS_SCALE < 1.0
            || (radius / LARGE_RADIUS_SCALE).ceil() * mean_limit < chord_mean
        {
            return None;
        }
    }

    let (x_min, x_max) = center_xs.iter().copied().minmax().into_option()?;
    let (y_min, y_max) = center_ys.iter().copied().minmax().into_option()?;
    if x_max - x_min > CENTER_SPREAD_EPSILON || y_max - y_min > CENTER_SPREAD_EPSILON {
        return None;
    }

    let (radius_min, radius_max) = radii.iter().copied().minmax().into_option()?;
    if radius_max - radius_min > RADIUS_SPREAD_EPSILON {
        return None;
    }

    Some(Circle {
        color: stroke.color,
        x: x_avg,
        y: y_avg,
        radius,
        width: stroke.width,
    })
}

/// Detect an ellipse from its bounding box.
///
/// The stroke is normalized into a unit-aspect coordinate space by scaling
/// the longer bounding-box axis down to the shorter one; a stroke that
/// becomes a circle under that transform is an ellipse. Must run after
/// circle detection so exact circles keep their classification.
pub fn detect_ellipse(stroke: &Stroke) -> Option<Ellipse> {
    let Coords::Fixed(points) = &stroke.coords else {
        return None;
    };
    if points.len() < 2 || !stroke.is_closed() {
        return None;
    }

    let (x_min, x_max) = points.iter().map(|&(x, _)| x).minmax().into_option()?;
    let (y_min, y_max) = points.iter().map(|&(_, y)| y).minmax().into_option()?;
    let width = x_max - x_min;
    let height = y_max - y_min;
    if width == 0.0 || height == 0.0 {
        return None;
    }

    let normalized: Vec<Point> = if height < width {
        let factor = height / width;
        points
            .iter()
            .map(|&(x, y)| (x_min + factor * (x - x_min), y))
            .collect()
    } else {
        let factor = width / height;
        points
            .iter()
            .map(|&(x, y)| (x, y_min + factor * (y - y_min)))
            .collect()
    };

    let normalized_stroke = Stroke {
        color: stroke.color,
        width: stroke.width,
        coords: Coords::Fixed(normalized),
    };
    detect_circle(&normalized_stroke, Tolerance::Relaxed)?;

    Some(Ellipse {
        color: stroke.color,
        left: x_min,
        right: x_max,
        top: y_max,
        bottom: y_min,
        width: stroke.width,
    })
}
