//! Page content types.
//!
//! A document is an ordered sequence of pages; each page holds ordered
//! layers, and each layer holds an ordered sequence of polymorphic items.
//! Item order inside a layer is paint order and must be preserved by every
//! pipeline stage.

use super::color::Color;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A parsed document: the ordered sequence of its pages.
pub type Document = Vec<Page>;

/// Coordinates of a stroke.
///
/// A stroke is homogeneous: either every point carries a per-point line
/// width or none do. Encoding the two layouts as separate variants keeps
/// that invariant out of runtime checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Coords {
    /// Plain 2D points, rendered with the stroke's uniform width.
    Fixed(Vec<Point>),
    /// Points paired with the width of the segment ending at each point.
    Variable(Vec<(Point, f64)>),
}

impl Coords {
    pub fn len(&self) -> usize {
        match self {
            Coords::Fixed(pts) => pts.len(),
            Coords::Variable(pts) => pts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First point of the stroke, ignoring any width component.
    pub fn first_point(&self) -> Option<Point> {
        match self {
            Coords::Fixed(pts) => pts.first().copied(),
            Coords::Variable(pts) => pts.first().map(|(p, _)| *p),
        }
    }

    /// Last point of the stroke, ignoring any width component.
    pub fn last_point(&self) -> Option<Point> {
        match self {
            Coords::Fixed(pts) => pts.last().copied(),
            Coords::Variable(pts) => pts.last().map(|(p, _)| *p),
        }
    }
}

/// A freehand-drawn polyline, the raw unit of ink.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Base line width in pt. Used for fixed-width rendering; variable-width
    /// strokes carry their per-point widths in `coords`.
    pub width: f64,
    pub coords: Coords,
}

impl Stroke {
    /// Whether the stroke loops back onto its first point.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first_point(), self.coords.last_point()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

/// A positioned text box.
///
/// The text content accumulates from possibly-multiple character-data
/// chunks during parsing before the box is sealed into its layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub font: String,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub text: String,
}

/// A detected axis-aligned rectangle.
///
/// (x1, y1) is the lower-left and (x2, y2) the upper-right corner. The
/// source format has no rectangle element; these exist only as the result
/// of shape detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub color: Color,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
}

/// A detected circle, produced only by shape detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub width: f64,
}

/// A detected ellipse, identified by its bounding rectangle.
///
/// Produced only by shape detection, and only after circle detection has
/// already claimed true circles.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub color: Color,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
}

/// Any item that can appear in a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Stroke(Stroke),
    Text(TextBox),
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
}

impl Item {
    pub fn color(&self) -> Color {
        match self {
            Item::Stroke(s) => s.color,
            Item::Text(t) => t.color,
            Item::Rectangle(r) => r.color,
            Item::Circle(c) => c.color,
            Item::Ellipse(e) => e.color,
        }
    }
}

/// An ordered, paint-order-significant group of items within a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub items: Vec<Item>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single page: declared canvas size plus its layers, later layers
/// painting over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

impl Page {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }
}
