//! Document model for Xournal notes.
//!
//! This module contains:
//! - Color representation and name parsing
//! - Page content types (Stroke, TextBox and the detected shapes)
//! - The Page/Layer/Item tree threaded through all pipeline stages

pub mod color;
pub mod objects;

pub use color::Color;
pub use objects::{
    Circle, Coords, Document, Ellipse, Item, Layer, Page, Point, Rectangle, Stroke, TextBox,
};
