//! inktex - Xournal note conversion to TikZ.
//!
//! The crate is organized as a three-stage pipeline over an in-memory
//! document tree:
//!
//! 1. [`parser`] consumes the XML event stream of a `.xoj` document and
//!    builds the [`model`] tree.
//! 2. [`optimize`] rewrites raw freehand strokes into simplified polylines
//!    or exact geometric primitives (rectangles, circles, ellipses).
//! 3. [`output`] walks the tree and emits TikZ markup through one of the
//!    [`output::OutputModule`] implementations.
//!
//! File I/O and gzip decompression are the caller's job; the pipeline only
//! ever sees a decoded byte buffer and an abstract text sink.

pub mod error;
pub mod model;
pub mod optimize;
pub mod output;
pub mod parser;

pub use error::{Result, XojError};
