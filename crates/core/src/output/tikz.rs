//! Fixed line width output.

use std::io::Write;

use crate::error::Result;
use crate::model::{Circle, Document, Ellipse, Rectangle, Stroke, TextBox};
use crate::output::{
    OutputModule, PICTURE_OPEN, write_circle, write_color_definitions, write_ellipse,
    write_fixed_stroke, write_rectangle, write_textbox,
};

/// An output module that renders every stroke with its uniform base width.
///
/// Per-point widths are ignored, which keeps the generated markup plain
/// TikZ with no style preamble.
pub struct Tikz<W: Write> {
    out: W,
    interactive: bool,
}

impl<W: Write> Tikz<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            interactive: false,
        }
    }

    /// Mark the primary sink as an interactive terminal, switching
    /// diagnostics to comment form.
    pub fn with_interactive(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    /// Consume the module and hand back its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputModule for Tikz<W> {
    fn name(&self) -> &'static str {
        "fixed line width"
    }

    fn interactive(&self) -> bool {
        self.interactive
    }

    fn header(&mut self, document: &Document) -> Result<()> {
        self.out.write_all(PICTURE_OPEN.as_bytes())?;
        write_color_definitions(&mut self.out, document)
    }

    fn stroke(&mut self, stroke: &Stroke) -> Result<()> {
        write_fixed_stroke(&mut self.out, stroke)
    }

    fn textbox(&mut self, textbox: &TextBox) -> Result<()> {
        write_textbox(&mut self.out, textbox)
    }

    fn rectangle(&mut self, rectangle: &Rectangle) -> Result<()> {
        write_rectangle(&mut self.out, rectangle)
    }

    fn circle(&mut self, circle: &Circle) -> Result<()> {
        write_circle(&mut self.out, circle)
    }

    fn ellipse(&mut self, ellipse: &Ellipse) -> Result<()> {
        write_ellipse(&mut self.out, ellipse)
    }

    fn footer(&mut self) -> Result<()> {
        self.out.write_all(b"\\end{tikzpicture}\n")?;
        Ok(())
    }
}
