//! Debugging variant of the variable line width output.

use std::io::Write;

use crate::error::Result;
use crate::model::{Circle, Coords, Document, Ellipse, Rectangle, Stroke, TextBox};
use crate::output::{OutputModule, TikzLineWidth};

/// Variable line width output that additionally marks every retained
/// stroke coordinate with a red dot, making the effect of simplification
/// visible in the rendered figure.
pub struct TikzDebug<W: Write> {
    inner: TikzLineWidth<W>,
}

impl<W: Write> TikzDebug<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: TikzLineWidth::new(out),
        }
    }

    pub fn with_interactive(out: W, interactive: bool) -> Self {
        Self {
            inner: TikzLineWidth::with_interactive(out, interactive),
        }
    }

    /// Consume the module and hand back its sink.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write> OutputModule for TikzDebug<W> {
    fn name(&self) -> &'static str {
        "variable line width with debugging"
    }

    fn interactive(&self) -> bool {
        self.inner.interactive
    }

    fn header(&mut self, document: &Document) -> Result<()> {
        self.inner.header(document)
    }

    /// Write the stroke, then a dot at every coordinate used to construct
    /// it.
    fn stroke(&mut self, stroke: &Stroke) -> Result<()> {
        self.inner.stroke(stroke)?;

        match &stroke.coords {
            Coords::Fixed(points) => {
                for &(x, y) in points {
                    writeln!(
                        self.inner.out,
                        "  \\draw[red, line width=1pt] ({x}, {y}) -- cycle;"
                    )?;
                }
            }
            Coords::Variable(points) => {
                for &((x, y), _) in points {
                    writeln!(
                        self.inner.out,
                        "  \\draw[red, line width=1pt] ({x}, {y}) -- cycle;"
                    )?;
                }
            }
        }
        Ok(())
    }

    fn textbox(&mut self, textbox: &TextBox) -> Result<()> {
        self.inner.textbox(textbox)
    }

    fn rectangle(&mut self, rectangle: &Rectangle) -> Result<()> {
        self.inner.rectangle(rectangle)
    }

    fn circle(&mut self, circle: &Circle) -> Result<()> {
        self.inner.circle(circle)
    }

    fn ellipse(&mut self, ellipse: &Ellipse) -> Result<()> {
        self.inner.ellipse(ellipse)
    }

    fn footer(&mut self) -> Result<()> {
        self.inner.footer()
    }
}
