//! Variable line width output.

use std::io::Write;

use crate::error::Result;
use crate::model::{Circle, Coords, Document, Ellipse, Rectangle, Stroke, TextBox};
use crate::output::{
    OutputModule, PICTURE_OPEN, write_circle, write_color_definitions, write_ellipse,
    write_fixed_stroke, write_rectangle, write_textbox,
};

/// TikZ style that renders each path segment with its own line width; the
/// `t` key carries the per-segment width.
const VLW_STYLE: &str = r"\tikzset{
  vlw/.style={
    to path={%
      \pgfextra{%
        \draw[#1,line width=\pgfkeysvalueof{/tikz/t}] (\tikztostart) -- (\tikztotarget);
      }%
      (\tikztotarget)
    },
  },
  t/.initial=0.4pt,
}
";

/// An output module that supports lines with variable width.
pub struct TikzLineWidth<W: Write> {
    pub(crate) out: W,
    pub(crate) interactive: bool,
}

impl<W: Write> TikzLineWidth<W> {
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

impl<W: Write> OutputModule for TikzLineWidth<W> {
    fn name(&self) -> &'static str {
        "variable line width"
    }

    fn interactive(&self) -> bool {
        self.interactive
    }

    /// Open a tikzpicture environment, define the variable width style and
    /// declare every synthesized color the document needs.
    fn header(&mut self, document: &Document) -> Result<()> {
        self.out.write_all(VLW_STYLE.as_bytes())?;
        self.out.write_all(PICTURE_OPEN.as_bytes())?;
        write_color_definitions(&mut self.out, document)
    }

    /// Write a stroke, as either a chain of width-tagged segments
    ///
    /// ```text
    ///   \draw[vlw=color] (x1, y1) to[t=w1pt] (x2, y2) to[t=w2pt] ... ;
    /// ```
    ///
    /// or a uniform polyline
    ///
    /// ```text
    ///   \draw[color,line width=1pt,opacity=0.555] (x1, y1) -- (x2, y2) -- ... ;
    /// ```
    fn stroke(&mut self, stroke: &Stroke) -> Result<()> {
        let Coords::Variable(points) = &stroke.coords else {
            return write_fixed_stroke(&mut self.out, stroke);
        };
        let Some((&((first_x, first_y), _), rest)) = points.split_first() else {
            return Ok(());
        };

        let tex = super::tex_color(stroke.color);
        write!(self.out, "  \\draw[")?;
        if stroke.color.opacity == 1.0 {
            write!(self.out, "vlw={tex}")?;
        } else {
            write!(self.out, "vlw={{{tex},opacity={:.3}}}", stroke.color.opacity)?;
        }
        write!(self.out, "] ({first_x}, {first_y})")?;
        for &((x, y), width) in rest {
            write!(self.out, " to[t={width}pt] ({x}, {y})")?;
        }
        writeln!(self.out, ";")?;
        Ok(())
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

    /// Close the tikzpicture environment.
    fn footer(&mut self) -> Result<()> {
        self.out.write_all(b"\\end{tikzpicture}\n")?;
        Ok(())
    }
}
