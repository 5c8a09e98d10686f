//! Output modules for rendering a document as TikZ markup.
//!
//! An [`OutputModule`] walks the Page → Layer → Item tree in paint order
//! and emits a header, one drawing command per item, and a footer. Two
//! rendering strategies exist, selected once per run: [`TikzLineWidth`]
//! renders strokes with their per-point widths, [`Tikz`] renders every
//! stroke with its uniform base width. [`TikzDebug`] augments the
//! variable-width strategy with a marker at every retained coordinate.

mod debug;
mod linewidth;
mod tikz;

pub use debug::TikzDebug;
pub use linewidth::TikzLineWidth;
pub use tikz::Tikz;

use std::collections::HashSet;
use std::io::Write;

use crate::error::Result;
use crate::model::{Circle, Color, Coords, Document, Ellipse, Item, Layer, Page, Rectangle, Stroke, TextBox};

/// Prefix for synthesized color names declared via `\definecolor`.
pub const COLOR_PREFIX: &str = "xou";

/// RGB triples TikZ already knows by name; everything else needs a
/// synthesized definition.
const TEX_COLORS: [((u8, u8, u8), &str); 8] = [
    ((0, 0, 0), "black"),
    ((255, 255, 255), "white"),
    ((255, 0, 0), "red"),
    ((0, 255, 0), "green"),
    ((0, 0, 255), "blue"),
    ((0, 173, 239), "cyan"),
    ((236, 0, 140), "magenta"),
    ((255, 242, 0), "yellow"),
];

/// Convert a color to a unique string usable in a TeX document.
///
/// Known triples map to their symbolic TikZ names; any other color becomes
/// a hexadecimal identifier that the header declares once per document.
pub fn tex_color(color: Color) -> String {
    for (rgb, name) in TEX_COLORS {
        if color.rgb() == rgb {
            return name.to_string();
        }
    }
    format!(
        "{COLOR_PREFIX}{:02x}{:02x}{:02x}",
        color.red, color.green, color.blue
    )
}

/// Strategy interface for one output run.
///
/// Implementations provide the item-level commands; the tree walk
/// (`body` → `page` → `layer`) and the item dispatch are shared. The shape
/// commands have warn-and-skip defaults so a module that handles only raw
/// items degrades gracefully instead of aborting the render.
pub trait OutputModule {
    /// Name of the output module, presentable to the user.
    fn name(&self) -> &'static str;

    /// Whether the primary sink is an interactive terminal. Diagnostics are
    /// comment-formatted in that case so pasted output stays compilable.
    fn interactive(&self) -> bool {
        false
    }

    fn header(&mut self, document: &Document) -> Result<()>;
    fn footer(&mut self) -> Result<()>;
    fn stroke(&mut self, stroke: &Stroke) -> Result<()>;
    fn textbox(&mut self, textbox: &TextBox) -> Result<()>;

    fn rectangle(&mut self, rectangle: &Rectangle) -> Result<()> {
        let _ = rectangle;
        self.diag("Warning: no rectangle handler in this output module, skipping item");
        Ok(())
    }

    fn circle(&mut self, circle: &Circle) -> Result<()> {
        let _ = circle;
        self.diag("Warning: no circle handler in this output module, skipping item");
        Ok(())
    }

    fn ellipse(&mut self, ellipse: &Ellipse) -> Result<()> {
        let _ = ellipse;
        self.diag("Warning: no ellipse handler in this output module, skipping item");
        Ok(())
    }

    /// Write a diagnostic to the auxiliary channel.
    fn diag(&mut self, message: &str) {
        if self.interactive() {
            eprintln!("% {message}");
        } else {
            eprintln!("{message}");
        }
    }

    /// Write a layer by dispatching every item to its command.
    fn layer(&mut self, layer: &Layer) -> Result<()> {
        for item in &layer.items {
            match item {
                Item::Stroke(stroke) => self.stroke(stroke)?,
                Item::Text(textbox) => self.textbox(textbox)?,
                Item::Rectangle(rectangle) => self.rectangle(rectangle)?,
                Item::Circle(circle) => self.circle(circle)?,
                Item::Ellipse(ellipse) => self.ellipse(ellipse)?,
            }
        }
        Ok(())
    }

    /// Write a page by iterating over its layers in paint order.
    fn page(&mut self, page: &Page) -> Result<()> {
        for layer in &page.layers {
            self.layer(layer)?;
        }
        Ok(())
    }

    /// Write the body by iterating over all pages.
    fn body(&mut self, document: &Document) -> Result<()> {
        for page in document {
            self.page(page)?;
        }
        Ok(())
    }

    /// Write header, body and footer of the output file.
    fn write_all(&mut self, document: &Document) -> Result<()> {
        self.header(document)?;
        self.body(document)?;
        self.footer()
    }
}

/// Declare every synthesized color the document uses, once each.
///
/// Scans all items up front so a color shared between pages is still only
/// defined a single time; a trailing blank line separates the definitions
/// from the body when any were written.
pub(crate) fn write_color_definitions<W: Write>(out: &mut W, document: &Document) -> Result<()> {
    let mut declared: HashSet<String> = HashSet::new();
    for page in document {
        for layer in &page.layers {
            for item in &layer.items {
                let color = item.color();
                let name = tex_color(color);
                if name.starts_with(COLOR_PREFIX) && declared.insert(name.clone()) {
                    writeln!(
                        out,
                        "  \\definecolor{{{name}}}{{rgb}}{{{:.4},{:.4},{:.4}}}",
                        f64::from(color.red) / 255.0,
                        f64::from(color.green) / 255.0,
                        f64::from(color.blue) / 255.0,
                    )?;
                }
            }
        }
    }
    if !declared.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/// Shared `\begin{tikzpicture}` options: the source format's y axis grows
/// downward and coordinates are in pt.
pub(crate) const PICTURE_OPEN: &str = "\\begin{tikzpicture}[yscale=-1, y=1pt, x=1pt, every path/.style={line cap=round, line join=round}]\n";

/// Render a stroke as a uniform-width polyline, auto-closing the path when
/// the stroke loops back onto its first point.
pub(crate) fn write_fixed_stroke<W: Write>(out: &mut W, stroke: &Stroke) -> Result<()> {
    let points: Vec<(f64, f64)> = match &stroke.coords {
        Coords::Fixed(points) => points.clone(),
        Coords::Variable(points) => points.iter().map(|&(p, _)| p).collect(),
    };
    let Some((&(first_x, first_y), rest)) = points.split_first() else {
        return Ok(());
    };

    write!(out, "  \\draw[{},line width={}pt", tex_color(stroke.color), stroke.width)?;
    if stroke.color.opacity != 1.0 {
        write!(out, ",opacity={:.3}", stroke.color.opacity)?;
    }
    write!(out, "] ({first_x}, {first_y})")?;

    match rest.split_last() {
        None => {
            // A single-point tap still renders, as a dot.
            write!(out, " -- cycle")?;
        }
        Some((&(last_x, last_y), middle)) => {
            for &(x, y) in middle {
                write!(out, " -- ({x}, {y})")?;
            }
            if first_x == last_x && first_y == last_y {
                write!(out, " -- cycle")?;
            } else {
                write!(out, " -- ({last_x}, {last_y})")?;
            }
        }
    }
    writeln!(out, ";")?;
    Ok(())
}

/// Render a text box as a `\node`, shifted down to match the source
/// editor's text placement and with line breaks converted to `\\`.
pub(crate) fn write_textbox<W: Write>(out: &mut W, textbox: &TextBox) -> Result<()> {
    let tex = tex_color(textbox.color);
    let text = textbox.text.replace('\n', "\\\\");

    write!(out, "  \\node[align=left, below right, inner sep=0pt")?;
    if tex != "black" {
        write!(out, ",{tex}")?;
    }
    if textbox.color.opacity != 1.0 {
        write!(out, ",opacity={:.3}", textbox.color.opacity)?;
    }
    writeln!(out, "] at ({},{}) {{{text}}};", textbox.x, textbox.y + 2.5)?;
    Ok(())
}

pub(crate) fn write_circle<W: Write>(out: &mut W, circle: &Circle) -> Result<()> {
    write!(out, "  \\draw[line width={}pt", circle.width)?;
    write_shape_modifiers(out, circle.color)?;
    writeln!(out, "] ({},{}) circle ({});", circle.x, circle.y, circle.radius)?;
    Ok(())
}

pub(crate) fn write_rectangle<W: Write>(out: &mut W, rectangle: &Rectangle) -> Result<()> {
    write!(out, "  \\draw[line width={}pt", rectangle.width)?;
    write_shape_modifiers(out, rectangle.color)?;
    writeln!(
        out,
        "] ({},{}) rectangle ({},{});",
        rectangle.x1, rectangle.y1, rectangle.x2, rectangle.y2
    )?;
    Ok(())
}

pub(crate) fn write_ellipse<W: Write>(out: &mut W, ellipse: &Ellipse) -> Result<()> {
    let center_x = (ellipse.left + ellipse.right) / 2.0;
    let center_y = (ellipse.top + ellipse.bottom) / 2.0;
    let radius_x = (ellipse.right - ellipse.left) / 2.0;
    let radius_y = (ellipse.top - ellipse.bottom) / 2.0;

    write!(out, "  \\draw[line width={}pt", ellipse.width)?;
    write_shape_modifiers(out, ellipse.color)?;
    writeln!(
        out,
        "] ({center_x},{center_y}) ellipse ({radius_x} and {radius_y});"
    )?;
    Ok(())
}

/// Color and opacity modifiers for shape commands, omitted when they match
/// the defaults to keep the output minimal.
fn write_shape_modifiers<W: Write>(out: &mut W, color: Color) -> Result<()> {
    let tex = tex_color(color);
    if tex != "black" {
        write!(out, ",{tex}")?;
    }
    if color.opacity != 1.0 {
        write!(out, ",opacity={:.3}", color.opacity)?;
    }
    Ok(())
}
