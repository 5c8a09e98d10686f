//! Streaming parser for the Xournal document format.
//!
//! [`XournalParser`] is a tag-keyed state machine fed with the three event
//! kinds a streaming XML tokenizer produces: start tags with attributes,
//! character data, and end tags. [`parse_document`] drives it from a
//! quick-xml [`Reader`] over an in-memory byte buffer.
//!
//! Failure policy: unknown tags and unknown stroke tools are recoverable
//! (the construct is dropped, a warning is logged, parsing continues);
//! invalid colors, non-numeric fields and malformed nesting abort the parse.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::warn;

use crate::error::{Result, XojError, parse_float};
use crate::model::{Color, Coords, Document, Item, Layer, Page, Point, Stroke, TextBox};

/// The item currently under construction, exclusively owned by the parser
/// until its end tag seals it into the current layer.
enum CurrentItem {
    /// A stroke; its coordinates are still accumulating in the parser's
    /// work buffers.
    Stroke { color: Color, width: f64 },
    Text(TextBox),
}

/// Event-driven parser state.
///
/// One instance parses one document: feed [`start`](Self::start),
/// [`data`](Self::data) and [`end`](Self::end) in tokenizer order, then
/// take the finished page list with [`close`](Self::close).
#[derive(Default)]
pub struct XournalParser {
    document: Document,
    current_page: Option<Page>,
    current_layer: Option<Layer>,
    current_item: Option<CurrentItem>,
    /// Per-point width values left over after the base width was consumed.
    work_widths: Vec<f64>,
    /// Flat coordinate scalars, paired into points when the stroke ends.
    work_coords: Vec<f64>,
}

impl XournalParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a start tag.
    pub fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
        match tag {
            "xournal" | "title" | "background" => {}
            "page" => {
                let width = parse_float(require_attr(tag, attrs, "width")?)?;
                let height = parse_float(require_attr(tag, attrs, "height")?)?;
                self.current_page = Some(Page::new(width, height));
            }
            "layer" => {
                self.current_layer = Some(Layer::new());
            }
            "stroke" => {
                self.work_widths.clear();
                self.work_coords.clear();
                let tool = require_attr(tag, attrs, "tool")?;
                if matches!(tool, "pen" | "highlighter" | "eraser") {
                    let default_opacity = if tool == "highlighter" { 0.5 } else { 1.0 };
                    let color = Color::parse(require_attr(tag, attrs, "color")?, default_opacity)?;
                    for token in require_attr(tag, attrs, "width")?.split_whitespace() {
                        self.work_widths.push(parse_float(token)?);
                    }
                    if self.work_widths.is_empty() {
                        return Err(XojError::Syntax("stroke width list is empty".into()));
                    }
                    // The format is known to contain negative widths.
                    let width = self.work_widths.remove(0).max(0.0);
                    self.current_item = Some(CurrentItem::Stroke { color, width });
                } else {
                    warn!("unknown tool '{tool}' in stroke, ignoring");
                    self.current_item = None;
                }
            }
            "text" => {
                self.current_item = Some(CurrentItem::Text(TextBox {
                    font: require_attr(tag, attrs, "font")?.to_string(),
                    size: parse_float(require_attr(tag, attrs, "size")?)?,
                    x: parse_float(require_attr(tag, attrs, "x")?)?,
                    y: parse_float(require_attr(tag, attrs, "y")?)?,
                    color: Color::parse(require_attr(tag, attrs, "color")?, 1.0)?,
                    text: String::new(),
                }));
            }
            _ => {
                warn!("unknown tag '{tag}', ignoring");
            }
        }
        Ok(())
    }

    /// Handle character data.
    ///
    /// May be called more than once per character-data section; stroke
    /// coordinates accumulate as whitespace-separated scalars and text box
    /// content concatenates in event order.
    pub fn data(&mut self, data: &str) -> Result<()> {
        match &mut self.current_item {
            Some(CurrentItem::Stroke { .. }) => {
                for token in data.split_whitespace() {
                    self.work_coords.push(parse_float(token)?);
                }
            }
            Some(CurrentItem::Text(textbox)) => {
                textbox.text.push_str(data);
            }
            None => {}
        }
        Ok(())
    }

    /// Handle an end tag, sealing the in-progress object one level up.
    pub fn end(&mut self, tag: &str) -> Result<()> {
        match tag {
            "xournal" | "title" | "background" => {}
            "page" => {
                let page = self
                    .current_page
                    .take()
                    .ok_or_else(|| XojError::Syntax("</page> without open page".into()))?;
                self.document.push(page);
            }
            "layer" => {
                let layer = self
                    .current_layer
                    .take()
                    .ok_or_else(|| XojError::Syntax("</layer> without open layer".into()))?;
                self.current_page
                    .as_mut()
                    .ok_or_else(|| XojError::Syntax("layer outside of page".into()))?
                    .layers
                    .push(layer);
            }
            "stroke" => {
                // A dropped (unknown-tool) stroke leaves no current item and
                // its buffered data is discarded here.
                if let Some(CurrentItem::Stroke { color, width }) = self.current_item.take() {
                    let coords = self.seal_stroke_coords()?;
                    self.current_layer
                        .as_mut()
                        .ok_or_else(|| XojError::Syntax("stroke outside of layer".into()))?
                        .items
                        .push(Item::Stroke(Stroke {
                            color,
                            width,
                            coords,
                        }));
                }
                self.work_widths.clear();
                self.work_coords.clear();
            }
            "text" => {
                if let Some(CurrentItem::Text(textbox)) = self.current_item.take() {
                    self.current_layer
                        .as_mut()
                        .ok_or_else(|| XojError::Syntax("text outside of layer".into()))?
                        .items
                        .push(Item::Text(textbox));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Finish parsing and return the document.
    pub fn close(self) -> Document {
        self.document
    }

    /// Pair the buffered coordinate scalars into points, attaching
    /// per-point widths if the stroke declared any.
    ///
    /// Width indices are offset by one relative to the points because the
    /// first declared value was already consumed as the stroke's base
    /// width; the first point receives the final leftover value, which no
    /// renderer ever reads (segment widths are taken from the second point
    /// onward).
    fn seal_stroke_coords(&mut self) -> Result<Coords> {
        let npoints = self.work_coords.len() / 2;
        let point = |i: usize| -> Point { (self.work_coords[2 * i], self.work_coords[2 * i + 1]) };

        if self.work_widths.is_empty() {
            return Ok(Coords::Fixed((0..npoints).map(point).collect()));
        }

        let mut points = Vec::with_capacity(npoints);
        for i in 0..npoints {
            let index = if i == 0 { self.work_widths.len() - 1 } else { i - 1 };
            let width = self
                .work_widths
                .get(index)
                .copied()
                .ok_or_else(|| XojError::Syntax("stroke width list too short".into()))?
                .max(0.0);
            points.push((point(i), width));
        }
        Ok(Coords::Variable(points))
    }
}

/// Parse a complete in-memory document (already decompressed).
pub fn parse_document(data: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(data)
        .map_err(|e| XojError::Syntax(format!("document is not valid UTF-8: {e}")))?;
    let mut reader = Reader::from_str(text);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut parser = XournalParser::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let attrs = collect_attrs(&e)?;
                let attrs: Vec<(&str, &str)> =
                    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                parser.start(&tag, &attrs)?;
            }
            Event::Empty(e) => {
                // Self-closing tags behave as an immediate start/end pair.
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let attrs = collect_attrs(&e)?;
                let attrs: Vec<(&str, &str)> =
                    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                parser.start(&tag, &attrs)?;
                parser.end(&tag)?;
            }
            Event::Text(e) => {
                parser.data(&e.unescape()?)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| XojError::Syntax(format!("CDATA is not valid UTF-8: {err}")))?
                    .to_string();
                parser.data(&text)?;
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                parser.end(&tag)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(parser.close())
}

fn collect_attrs(e: &quick_xml::events::BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XojError::Syntax(format!("malformed attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

fn require_attr<'a>(tag: &str, attrs: &[(&'a str, &'a str)], name: &str) -> Result<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| XojError::MissingAttribute {
            tag: tag.to_string(),
            attr: name.to_string(),
        })
}
