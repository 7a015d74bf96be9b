//! Custom element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` ships no filled-cell primitive, so [`TextBox`] draws its own
//! background and border through `Area::draw_line` before printing text
//! line by line.  [`PageAnchor`] wraps an element and records the page
//! number on which it first produces visible output.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

const DEFAULT_PADDING_MM: f64 = 1.5;

/// Vertical distance between the stripes that simulate a solid fill.
/// Smaller than the default stroke width, so adjacent stripes overlap.
const FILL_STRIPE_STEP_MM: f64 = 0.25;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

/// A full-width block of pre-formatted text over an optional background
/// fill, with an optional border.
///
/// The text is split on newlines and rendered without wrapping, one text
/// section per line, which keeps listings and terminal transcripts
/// verbatim.  An empty string still renders as a single empty line, so
/// the block itself stays visible.  When the block does not fit into the
/// remaining page space it renders as many lines as fit and reports
/// `has_more`, continuing on the next page.
pub struct TextBox {
    lines: Vec<String>,
    style: Style,
    fill: Option<Color>,
    border: Option<Color>,
    padding: Mm,
    cursor: usize,
}

impl TextBox {
    /// Creates a text box rendering `text` with the given style.
    pub fn new(text: &str, style: Style) -> Self {
        Self {
            lines: split_lines(text),
            style,
            fill: None,
            border: None,
            padding: mm_from_f64(DEFAULT_PADDING_MM),
            cursor: 0,
        }
    }

    /// Sets the background fill color and returns the updated element.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets the border color and returns the updated element.
    pub fn with_border(mut self, border: Color) -> Self {
        self.border = Some(border);
        self
    }

    /// Sets the inner padding and returns the updated element.
    pub fn with_padding(mut self, padding: Mm) -> Self {
        self.padding = padding;
        self
    }
}

impl Element for TextBox {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.cursor >= self.lines.len() {
            return Ok(result);
        }

        let style = style.and(self.style);
        let line_height = mm_to_f64(style.line_height(&context.font_cache));
        let padding = mm_to_f64(self.padding);
        let width = area.size().width;

        let usable = mm_to_f64(area.size().height) - 2.0 * padding;
        if usable < line_height {
            result.has_more = true;
            return Ok(result);
        }

        let remaining = self.lines.len() - self.cursor;
        let capacity = (usable / line_height).floor() as usize;
        let count = remaining.min(capacity);
        let block_height = count as f64 * line_height + 2.0 * padding;

        if let Some(fill) = self.fill {
            let fill_style = Style::new().with_color(fill);
            let mut y = 0.0;
            while y <= block_height {
                area.draw_line(
                    vec![
                        Position::new(0, mm_from_f64(y)),
                        Position::new(width, mm_from_f64(y)),
                    ],
                    fill_style,
                );
                y += FILL_STRIPE_STEP_MM;
            }
        }

        if let Some(border) = self.border {
            let border_style = Style::new().with_color(border);
            let bottom = mm_from_f64(block_height);
            area.draw_line(
                vec![
                    Position::new(0, 0),
                    Position::new(width, 0),
                    Position::new(width, bottom),
                    Position::new(0, bottom),
                    Position::new(0, 0),
                ],
                border_style,
            );
        }

        let mut rendered = 0;
        for line in &self.lines[self.cursor..self.cursor + count] {
            let y = padding + rendered as f64 * line_height;
            let position = Position::new(self.padding, mm_from_f64(y));
            let Some(mut section) = area.text_section(&context.font_cache, position, style) else {
                break;
            };
            section.print_str(line, style)?;
            rendered += 1;
        }

        self.cursor += rendered;
        result.size = Size::new(width, mm_from_f64(block_height));
        result.has_more = self.cursor < self.lines.len();
        area.add_offset(Position::new(0, mm_from_f64(block_height)));

        Ok(result)
    }
}

/// Wraps an element and records the page on which it first draws.
///
/// The counter is shared with the page decorator configured through
/// [`crate::builder::DocumentBuilder::with_page_counter`].  An element
/// that does not fit into the remaining space reports no size and is
/// retried on the next page, so the slot is only filled once the inner
/// element produces output.  The slot stays `None` if it never does.
pub struct PageAnchor<E: Element> {
    inner: E,
    counter: Rc<Cell<usize>>,
    slot: Rc<Cell<Option<usize>>>,
}

impl<E: Element> PageAnchor<E> {
    /// Creates an anchor that writes the counter value into `slot`.
    pub fn new(inner: E, counter: Rc<Cell<usize>>, slot: Rc<Cell<Option<usize>>>) -> Self {
        Self {
            inner,
            counter,
            slot,
        }
    }
}

impl<E: Element> Element for PageAnchor<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        let drew_something = mm_to_f64(result.size.height) > 0.0 || !result.has_more;
        if self.slot.get().is_none() && drew_something {
            self.slot.set(Some(self.counter.get()));
        }
        Ok(result)
    }
}
