//! Assembles lab records into the rendered report document.
//!
//! [`ReportBuilder`] owns the banner text and the ordered record
//! sequence, builds a configured document through
//! [`crate::builder::DocumentBuilder`] and renders each record as a
//! section: a filled title bar, a "Source Code:" label, the bordered
//! listing block, a "Terminal Output:" label and the bordered transcript
//! block.  Styles are attached per element, so no section can leak font
//! or color state into the next one.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use genpdf::elements::{Break, Paragraph};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, Margins};

use crate::builder::{BuiltDocument, DocumentBuilder};
use crate::elements::{PageAnchor, TextBox};
use crate::model::LabRecord;

const BANNER_FONT_SIZE: u8 = 12;
const TITLE_FONT_SIZE: u8 = 12;
const MONO_FONT_SIZE: u8 = 10;

// Cell colors of the published report.
const TITLE_FILL: Color = Color::Rgb(200, 220, 255);
const CODE_FILL: Color = Color::Rgb(240, 240, 240);
const OUTPUT_FILL: Color = Color::Rgb(30, 30, 30);
const OUTPUT_TEXT: Color = Color::Rgb(50, 255, 50);
const LABEL_ON_DARK: Color = Color::Rgb(255, 255, 255);
const BORDER: Color = Color::Rgb(0, 0, 0);

/// A fully rendered report held in memory.
pub struct RenderedPdf {
    /// The serialized PDF document.
    pub bytes: Vec<u8>,
}

/// Builder that accumulates records and renders the report.
pub struct ReportBuilder {
    banner: String,
    records: Vec<LabRecord>,
}

impl ReportBuilder {
    /// Creates a builder with the given page banner and no records.
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            records: Vec::new(),
        }
    }

    /// Appends one record and returns the updated builder.
    pub fn add_record(mut self, record: LabRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Appends records in iteration order and returns the updated builder.
    pub fn add_records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = LabRecord>,
    {
        self.records.extend(records);
        self
    }

    /// Returns the records in report order.
    pub fn records(&self) -> &[LabRecord] {
        &self.records
    }

    fn assemble(&self) -> Result<(genpdf::Document, Vec<Rc<Cell<Option<usize>>>>), Error> {
        let page_counter = Rc::new(Cell::new(0));
        let banner = self.banner.clone();

        let BuiltDocument {
            mut document,
            monospace,
        } = DocumentBuilder::new()
            .with_margins(Margins::trbl(10, 10, 15, 10))
            .with_page_counter(Rc::clone(&page_counter))
            .with_header(move |_page| {
                let mut line = Paragraph::new(banner.clone());
                line.set_alignment(Alignment::Center);
                line.styled(Style::new().bold().with_font_size(BANNER_FONT_SIZE))
                    .padded(Margins::trbl(0, 0, 10, 0))
            })
            .build()?;

        document.set_title(self.banner.clone());

        let title_style = Style::new().bold().with_font_size(TITLE_FONT_SIZE);
        let mono = Style::new()
            .with_font_family(monospace)
            .with_font_size(MONO_FONT_SIZE);
        let output_label_style = mono.bold().with_color(LABEL_ON_DARK);
        let output_style = mono.bold().with_color(OUTPUT_TEXT);

        let mut section_pages = Vec::with_capacity(self.records.len());
        for record in &self.records {
            // Anchored to the title bar so a section pushed to the next
            // page by an overflow records the page it actually lands on.
            let slot = Rc::new(Cell::new(None));
            let title = TextBox::new(record.title(), title_style).with_fill(TITLE_FILL);
            document.push(PageAnchor::new(
                title,
                Rc::clone(&page_counter),
                Rc::clone(&slot),
            ));
            section_pages.push(slot);
            document.push(Break::new(1));

            document.push(Paragraph::new("Source Code:").styled(mono));
            document.push(
                TextBox::new(record.code(), mono)
                    .with_fill(CODE_FILL)
                    .with_border(BORDER),
            );
            document.push(Break::new(1));

            document.push(TextBox::new("Terminal Output:", output_label_style).with_fill(OUTPUT_FILL));
            document.push(
                TextBox::new(record.output(), output_style)
                    .with_fill(OUTPUT_FILL)
                    .with_border(BORDER),
            );
            document.push(Break::new(2));
        }

        Ok((document, section_pages))
    }

    /// Renders the report into memory.
    pub fn render(&self) -> Result<RenderedPdf, Error> {
        let (document, _section_pages) = self.assemble()?;
        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        Ok(RenderedPdf { bytes })
    }

    /// Renders the report and injects an outline entry per record.
    #[cfg(feature = "bookmarks")]
    pub fn render_with_bookmarks(&self) -> Result<RenderedPdf, Error> {
        let (document, section_pages) = self.assemble()?;
        let mut bytes = Vec::new();
        document.render(&mut bytes)?;

        let pages: Vec<Option<usize>> = section_pages.iter().map(|slot| slot.get()).collect();
        let bytes = crate::bookmarks::apply_record_bookmarks(&bytes, &self.records, &pages)
            .map_err(|err| {
                Error::new(
                    format!("Failed to attach record bookmarks: {}", err),
                    io::Error::new(io::ErrorKind::Other, err.to_string()),
                )
            })?;

        Ok(RenderedPdf { bytes })
    }

    /// Renders the report and writes it to `path`.
    pub fn render_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let pdf = self.render()?;
        fs::write(path, &pdf.bytes).map_err(|err| {
            Error::new(
                format!("Failed to write report to {}", path.display()),
                io::Error::new(err.kind(), err.to_string()),
            )
        })
    }
}
