//! Document construction helpers.
//!
//! [`DocumentBuilder`] produces `genpdf::Document` values pre-configured
//! with the bundled fonts, page margins and a header callback.  The
//! header is rendered through a [`PageDecorator`] so it appears at the
//! top of every physical page, including pages created by automatic
//! overflow breaks.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::style;
use genpdf::{self, Element, Margins, PageDecorator, Position, Size};

use crate::fonts;

type HeaderFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Builder for `genpdf::Document` instances pre-configured with the crate defaults.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
    page_counter: Option<Rc<Cell<usize>>>,
}

/// A configured document together with the handle of the installed
/// monospace font family.
pub struct BuiltDocument {
    /// The document, ready to receive content elements.
    pub document: genpdf::Document,
    /// Handle for styling elements with the bundled monospace family.
    pub monospace: genpdf::fonts::FontFamily<genpdf::fonts::Font>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Configures a header callback that is invoked for every page.
    pub fn with_header<F, E>(mut self, header: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.header = Some(Box::new(move |page| {
            Box::new(header(page)) as Box<dyn Element>
        }));
        self
    }

    /// Shares a counter that the page decorator advances whenever a new
    /// page starts.  Content elements can read it to learn which page
    /// they are being rendered on.
    pub fn with_page_counter(mut self, counter: Rc<Cell<usize>>) -> Self {
        self.page_counter = Some(counter);
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<BuiltDocument, Error> {
        let text_family = fonts::text_font_family()?;
        let mut document = genpdf::Document::new(text_family);
        let monospace = document.add_font_family(fonts::monospace_font_family()?);

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let decorator =
            ConfiguredPageDecorator::new(self.margins, self.header, self.page_counter);
        document.set_page_decorator(decorator);

        Ok(BuiltDocument {
            document,
            monospace,
        })
    }
}

struct ConfiguredPageDecorator {
    page: usize,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
    page_counter: Option<Rc<Cell<usize>>>,
}

impl ConfiguredPageDecorator {
    fn new(
        margins: Option<Margins>,
        header: Option<Box<HeaderFactory>>,
        page_counter: Option<Rc<Cell<usize>>>,
    ) -> Self {
        Self {
            page: 0,
            margins,
            header,
            page_counter,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        if let Some(counter) = &self.page_counter {
            counter.set(self.page);
        }

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        if let Some(header_cb) = &self.header {
            let mut element = header_cb(self.page);
            let result = element.render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, result.size.height));
        }

        Ok(area)
    }
}
